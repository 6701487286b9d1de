//! Driving port for bulk course imports.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::Error;

/// Counts reported after an import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub successful_records: u64,
    pub failed_records: u64,
}

/// Driving port importing a JSON array of courses one element at a time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseImport: Send + Sync {
    /// Import every element of `document`. Individual element failures are
    /// counted, never returned; only an unreadable document is an error.
    async fn import_courses(&self, document: &[u8]) -> Result<ImportSummary, Error>;
}
