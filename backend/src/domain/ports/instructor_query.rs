//! Driving port for instructor reads.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, Instructor};

/// Driving port for paging through instructors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InstructorQuery: Send + Sync {
    async fn list_instructors(&self, request: PageRequest) -> Result<Page<Instructor>, Error>;
}
