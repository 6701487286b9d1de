//! Builders for HTTP state over the configured storage adapter.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use courses_backend::inbound::http::state::HttpState;
use courses_backend::outbound::memory::InMemoryCatalogue;
use courses_backend::outbound::persistence::{
    DbPool, DieselCourseRepository, DieselInstructorRepository,
};

use super::ServerConfig;

/// Wire the services over the Diesel repositories when a pool is available,
/// otherwise over one in-memory catalogue shared by both ports.
fn build_state(pool: Option<&DbPool>) -> HttpState {
    match pool {
        Some(pool) => {
            info!("serving records from PostgreSQL");
            HttpState::from_repositories(
                Arc::new(DieselCourseRepository::new(pool.clone())),
                Arc::new(DieselInstructorRepository::new(pool.clone())),
            )
        }
        None => {
            warn!("no database configured; records are kept in memory");
            let catalogue = Arc::new(InMemoryCatalogue::new());
            HttpState::from_repositories(Arc::clone(&catalogue), catalogue)
        }
    }
}

/// Build the shared HTTP state from the configured storage.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(build_state(config.db_pool.as_ref()))
}
