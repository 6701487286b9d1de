//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};

use crate::Trace;
use crate::inbound::http::configure;
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryCatalogue;

/// HTTP state wired to a fresh in-memory catalogue.
///
/// The catalogue is returned too so tests can seed or inspect it directly.
pub fn memory_state() -> (web::Data<HttpState>, InMemoryCatalogue) {
    let catalogue = InMemoryCatalogue::new();
    let state = HttpState::from_repositories(
        Arc::new(catalogue.clone()),
        Arc::new(catalogue.clone()),
    );
    (web::Data::new(state), catalogue)
}

/// Health state already marked ready.
pub fn ready_health() -> web::Data<HealthState> {
    let health = HealthState::new();
    health.mark_ready();
    web::Data::new(health)
}

/// Initialise the full API with tracing around `state`.
pub async fn init_app(
    state: web::Data<HttpState>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(state)
            .app_data(ready_health())
            .wrap(Trace)
            .configure(configure),
    )
    .await
}
