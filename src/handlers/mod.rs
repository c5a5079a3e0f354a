pub mod charge;
pub mod health;

pub use charge::*;
pub use health::*;

use crate::{config::Environment, services::ChargeGateway};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ChargeGateway>,
    pub environment: Environment,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(gateway: Arc<ChargeGateway>, environment: Environment) -> Self {
        Self {
            gateway,
            environment,
            started_at: Instant::now(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/gerar-pix", post(create_pix_charge))
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive())
}
