pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(handlers::handle_home))
        .route("/start_interview", get(handlers::handle_start_interview))
        .route("/submit_response", post(handlers::handle_submit_response))
        .with_state(state)
}
