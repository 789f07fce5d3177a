//! HTTP route wiring.
//!
//! ## Surface
//! ```text
//! GET  /health       - liveness + database reachability
//! GET  /events       - bookable catalog items, soonest first
//! POST /orders       - place an order (reconcile + persist)
//! GET  /orders/:id   - booking record with frozen line items
//! ```
//! Booking status transitions deliberately have no route here: they belong
//! to the separate admin surface.

pub mod catalog;
pub mod health;
pub mod orders;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/events", get(catalog::list_events))
        .route("/orders", post(orders::create_order))
        .route("/orders/:id", get(orders::get_order))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Unit Tests
// =============================================================================
