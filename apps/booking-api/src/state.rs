//! Shared application state.

use std::sync::Arc;

use encore_core::PromotionTable;
use encore_db::Database;

use crate::service::CheckoutService;

/// State handed to every request handler.
///
/// Cheap to clone: the database is an `Arc`-backed pool handle and the
/// promotion table is shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub promotions: Arc<PromotionTable>,
}

impl AppState {
    pub fn new(db: Database, promotions: PromotionTable) -> Self {
        AppState {
            db,
            promotions: Arc::new(promotions),
        }
    }

    /// Builds a checkout service over this state.
    pub fn checkout(&self) -> CheckoutService {
        CheckoutService::new(self.db.clone(), self.promotions.clone())
    }
}
