//! Public catalog listing.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use encore_core::CatalogItem;

use crate::error::ApiResult;
use crate::state::AppState;

/// One bookable event as shown to customers.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    pub id: String,
    pub name: String,
    /// `null` means the event is free.
    pub price_minor: Option<i64>,
    pub starts_at: DateTime<Utc>,
}

impl From<CatalogItem> for EventView {
    fn from(item: CatalogItem) -> Self {
        EventView {
            id: item.id,
            name: item.name,
            price_minor: item.price_minor,
            starts_at: item.starts_at,
        }
    }
}

/// `GET /events` - bookable items only, soonest first.
pub async fn list_events(State(state): State<AppState>) -> ApiResult<Json<Vec<EventView>>> {
    let items = state.db.catalog().list_bookable(200).await?;
    Ok(Json(items.into_iter().map(EventView::from).collect()))
}
