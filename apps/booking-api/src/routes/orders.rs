//! Order endpoints: place an order, read a booking back.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use encore_core::{Booking, BookingLineItem, BookingStatus, PaymentMethod, ReconciledOrder};

use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::service::CreateOrderRequest;
use crate::state::AppState;

// =============================================================================
// Response Types
// =============================================================================

/// Confirmation returned from `POST /orders`.
///
/// Every monetary figure here is the server-derived one; whatever the
/// client displayed before submitting is irrelevant by now.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub booking_id: String,
    pub status: BookingStatus,
    pub subtotal_minor: i64,
    pub applied_promotion_description: Option<String>,
    pub discount_minor: i64,
    pub total_minor: i64,
    pub distinct_item_count: u32,
    pub total_ticket_count: i64,
}

impl OrderResponse {
    fn from_parts(booking: &Booking, order: &ReconciledOrder) -> Self {
        OrderResponse {
            booking_id: booking.id.clone(),
            status: booking.status,
            subtotal_minor: booking.subtotal_minor,
            applied_promotion_description: booking.promotion_description.clone(),
            discount_minor: booking.discount_minor,
            total_minor: booking.total_minor,
            distinct_item_count: order.distinct_item_count,
            total_ticket_count: order.total_ticket_count,
        }
    }
}

/// One frozen line item as returned from `GET /orders/:id`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemView {
    pub catalog_item_id: String,
    pub name: String,
    pub unit_price_minor: i64,
    pub quantity: i64,
    pub line_total_minor: i64,
}

impl From<BookingLineItem> for LineItemView {
    fn from(item: BookingLineItem) -> Self {
        LineItemView {
            catalog_item_id: item.catalog_item_id,
            name: item.name_snapshot,
            unit_price_minor: item.unit_price_minor,
            quantity: item.quantity,
            line_total_minor: item.line_total_minor,
        }
    }
}

/// Full booking record returned from `GET /orders/:id`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetailResponse {
    pub booking_id: String,
    pub status: BookingStatus,
    pub payment_method: PaymentMethod,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub subtotal_minor: i64,
    pub applied_promotion_description: Option<String>,
    pub discount_minor: i64,
    pub total_minor: i64,
    pub created_at: DateTime<Utc>,
    pub line_items: Vec<LineItemView>,
}

impl BookingDetailResponse {
    fn from_parts(booking: Booking, items: Vec<BookingLineItem>) -> Self {
        BookingDetailResponse {
            booking_id: booking.id,
            status: booking.status,
            payment_method: booking.payment_method,
            full_name: booking.full_name,
            email: booking.email,
            phone: booking.phone,
            address: booking.address,
            notes: booking.notes,
            subtotal_minor: booking.subtotal_minor,
            applied_promotion_description: booking.promotion_description,
            discount_minor: booking.discount_minor,
            total_minor: booking.total_minor,
            created_at: booking.created_at,
            line_items: items.into_iter().map(LineItemView::from).collect(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /orders` - reconcile and persist one order.
///
/// The body goes through [`ApiJson`] so a schema-level rejection (missing
/// field, unknown field, malformed JSON) reports as 400 with the standard
/// error body, exactly like a business-rule rejection.
pub async fn create_order(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateOrderRequest>,
) -> ApiResult<(StatusCode, Json<OrderResponse>)> {
    let (booking, order) = state.checkout().place_order(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderResponse::from_parts(&booking, &order)),
    ))
}

/// `GET /orders/:id` - booking record with its frozen line items.
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<BookingDetailResponse>> {
    let bookings = state.db.bookings();

    let booking = bookings
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("booking not found: {id}")))?;
    let items = bookings.get_items(&id).await?;

    Ok(Json(BookingDetailResponse::from_parts(booking, items)))
}
