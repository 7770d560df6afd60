//! Return-request route handler.
//!
//! Accepts a validated return or exchange request and acknowledges it with
//! a request id. Nothing is persisted; fulfillment of the request happens
//! out of band.

use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, Result};

/// A return or exchange request from the returns UI.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub line_item_id: String,
    #[serde(default)]
    pub quantity: i64,
    pub reason: Option<String>,
    pub kind: ReturnKind,
    pub exchange_variant_id: Option<String>,
}

/// What the customer wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnKind {
    Refund,
    Exchange,
}

/// Acknowledgement returned to the UI.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnAck {
    pub ok: bool,
    pub request_id: Uuid,
}

/// Accept a return/exchange request.
#[instrument(skip(request), fields(order_id = %request.order_id))]
pub async fn create(Json(request): Json<ReturnRequest>) -> Result<Json<ReturnAck>> {
    validate(&request)?;

    let request_id = Uuid::new_v4();
    tracing::info!(
        order_id = %request.order_id,
        line_item_id = %request.line_item_id,
        quantity = request.quantity,
        kind = ?request.kind,
        request_id = %request_id,
        "return request accepted"
    );

    Ok(Json(ReturnAck {
        ok: true,
        request_id,
    }))
}

fn validate(request: &ReturnRequest) -> Result<()> {
    if request.order_id.trim().is_empty() {
        return Err(AppError::BadRequest("orderId is required".to_string()));
    }

    if request.line_item_id.trim().is_empty() {
        return Err(AppError::BadRequest("lineItemId is required".to_string()));
    }

    if request.quantity < 1 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }

    if request.kind == ReturnKind::Exchange
        && request
            .exchange_variant_id
            .as_deref()
            .is_none_or(|id| id.trim().is_empty())
    {
        return Err(AppError::BadRequest(
            "exchangeVariantId is required for exchanges".to_string(),
        ));
    }

    Ok(())
}
