//! Order lookup route handler.

use std::time::Instant;

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::lookup::{LookupOutcome, LookupRequest, LookupResponse, project_order, resolve};
use crate::state::AppState;

/// Look up an order by customer email and order number.
///
/// Delegates to the resolver and maps its four outcomes onto the HTTP
/// contract; the not-found and upstream-failure cases stay distinct so the
/// frontend can show "check your details" vs "try again later".
#[instrument(skip(state, request), fields(order_number = %request.order_number))]
pub async fn lookup(
    State(state): State<AppState>,
    Json(request): Json<LookupRequest>,
) -> Result<Json<LookupResponse>> {
    let started = Instant::now();

    match resolve(&request, state.admin()).await {
        LookupOutcome::Resolved(order) => {
            tracing::info!(
                order = %order.name,
                elapsed_ms = elapsed_ms(started),
                "lookup ok"
            );
            Ok(Json(project_order(order)))
        }
        LookupOutcome::InvalidInput => Err(AppError::MissingFields),
        LookupOutcome::NotFoundOrMismatch => {
            tracing::warn!(
                elapsed_ms = elapsed_ms(started),
                "lookup found no matching order"
            );
            Err(AppError::OrderNotFound)
        }
        LookupOutcome::UpstreamFailure(err) => Err(AppError::Upstream(err)),
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
