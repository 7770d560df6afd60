//! Projection of a resolved order into the frontend line-item contract.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::shopify::types::{LineItemCandidate, OrderCandidate};

/// Successful lookup response body.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    pub order_id: String,
    pub currency: String,
    pub line_items: Vec<LineItemView>,
}

/// One returnable line item. Absent upstream values serialize as explicit
/// `null`, never as omitted fields.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LineItemView {
    pub line_item_id: String,
    pub product_id: Option<String>,
    pub variant_id: Option<String>,
    pub title: String,
    pub variant_title: Option<String>,
    /// Unit price in integer minor units (e.g. cents).
    pub price: i64,
    pub returnable_quantity: i64,
    pub image: Option<String>,
    pub sku: Option<String>,
}

/// Project a resolved order, preserving upstream line-item order.
#[must_use]
pub fn project_order(order: OrderCandidate) -> LookupResponse {
    LookupResponse {
        order_id: order.id,
        currency: order.currency_code,
        line_items: order.line_items.into_iter().map(project_line_item).collect(),
    }
}

fn project_line_item(item: LineItemCandidate) -> LineItemView {
    LineItemView {
        price: minor_units(item.unit_price_amount.as_deref()),
        // An explicit refundable quantity wins, zero included; the fallback
        // covers order states where the platform omits refundable tracking.
        returnable_quantity: item
            .refundable_quantity
            .unwrap_or_else(|| item.quantity.max(0)),
        line_item_id: item.id,
        product_id: item.product_id,
        variant_id: item.variant_id,
        title: item.title,
        variant_title: item.variant_title,
        image: item.image_url,
        sku: item.sku,
    }
}

/// Decimal amount string to integer minor units, rounding half away from
/// zero. Missing or unparseable amounts project to zero.
fn minor_units(amount: Option<&str>) -> i64 {
    let Some(raw) = amount else { return 0 };
    let Ok(amount) = Decimal::from_str(raw.trim()) else {
        return 0;
    };

    amount.checked_mul(Decimal::ONE_HUNDRED).map_or(0, |cents| {
        cents
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(0)
    })
}
