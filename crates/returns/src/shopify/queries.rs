//! GraphQL document and wire types for the order search.
//!
//! The Admin API response shape (connections, edges, money sets) is decoded
//! here and immediately converted to the flat candidate types; nothing past
//! this module sees the wire structure.

use serde::Deserialize;

use super::types::{LineItemCandidate, OrderCandidate};

/// Order search document. `first: 5` bounds the result set upstream; the
/// resolver enforces the same cap locally.
pub const ORDER_SEARCH_QUERY: &str = r"
query OrderSearch($q: String!) {
  orders(first: 5, query: $q) {
    edges {
      node {
        id
        name
        email
        currencyCode
        customer { email }
        lineItems(first: 100) {
          edges {
            node {
              id
              quantity
              refundableQuantity
              title
              sku
              originalUnitPriceSet { presentmentMoney { amount currencyCode } }
              variant { id title image { url } product { id title } }
            }
          }
        }
      }
    }
  }
}
";

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct OrderSearchData {
    pub orders: OrderConnection,
}

#[derive(Debug, Deserialize)]
pub struct OrderConnection {
    pub edges: Vec<OrderEdge>,
}

#[derive(Debug, Deserialize)]
pub struct OrderEdge {
    pub node: OrderNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderNode {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub currency_code: String,
    pub customer: Option<CustomerNode>,
    pub line_items: LineItemConnection,
}

#[derive(Debug, Deserialize)]
pub struct CustomerNode {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LineItemConnection {
    pub edges: Vec<LineItemEdge>,
}

#[derive(Debug, Deserialize)]
pub struct LineItemEdge {
    pub node: LineItemNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemNode {
    pub id: String,
    pub quantity: i64,
    pub refundable_quantity: Option<i64>,
    pub title: String,
    pub sku: Option<String>,
    pub original_unit_price_set: Option<MoneyBag>,
    pub variant: Option<VariantNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyBag {
    pub presentment_money: Option<Money>,
}

#[derive(Debug, Deserialize)]
pub struct Money {
    pub amount: String,
}

#[derive(Debug, Deserialize)]
pub struct VariantNode {
    pub id: String,
    pub title: Option<String>,
    pub image: Option<ImageNode>,
    pub product: Option<ProductNode>,
}

#[derive(Debug, Deserialize)]
pub struct ImageNode {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductNode {
    pub id: String,
}

// =============================================================================
// Conversions
// =============================================================================

/// Flatten an order node into an [`OrderCandidate`].
pub fn convert_order(node: OrderNode) -> OrderCandidate {
    OrderCandidate {
        id: node.id,
        name: node.name,
        email: node.email,
        customer_email: node.customer.and_then(|c| c.email),
        currency_code: node.currency_code,
        line_items: node
            .line_items
            .edges
            .into_iter()
            .map(|edge| convert_line_item(edge.node))
            .collect(),
    }
}

fn convert_line_item(node: LineItemNode) -> LineItemCandidate {
    let unit_price_amount = node
        .original_unit_price_set
        .and_then(|set| set.presentment_money)
        .map(|money| money.amount);

    let (variant_id, variant_title, image_url, product_id) = match node.variant {
        Some(variant) => (
            Some(variant.id),
            variant.title,
            variant.image.map(|image| image.url),
            variant.product.map(|product| product.id),
        ),
        None => (None, None, None, None),
    };

    LineItemCandidate {
        id: node.id,
        title: node.title,
        variant_title,
        sku: node.sku,
        quantity: node.quantity,
        refundable_quantity: node.refundable_quantity,
        unit_price_amount,
        variant_id,
        product_id,
        image_url,
    }
}
