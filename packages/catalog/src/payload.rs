//! Request bodies for the mutating operations.
//!
//! Product fields are passed through verbatim, empty strings included; the
//! server decides what is valid.

use serde_json::{json, Value};

use crate::product::{ProductFields, PurchaseOrder};

/// Body for create and update.
pub fn product_body(fields: &ProductFields) -> Value {
    json!({
        "name": fields.name,
        "description": fields.description,
        "category": fields.category,
        "price": fields.price,
    })
}

/// Body for a purchase.
pub fn purchase_body(order: &PurchaseOrder) -> Value {
    json!({
        "amount": order.amount,
        "user_id": order.user_id,
    })
}
