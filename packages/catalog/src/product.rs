//! The Product record and the request shapes derived from it.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server-assigned product identifier.
///
/// Opaque to the client: numbers and strings from the server are both
/// accepted and kept in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse a form slot value; blank means "no id".
    pub fn from_input(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id percent-encoded as exactly one path segment.
    ///
    /// `/`, `?` and `#` in an id cannot reach another route or the query.
    pub fn path_segment(&self) -> String {
        // Form encoding writes spaces as `+`; a literal `+` is already `%2B`.
        url::form_urlencoded::byte_serialize(self.0.as_bytes())
            .collect::<String>()
            .replace('+', "%20")
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match scalar_text(Value::deserialize(deserializer)?) {
            Some(text) if !text.is_empty() => Ok(ProductId(text)),
            _ => Err(de::Error::custom("product id must be a string or a number")),
        }
    }
}

/// A product as exchanged with the catalog service.
///
/// Missing fields deserialize as empty so a partial record still
/// overwrites every displayed slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_id"
    )]
    pub id: Option<ProductId>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    /// Kept as text; the server may send a number.
    #[serde(default, deserialize_with = "lenient_string")]
    pub price: String,
}

/// The client-editable part of a product, sent verbatim on create/update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
}

/// Body of a purchase request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub amount: String,
    pub user_id: String,
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        value @ (Value::Array(_) | Value::Object(_)) => Err(de::Error::custom(format!(
            "expected a scalar, found {}",
            value
        ))),
        value => Ok(scalar_text(value).unwrap_or_default()),
    }
}

fn optional_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ProductId>, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?)
        .filter(|text| !text.is_empty())
        .map(ProductId))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_numeric_id_and_price() {
        let product: Product = serde_json::from_value(json!({
            "id": 1,
            "name": "Widget",
            "description": "d",
            "category": "c",
            "price": 9.99
        }))
        .unwrap();

        assert_eq!(product.id, Some(ProductId::new("1")));
        assert_eq!(product.price, "9.99");
        assert_eq!(product.name, "Widget");
    }

    #[test]
    fn missing_fields_become_empty() {
        let product: Product = serde_json::from_value(json!({"name": "Doll"})).unwrap();
        assert_eq!(product.id, None);
        assert_eq!(product.description, "");
        assert_eq!(product.category, "");
        assert_eq!(product.price, "");
    }

    #[test]
    fn null_fields_become_empty() {
        let product: Product =
            serde_json::from_value(json!({"id": null, "name": null, "price": null})).unwrap();
        assert_eq!(product, Product::default());
    }

    #[test]
    fn nested_values_are_rejected() {
        let result: Result<Product, _> = serde_json::from_value(json!({"name": {"first": "x"}}));
        assert!(result.is_err());
    }

    #[test]
    fn product_id_from_input() {
        assert_eq!(ProductId::from_input("  42 "), Some(ProductId::new("42")));
        assert_eq!(ProductId::from_input("   "), None);
        assert_eq!(ProductId::new("abc").to_string(), "abc");
    }

    #[test]
    fn product_id_deserializes_string_or_number() {
        let from_number: ProductId = serde_json::from_value(json!(12)).unwrap();
        let from_string: ProductId = serde_json::from_value(json!("12")).unwrap();
        assert_eq!(from_number, from_string);
        assert!(serde_json::from_value::<ProductId>(json!(null)).is_err());
    }

    #[test]
    fn id_is_omitted_when_absent() {
        let value = serde_json::to_value(Product {
            name: "Apples".to_string(),
            ..Product::default()
        })
        .unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["name"], "Apples");
    }

    #[test]
    fn path_segment_escapes_separators() {
        assert_eq!(ProductId::new("42").path_segment(), "42");
        assert_eq!(ProductId::new("7/purchase").path_segment(), "7%2Fpurchase");
        assert_eq!(ProductId::new("1?name=x").path_segment(), "1%3Fname%3Dx");
        assert_eq!(ProductId::new("a b+c#d").path_segment(), "a%20b%2Bc%23d");
    }
}
