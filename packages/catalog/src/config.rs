//! Client configuration.
//!
//! The client can be deployed against two server layouts:
//!
//! - the **api** profile: the collection lives at `/api/products` and price
//!   filters ride along on the ordinary search;
//! - the **service** profile: the collection lives at `/products` and price
//!   ranges are answered by a dedicated `/products/price` endpoint.
//!
//! Values come from defaults, then `CATALOG_*` environment variables, then
//! command-line flags.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use catalog_http::ReqwestExecutor;

use crate::error::Error;
use crate::product::ProductId;

pub const ENV_BASE_URL: &str = "CATALOG_BASE_URL";
pub const ENV_API_PREFIX: &str = "CATALOG_API_PREFIX";
pub const ENV_RANGE_ROUTING: &str = "CATALOG_RANGE_ROUTING";
pub const ENV_TIMEOUT_SECS: &str = "CATALOG_TIMEOUT_SECS";

/// Where a search carrying a price range is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeRouting {
    /// `minimum`/`maximum` go on the collection path with the other filters.
    #[default]
    Inline,
    /// Searches with a price range go to `{prefix}/price`.
    Dedicated,
}

impl FromStr for RangeRouting {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inline" => Ok(RangeRouting::Inline),
            "dedicated" => Ok(RangeRouting::Dedicated),
            other => Err(Error::Config {
                message: format!(
                    "unknown range routing '{}' (expected 'inline' or 'dedicated')",
                    other
                ),
            }),
        }
    }
}

impl fmt::Display for RangeRouting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeRouting::Inline => f.write_str("inline"),
            RangeRouting::Dedicated => f.write_str("dedicated"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server origin, e.g. `http://localhost:8080`.
    pub base_url: String,
    /// Path of the products collection, e.g. `/api/products`.
    pub api_prefix: String,
    pub range_routing: RangeRouting,
    /// Per-request timeout handed to the transport.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::api_profile()
    }
}

impl ClientConfig {
    pub fn api_profile() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_prefix: "/api/products".to_string(),
            range_routing: RangeRouting::Inline,
            timeout_secs: 30,
        }
    }

    pub fn service_profile() -> Self {
        Self {
            api_prefix: "/products".to_string(),
            range_routing: RangeRouting::Dedicated,
            ..Self::api_profile()
        }
    }

    /// Defaults overlaid with the `CATALOG_*` environment variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    /// Overlay values from a key lookup (the environment, in production).
    ///
    /// Blank values are ignored.
    pub fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(base_url) = get(ENV_BASE_URL) {
            self.base_url = base_url.trim().to_string();
        }
        if let Some(prefix) = get(ENV_API_PREFIX) {
            self.api_prefix = prefix.trim().to_string();
        }
        if let Some(routing) = get(ENV_RANGE_ROUTING) {
            self.range_routing = routing.parse()?;
        }
        if let Some(timeout) = get(ENV_TIMEOUT_SECS) {
            self.timeout_secs = timeout.trim().parse().map_err(|_| Error::Config {
                message: format!("{} must be a whole number of seconds", ENV_TIMEOUT_SECS),
            })?;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), Error> {
        Url::parse(&self.base_url).map_err(|e| Error::Config {
            message: format!("base url '{}': {}", self.base_url, e),
        })?;

        if !self.api_prefix.starts_with('/') {
            return Err(Error::Config {
                message: format!("api prefix '{}' must start with '/'", self.api_prefix),
            });
        }

        if self.timeout_secs == 0 {
            return Err(Error::Config {
                message: "timeout must be at least one second".to_string(),
            });
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the production transport for this configuration.
    pub fn executor(&self) -> Result<ReqwestExecutor, Error> {
        Ok(ReqwestExecutor::new(&self.base_url, self.timeout())?)
    }

    pub fn collection_path(&self) -> String {
        let trimmed = self.api_prefix.trim_end_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// `{prefix}/{id}` with the id encoded as one segment.
    pub fn item_path(&self, id: &ProductId) -> String {
        format!(
            "{}/{}",
            self.api_prefix.trim_end_matches('/'),
            id.path_segment()
        )
    }

    pub fn purchase_path(&self, id: &ProductId) -> String {
        format!("{}/purchase", self.item_path(id))
    }

    pub fn price_path(&self) -> String {
        format!("{}/price", self.api_prefix.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_is_api_profile() {
        let config = ClientConfig::default();
        assert_eq!(config.api_prefix, "/api/products");
        assert_eq!(config.range_routing, RangeRouting::Inline);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn service_profile_uses_dedicated_range_endpoint() {
        let config = ClientConfig::service_profile();
        assert_eq!(config.collection_path(), "/products");
        assert_eq!(config.price_path(), "/products/price");
        assert_eq!(config.range_routing, RangeRouting::Dedicated);
    }

    #[test]
    fn paths_are_built_from_prefix() {
        let config = ClientConfig {
            api_prefix: "/api/products/".to_string(),
            ..ClientConfig::default()
        };
        let id = ProductId::new("7");
        assert_eq!(config.collection_path(), "/api/products");
        assert_eq!(config.item_path(&id), "/api/products/7");
        assert_eq!(config.purchase_path(&id), "/api/products/7/purchase");
        assert_eq!(config.price_path(), "/api/products/price");
    }

    #[test]
    fn ids_cannot_escape_their_path_segment() {
        let config = ClientConfig::service_profile();

        let nested = ProductId::new("7/purchase");
        assert_eq!(config.item_path(&nested), "/products/7%2Fpurchase");
        assert_eq!(
            config.purchase_path(&nested),
            "/products/7%2Fpurchase/purchase"
        );

        let with_query = ProductId::new("1?name=x");
        assert_eq!(config.item_path(&with_query), "/products/1%3Fname%3Dx");
    }

    #[test]
    fn overlay_applies_environment_values() {
        let config = ClientConfig::default()
            .overlay(lookup(&[
                (ENV_BASE_URL, "http://catalog.internal:9000"),
                (ENV_API_PREFIX, "/products"),
                (ENV_RANGE_ROUTING, "Dedicated"),
                (ENV_TIMEOUT_SECS, "5"),
            ]))
            .unwrap();

        assert_eq!(config.base_url, "http://catalog.internal:9000");
        assert_eq!(config.api_prefix, "/products");
        assert_eq!(config.range_routing, RangeRouting::Dedicated);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn overlay_ignores_blank_values() {
        let config = ClientConfig::default()
            .overlay(lookup(&[(ENV_API_PREFIX, "  ")]))
            .unwrap();
        assert_eq!(config.api_prefix, "/api/products");
    }

    #[test]
    fn overlay_rejects_bad_values() {
        let bad_routing = ClientConfig::default().overlay(lookup(&[(ENV_RANGE_ROUTING, "both")]));
        assert!(matches!(bad_routing, Err(Error::Config { .. })));

        let bad_timeout = ClientConfig::default().overlay(lookup(&[(ENV_TIMEOUT_SECS, "soon")]));
        assert!(matches!(bad_timeout, Err(Error::Config { .. })));

        let bad_url = ClientConfig::default().overlay(lookup(&[(ENV_BASE_URL, "localhost")]));
        assert!(matches!(bad_url, Err(Error::Config { .. })));

        let bad_prefix = ClientConfig::default().overlay(lookup(&[(ENV_API_PREFIX, "products")]));
        assert!(matches!(bad_prefix, Err(Error::Config { .. })));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"api_prefix": "/products", "range_routing": "dedicated"}"#)
                .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.range_routing, RangeRouting::Dedicated);
    }
}
