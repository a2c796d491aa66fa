//! Search criteria and query-string construction.
//!
//! Only criteria that are non-empty after trimming reach the query, in the
//! fixed order `name`, `category`, `description`, `minimum`, `maximum`.
//! Encoding is left to [`HttpRequest::query_string`], the same encoder the
//! transport puts on the wire.

use catalog_http::HttpRequest;

/// The sparse set of search inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub name: String,
    pub category: String,
    pub description: String,
    /// `"<min>-<max>"`, either half optional.
    pub price_range: String,
}

impl SearchCriteria {
    pub fn is_empty(&self) -> bool {
        QueryStringBuilder::new(self).params().is_empty()
    }

    pub fn price_range(&self) -> PriceRange {
        PriceRange::parse(&self.price_range)
    }
}

/// Bounds parsed from a price-range input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceRange {
    pub minimum: Option<String>,
    pub maximum: Option<String>,
}

impl PriceRange {
    /// Split on `-`: the first segment is the minimum, the second the maximum.
    ///
    /// Bounds are not validated as numbers; the server does that. Anything
    /// after a second `-` is ignored.
    pub fn parse(input: &str) -> Self {
        let mut parts = input.trim().split('-');
        let minimum = parts.next().and_then(non_blank);
        let maximum = parts.next().and_then(non_blank);
        Self { minimum, maximum }
    }

    pub fn is_empty(&self) -> bool {
        self.minimum.is_none() && self.maximum.is_none()
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Turns [`SearchCriteria`] into ordered query parameters.
#[derive(Debug, Clone, Copy)]
pub struct QueryStringBuilder<'a> {
    criteria: &'a SearchCriteria,
}

impl<'a> QueryStringBuilder<'a> {
    pub fn new(criteria: &'a SearchCriteria) -> Self {
        Self { criteria }
    }

    /// The recognized, non-empty parameters in evaluation order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let criteria = self.criteria;
        let range = criteria.price_range();

        [
            ("name", non_blank(&criteria.name)),
            ("category", non_blank(&criteria.category)),
            ("description", non_blank(&criteria.description)),
            ("minimum", range.minimum),
            ("maximum", range.maximum),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect()
    }

    pub fn has_price_filter(&self) -> bool {
        !self.criteria.price_range().is_empty()
    }

    /// Append the parameters to `request` in order.
    pub fn apply(&self, request: HttpRequest) -> HttpRequest {
        self.params()
            .into_iter()
            .fold(request, |request, (key, value)| request.with_query(key, value))
    }

    /// `?k=v&k=v` with keys and values percent-encoded, or `""` when no
    /// criterion is set.
    pub fn build(&self) -> String {
        self.apply(HttpRequest::default()).query_string()
    }
}
