//! Result-set rendering.

use std::fmt;
use std::slice;

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::form::FormState;
use crate::product::Product;

pub const HEADER: [&str; 5] = ["ID", "Name", "Description", "Category", "Price"];

/// The rendered result view: a fixed header plus one row per record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    rows: Vec<[String; 5]>,
}

impl ResultTable {
    /// Header only.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn header(&self) -> [&'static str; 5] {
        HEADER
    }

    pub fn rows(&self) -> &[[String; 5]] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn row(product: &Product) -> [String; 5] {
        [
            product
                .id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            product.name.clone(),
            product.description.clone(),
            product.category.clone(),
            product.price.clone(),
        ]
    }
}

impl fmt::Display for ResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = Builder::default();
        builder.push_record(HEADER);
        for row in &self.rows {
            builder.push_record(row.clone());
        }

        let mut table = builder.build();
        table.with(Style::sharp());
        write!(f, "{}", table)
    }
}

pub struct ResultSetRenderer;

impl ResultSetRenderer {
    /// Render `records` in order and promote the first one into the form.
    ///
    /// An empty slice renders the header only and leaves the form alone.
    pub fn render(records: &[Product], form: &mut FormState) -> ResultTable {
        let table = ResultTable {
            rows: records.iter().map(ResultTable::row).collect(),
        };

        if let Some(first) = records.first() {
            form.replace(first);
        }

        table
    }

    /// One record, as returned by Retrieve.
    pub fn render_single(record: &Product, form: &mut FormState) -> ResultTable {
        Self::render(slice::from_ref(record), form)
    }
}
