//! The form: the product under edit plus the search and purchase inputs.
//!
//! Every slot is a plain string that the operator may set or clear. Server
//! responses never merge into the form; [`FormState::replace`] overwrites
//! every product slot and [`FormState::clear`] empties them.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::product::{Product, ProductFields, ProductId, PurchaseOrder};
use crate::query::SearchCriteria;

/// A named input slot on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Id,
    Name,
    Description,
    Category,
    Price,
    PriceRange,
    SearchName,
    SearchCategory,
    SearchDescription,
    PurchaseId,
    UserId,
    Amount,
}

impl FormField {
    pub const ALL: [FormField; 12] = [
        FormField::Id,
        FormField::Name,
        FormField::Description,
        FormField::Category,
        FormField::Price,
        FormField::PriceRange,
        FormField::SearchName,
        FormField::SearchCategory,
        FormField::SearchDescription,
        FormField::PurchaseId,
        FormField::UserId,
        FormField::Amount,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FormField::Id => "id",
            FormField::Name => "name",
            FormField::Description => "description",
            FormField::Category => "category",
            FormField::Price => "price",
            FormField::PriceRange => "price_range",
            FormField::SearchName => "search_name",
            FormField::SearchCategory => "search_category",
            FormField::SearchDescription => "search_description",
            FormField::PurchaseId => "purchase_id",
            FormField::UserId => "user_id",
            FormField::Amount => "amount",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        FormField::ALL
            .into_iter()
            .find(|field| field.name() == wanted)
            .ok_or_else(|| Error::UnknownField {
                name: s.to_string(),
            })
    }
}

/// Inputs of the purchase panel. Not part of the product form proper, so
/// [`FormState::clear`] leaves them alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseInputs {
    pub product_id: String,
    pub user_id: String,
    pub amount: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    id: String,
    name: String,
    description: String,
    category: String,
    price: String,
    // Shared by the product display and the search criteria.
    price_range: String,
    search_name: String,
    search_category: String,
    search_description: String,
    purchase: PurchaseInputs,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Id => &self.id,
            FormField::Name => &self.name,
            FormField::Description => &self.description,
            FormField::Category => &self.category,
            FormField::Price => &self.price,
            FormField::PriceRange => &self.price_range,
            FormField::SearchName => &self.search_name,
            FormField::SearchCategory => &self.search_category,
            FormField::SearchDescription => &self.search_description,
            FormField::PurchaseId => &self.purchase.product_id,
            FormField::UserId => &self.purchase.user_id,
            FormField::Amount => &self.purchase.amount,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        let slot = match field {
            FormField::Id => &mut self.id,
            FormField::Name => &mut self.name,
            FormField::Description => &mut self.description,
            FormField::Category => &mut self.category,
            FormField::Price => &mut self.price,
            FormField::PriceRange => &mut self.price_range,
            FormField::SearchName => &mut self.search_name,
            FormField::SearchCategory => &mut self.search_category,
            FormField::SearchDescription => &mut self.search_description,
            FormField::PurchaseId => &mut self.purchase.product_id,
            FormField::UserId => &mut self.purchase.user_id,
            FormField::Amount => &mut self.purchase.amount,
        };
        *slot = value;
    }

    /// Every slot with its current value, in display order.
    pub fn slots(&self) -> impl Iterator<Item = (FormField, &str)> + '_ {
        FormField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }

    /// Overwrite the product slots with `record` and empty the price range.
    ///
    /// Fields missing from the record become empty. Search and purchase
    /// slots are untouched.
    pub fn replace(&mut self, record: &Product) {
        self.id = record
            .id
            .as_ref()
            .map(ProductId::to_string)
            .unwrap_or_default();
        self.name = record.name.clone();
        self.description = record.description.clone();
        self.category = record.category.clone();
        self.price = record.price.clone();
        self.price_range.clear();
    }

    /// Empty the id, the product slots, the price range and the search slots.
    pub fn clear(&mut self) {
        self.id.clear();
        self.name.clear();
        self.description.clear();
        self.category.clear();
        self.price.clear();
        self.price_range.clear();
        self.search_name.clear();
        self.search_category.clear();
        self.search_description.clear();
    }

    pub fn product_id(&self) -> Option<ProductId> {
        ProductId::from_input(&self.id)
    }

    pub fn purchase_product_id(&self) -> Option<ProductId> {
        ProductId::from_input(&self.purchase.product_id)
    }

    pub fn product_fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            price: self.price.clone(),
        }
    }

    pub fn search_criteria(&self) -> SearchCriteria {
        SearchCriteria {
            name: self.search_name.clone(),
            category: self.search_category.clone(),
            description: self.search_description.clone(),
            price_range: self.price_range.clone(),
        }
    }

    pub fn purchase_order(&self) -> PurchaseOrder {
        PurchaseOrder {
            amount: self.purchase.amount.clone(),
            user_id: self.purchase.user_id.clone(),
        }
    }

    pub fn purchase(&self) -> &PurchaseInputs {
        &self.purchase
    }
}
