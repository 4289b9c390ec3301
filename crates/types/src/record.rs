//! Order rows and the per-recipient label records built from them.

use crate::ids::OrderId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One of the six address/contact fields that identify a recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShippingField {
    Name,
    Street,
    City,
    Zip,
    Province,
    Phone,
}

impl ShippingField {
    pub const ALL: [ShippingField; 6] = [
        ShippingField::Name,
        ShippingField::Street,
        ShippingField::City,
        ShippingField::Zip,
        ShippingField::Province,
        ShippingField::Phone,
    ];

    /// The export column this field is read from.
    pub fn column(self) -> &'static str {
        match self {
            ShippingField::Name => "Shipping Name",
            ShippingField::Street => "Shipping Street",
            ShippingField::City => "Shipping City",
            ShippingField::Zip => "Shipping Zip",
            ShippingField::Province => "Shipping Province",
            ShippingField::Phone => "Shipping Phone",
        }
    }
}

/// Shipping data as read from a single row. `None` means the cell was empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShippingFields {
    pub name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub province: Option<String>,
    pub phone: Option<String>,
}

impl ShippingFields {
    pub fn get(&self, field: ShippingField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Stores `value`, treating blank text as unset.
    pub fn set(&mut self, field: ShippingField, value: impl Into<String>) {
        let value = value.into();
        let trimmed = value.trim();
        *self.slot_mut(field) = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    pub fn with(mut self, field: ShippingField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn slot(&self, field: ShippingField) -> &Option<String> {
        match field {
            ShippingField::Name => &self.name,
            ShippingField::Street => &self.street,
            ShippingField::City => &self.city,
            ShippingField::Zip => &self.zip,
            ShippingField::Province => &self.province,
            ShippingField::Phone => &self.phone,
        }
    }

    pub fn slot_mut(&mut self, field: ShippingField) -> &mut Option<String> {
        match field {
            ShippingField::Name => &mut self.name,
            ShippingField::Street => &mut self.street,
            ShippingField::City => &mut self.city,
            ShippingField::Zip => &mut self.zip,
            ShippingField::Province => &mut self.province,
            ShippingField::Phone => &mut self.phone,
        }
    }

    /// Fields that are still unset.
    pub fn missing(&self) -> Vec<ShippingField> {
        ShippingField::ALL
            .into_iter()
            .filter(|f| self.slot(*f).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        ShippingField::ALL.iter().all(|f| self.slot(*f).is_some())
    }

    pub fn is_empty(&self) -> bool {
        ShippingField::ALL.iter().all(|f| self.slot(*f).is_none())
    }

    /// Resolves the fields into a recipient key. Unset fields become empty
    /// strings and the phone number is normalized.
    pub fn to_key(&self) -> ShippingKey {
        let text = |field| self.get(field).unwrap_or_default().to_string();
        ShippingKey {
            name: text(ShippingField::Name),
            street: text(ShippingField::Street),
            city: text(ShippingField::City),
            zip: text(ShippingField::Zip),
            province: text(ShippingField::Province),
            phone: normalize_phone(self.get(ShippingField::Phone).unwrap_or_default()),
        }
    }
}

/// Identity of a physical recipient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShippingKey {
    pub name: String,
    pub street: String,
    pub city: String,
    pub zip: String,
    pub province: String,
    pub phone: String,
}

impl ShippingKey {
    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
            && self.street.is_empty()
            && self.city.is_empty()
            && self.zip.is_empty()
            && self.province.is_empty()
            && self.phone.is_empty()
    }
}

/// Strips the `.0`-style suffix a spreadsheet adds when it reads a phone
/// number as a float: `"5551234567.0"` becomes `"5551234567"`.
///
/// Only a purely numeric suffix after the first dot is removed, so dotted
/// formats such as `555.123.4567` are left alone.
pub fn normalize_phone(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.split_once('.') {
        Some((head, tail)) if !head.is_empty() && tail.chars().all(|c| c.is_ascii_digit()) => {
            head.to_string()
        }
        _ => trimmed.to_string(),
    }
}

/// One row of the order export: a single purchased line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemRow {
    pub order_id: OrderId,
    pub shipping: ShippingFields,
    /// Raw quantity cell; coerced to an integer during aggregation.
    pub quantity: String,
    pub item_name: Option<String>,
}

impl LineItemRow {
    pub fn new(order_id: impl Into<OrderId>, quantity: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            shipping: ShippingFields::default(),
            quantity: quantity.into(),
            item_name: None,
        }
    }

    pub fn with_shipping(mut self, shipping: ShippingFields) -> Self {
        self.shipping = shipping;
        self
    }

    pub fn with_item_name(mut self, name: impl Into<String>) -> Self {
        self.item_name = Some(name.into());
        self
    }
}

/// What a label says about the items in the parcel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemSummary {
    /// Total quantity across the group's line items.
    Total(u64),
    /// Quantity per category, in the order categories were first seen.
    ByCategory(IndexMap<String, u64>),
}

impl ItemSummary {
    pub fn total_quantity(&self) -> u64 {
        match self {
            ItemSummary::Total(n) => *n,
            ItemSummary::ByCategory(buckets) => buckets.values().sum(),
        }
    }
}

/// Everything printed on one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelRecord {
    /// Set when records are grouped per order; absent when orders are merged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
    pub shipping: ShippingKey,
    pub items: ItemSummary,
}
