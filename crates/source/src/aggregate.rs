//! Grouping consolidated rows into label records.
//!
//! Two strategies share one trait. [`QuantitySum`] prints one label per order
//! and recipient with the total quantity. [`CategoryBucket`] merges every order
//! going to the same recipient and breaks the quantity down by item category.
//!
//! A row with no shipping data at all never reaches a label, whatever the
//! [`MissingShipping`] policy says; the policy only decides about partially
//! filled addresses.
//!
//! Row numbers in errors and logs are 1-based positions in the row sequence.

use crate::SourceError;
use crate::csv_source::QUANTITY_COLUMN;
use indexmap::IndexMap;
use labelsheet_types::{ItemSummary, LabelRecord, LineItemRow, OrderId, ShippingKey};
use serde::{Deserialize, Serialize};

/// Which grouping a sheet uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Aggregation {
    #[default]
    QuantitySum,
    CategoryBucket,
}

impl Aggregation {
    /// Whether rows must carry an item name.
    pub fn requires_item_name(self) -> bool {
        matches!(self, Aggregation::CategoryBucket)
    }

    pub fn default_missing_shipping(self) -> MissingShipping {
        match self {
            Aggregation::QuantitySum => MissingShipping::Keep,
            Aggregation::CategoryBucket => MissingShipping::Drop,
        }
    }

    pub fn strategy(self, missing_shipping: MissingShipping) -> Box<dyn AggregationStrategy> {
        match self {
            Aggregation::QuantitySum => Box::new(QuantitySum { missing_shipping }),
            Aggregation::CategoryBucket => Box::new(CategoryBucket { missing_shipping }),
        }
    }
}

/// What to do with a row whose shipping data is still incomplete after
/// consolidation. Rows with every field unset are always dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingShipping {
    /// Group it anyway; unset fields print as blank.
    Keep,
    /// Leave it out of every label.
    Drop,
}

impl MissingShipping {
    fn admits(self, row: &LineItemRow, row_number: usize) -> bool {
        if row.shipping.to_key().is_blank() {
            log::debug!(
                "Dropping row {} (order {}): no shipping data",
                row_number,
                row.order_id
            );
            return false;
        }
        match self {
            MissingShipping::Keep => true,
            MissingShipping::Drop if row.shipping.is_complete() => true,
            MissingShipping::Drop => {
                log::debug!(
                    "Dropping row {} (order {}): missing {:?}",
                    row_number,
                    row.order_id,
                    row.shipping.missing()
                );
                false
            }
        }
    }
}

pub trait AggregationStrategy {
    fn name(&self) -> &'static str;

    /// Builds label records in first-appearance order of their grouping key.
    fn aggregate(&self, rows: &[LineItemRow]) -> Result<Vec<LabelRecord>, SourceError>;
}

/// One label per (order, recipient) with the summed quantity.
#[derive(Debug, Clone, Copy)]
pub struct QuantitySum {
    pub missing_shipping: MissingShipping,
}

impl Default for QuantitySum {
    fn default() -> Self {
        Self {
            missing_shipping: Aggregation::QuantitySum.default_missing_shipping(),
        }
    }
}

impl AggregationStrategy for QuantitySum {
    fn name(&self) -> &'static str {
        "quantity-sum"
    }

    fn aggregate(&self, rows: &[LineItemRow]) -> Result<Vec<LabelRecord>, SourceError> {
        let mut groups: IndexMap<(OrderId, ShippingKey), u64> = IndexMap::new();

        for (index, row) in rows.iter().enumerate() {
            let row_number = index + 1;
            if row.order_id.is_blank() {
                log::debug!("Skipping row {}: no order id", row_number);
                continue;
            }
            if !self.missing_shipping.admits(row, row_number) {
                continue;
            }
            let quantity = parse_quantity(&row.quantity, row_number)?;
            let total = groups
                .entry((row.order_id.clone(), row.shipping.to_key()))
                .or_insert(0);
            *total = total.saturating_add(quantity);
        }

        log::debug!("{}: {} rows into {} labels", self.name(), rows.len(), groups.len());
        Ok(groups
            .into_iter()
            .map(|((order_id, shipping), total)| LabelRecord {
                order_id: Some(order_id),
                shipping,
                items: ItemSummary::Total(total),
            })
            .collect())
    }
}

/// One label per recipient, merged across orders, with quantities per category.
#[derive(Debug, Clone, Copy)]
pub struct CategoryBucket {
    pub missing_shipping: MissingShipping,
}

impl Default for CategoryBucket {
    fn default() -> Self {
        Self {
            missing_shipping: Aggregation::CategoryBucket.default_missing_shipping(),
        }
    }
}

impl AggregationStrategy for CategoryBucket {
    fn name(&self) -> &'static str {
        "category-bucket"
    }

    fn aggregate(&self, rows: &[LineItemRow]) -> Result<Vec<LabelRecord>, SourceError> {
        let mut groups: IndexMap<ShippingKey, IndexMap<String, u64>> = IndexMap::new();

        for (index, row) in rows.iter().enumerate() {
            let row_number = index + 1;
            let Some(category) = row.item_name.as_deref().and_then(extract_category) else {
                log::debug!(
                    "Skipping row {} (order {}): no category in item name {:?}",
                    row_number,
                    row.order_id,
                    row.item_name
                );
                continue;
            };
            if !self.missing_shipping.admits(row, row_number) {
                continue;
            }
            let quantity = parse_quantity(&row.quantity, row_number)?;
            let count = groups
                .entry(row.shipping.to_key())
                .or_default()
                .entry(category.to_string())
                .or_insert(0);
            *count = count.saturating_add(quantity);
        }

        log::debug!("{}: {} rows into {} labels", self.name(), rows.len(), groups.len());
        Ok(groups
            .into_iter()
            .map(|(shipping, buckets)| LabelRecord {
                order_id: None,
                shipping,
                items: ItemSummary::ByCategory(buckets),
            })
            .collect())
    }
}

/// The category in an item name: the text inside the last parenthesised
/// group, trimmed.
///
/// `"Tour Guide (Spanish)"` gives `Spanish`; `"Combo (A) (B)"` gives `B`. A
/// missing closing parenthesis takes the rest of the name. Names without `(`
/// or with an empty group have no category.
pub fn extract_category(item_name: &str) -> Option<&str> {
    let (_, tail) = item_name.rsplit_once('(')?;
    let inner = tail.split_once(')').map_or(tail, |(inner, _)| inner);
    let category = inner.trim();
    (!category.is_empty()).then_some(category)
}

/// Coerces a quantity cell to a non-negative integer.
///
/// Accepts integer literals and whole decimals such as `2.0`. An empty cell
/// counts as zero.
pub fn parse_quantity(raw: &str, row_number: usize) -> Result<u64, SourceError> {
    let text = raw.trim();
    if text.is_empty() {
        log::warn!("Row {} has an empty quantity; counting it as 0", row_number);
        return Ok(0);
    }
    if let Ok(n) = text.parse::<u64>() {
        return Ok(n);
    }
    if let Some((whole, fraction)) = text.split_once('.') {
        let whole_digits = !whole.is_empty() && whole.bytes().all(|b| b.is_ascii_digit());
        if whole_digits && fraction.bytes().all(|b| b == b'0') {
            if let Ok(n) = whole.parse::<u64>() {
                return Ok(n);
            }
        }
    }
    Err(SourceError::Data {
        row: row_number,
        column: QUANTITY_COLUMN.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelsheet_types::{ShippingField, ShippingFields};

    fn address(name: &str) -> ShippingFields {
        ShippingFields::default()
            .with(ShippingField::Name, name)
            .with(ShippingField::Street, "12 Elm Rd")
            .with(ShippingField::City, "Leeds")
            .with(ShippingField::Zip, "LS1")
            .with(ShippingField::Province, "WY")
            .with(ShippingField::Phone, "5550100.0")
    }

    fn row(order: &str, name: &str, qty: &str) -> LineItemRow {
        LineItemRow::new(order, qty).with_shipping(address(name))
    }

    fn item(order: &str, name: &str, qty: &str, item: &str) -> LineItemRow {
        row(order, name, qty).with_item_name(item)
    }

    #[test]
    fn test_extract_category() {
        assert_eq!(extract_category("Tour Guide (Spanish)"), Some("Spanish"));
        assert_eq!(extract_category("Generic Item"), None);
        assert_eq!(extract_category("Combo (A) (B)"), Some("B"));
        assert_eq!(extract_category("Pass ( French ) extra"), Some("French"));
        assert_eq!(extract_category("Broken (German"), Some("German"));
        assert_eq!(extract_category("Empty ()"), None);
        assert_eq!(extract_category("Blank (   )"), None);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3", 1).unwrap(), 3);
        assert_eq!(parse_quantity(" 2.0 ", 1).unwrap(), 2);
        assert_eq!(parse_quantity("", 1).unwrap(), 0);
        assert_eq!(parse_quantity("0", 1).unwrap(), 0);
    }

    #[test]
    fn test_parse_quantity_rejects_bad_values() {
        for bad in ["-1", "1.5", "two", ".0", "1e3"] {
            match parse_quantity(bad, 7) {
                Err(SourceError::Data { row, column, value }) => {
                    assert_eq!(row, 7);
                    assert_eq!(column, "Lineitem quantity");
                    assert_eq!(value, bad);
                }
                other => panic!("{:?} accepted: {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_quantity_sum_groups_per_order_and_recipient() {
        let rows = vec![
            row("#1", "Ana", "1"),
            row("#2", "Bo", "4"),
            row("#1", "Ana", "2"),
            row("#3", "Ana", "5"),
        ];
        let records = QuantitySum::default().aggregate(&rows).unwrap();
        let summary: Vec<_> = records
            .iter()
            .map(|r| {
                (
                    r.order_id.as_ref().map(|o| o.as_str().to_string()),
                    r.shipping.name.clone(),
                    r.items.total_quantity(),
                )
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                (Some("#1".to_string()), "Ana".to_string(), 3),
                (Some("#2".to_string()), "Bo".to_string(), 4),
                (Some("#3".to_string()), "Ana".to_string(), 5),
            ]
        );
        assert_eq!(records[0].shipping.phone, "5550100");
    }

    #[test]
    fn test_quantity_sum_is_order_independent() {
        let forward = vec![row("#1", "Ana", "1"), row("#1", "Ana", "2"), row("#1", "Ana", "3")];
        let mut backward = forward.clone();
        backward.reverse();
        let a = QuantitySum::default().aggregate(&forward).unwrap();
        let b = QuantitySum::default().aggregate(&backward).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0].items, ItemSummary::Total(6));
    }

    #[test]
    fn test_quantity_sum_keeps_incomplete_rows_by_default() {
        let partial = ShippingFields::default()
            .with(ShippingField::Name, "Ana")
            .with(ShippingField::City, "Leeds");
        let rows = vec![LineItemRow::new("#1", "2").with_shipping(partial)];
        let records = QuantitySum::default().aggregate(&rows).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].shipping.name, "Ana");
        assert_eq!(records[0].shipping.street, "");

        let strict = QuantitySum {
            missing_shipping: MissingShipping::Drop,
        };
        assert!(strict.aggregate(&rows).unwrap().is_empty());
    }

    #[test]
    fn test_rows_without_shipping_never_become_labels() {
        let rows = vec![
            LineItemRow::new("#1", "2").with_item_name("Guide (Spanish)"),
            item("#2", "Bo", "1", "Guide (Spanish)"),
        ];
        for policy in [MissingShipping::Keep, MissingShipping::Drop] {
            for aggregation in [Aggregation::QuantitySum, Aggregation::CategoryBucket] {
                let records = aggregation.strategy(policy).aggregate(&rows).unwrap();
                assert_eq!(records.len(), 1, "{:?} / {:?}", aggregation, policy);
                assert_eq!(records[0].shipping.name, "Bo");
            }
        }
    }

    #[test]
    fn test_quantity_sum_skips_rows_without_order_id() {
        let rows = vec![row("", "Ana", "1"), row("  ", "Bo", "2"), row("#3", "Cy", "3")];
        let records = QuantitySum::default().aggregate(&rows).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].order_id, Some(OrderId::new("#3")));
        assert_eq!(records[0].items, ItemSummary::Total(3));
    }

    #[test]
    fn test_quantity_sum_fails_fast_on_bad_quantity() {
        let rows = vec![row("#1", "Ana", "1"), row("#1", "Ana", "lots")];
        match QuantitySum::default().aggregate(&rows) {
            Err(SourceError::Data { row, value, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_category_bucket_merges_orders() {
        let rows = vec![
            item("#1", "Ana", "2", "Tour Guide (Spanish)"),
            item("#2", "Ana", "1", "Audio Pack (French)"),
            item("#2", "Ana", "3", "Tour Guide (Spanish)"),
            item("#3", "Bo", "1", "Generic Item"),
            item("#4", "Bo", "1", "Map (German)"),
        ];
        let records = CategoryBucket::default().aggregate(&rows).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].order_id, None);
        assert_eq!(records[0].shipping.name, "Ana");
        match &records[0].items {
            ItemSummary::ByCategory(buckets) => {
                let entries: Vec<_> = buckets.iter().map(|(k, v)| (k.as_str(), *v)).collect();
                assert_eq!(entries, vec![("Spanish", 5), ("French", 1)]);
            }
            other => panic!("unexpected summary: {:?}", other),
        }
        assert_eq!(records[1].items.total_quantity(), 1);
    }

    #[test]
    fn test_category_bucket_never_coerces_excluded_rows() {
        let rows = vec![
            item("#1", "Ana", "junk", "Generic Item"),
            LineItemRow::new("#2", "junk").with_item_name("Guide (Italian)"),
            item("#3", "Ana", "1", "Guide (Italian)"),
        ];
        let records = CategoryBucket::default().aggregate(&rows).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].items.total_quantity(), 1);
    }

    #[test]
    fn test_category_bucket_without_categories_is_empty() {
        let rows = vec![item("#1", "Ana", "1", "Plain")];
        assert!(CategoryBucket::default().aggregate(&rows).unwrap().is_empty());
    }

    #[test]
    fn test_aggregation_selection() {
        assert!(Aggregation::CategoryBucket.requires_item_name());
        assert!(!Aggregation::QuantitySum.requires_item_name());
        assert_eq!(
            Aggregation::QuantitySum.default_missing_shipping(),
            MissingShipping::Keep
        );
        let strategy = Aggregation::CategoryBucket.strategy(MissingShipping::Drop);
        assert_eq!(strategy.name(), "category-bucket");
    }

    #[test]
    fn test_aggregation_serde_names() {
        let parsed: Aggregation = serde_json::from_str("\"category-bucket\"").unwrap();
        assert_eq!(parsed, Aggregation::CategoryBucket);
        let keep: MissingShipping = serde_json::from_str("\"keep\"").unwrap();
        assert_eq!(keep, MissingShipping::Keep);
    }
}
