//! The text printed on each label.

use itertools::Itertools;
use labelsheet_style::RichText;
use labelsheet_types::{ItemSummary, LabelRecord};

/// Builds the rich text for one label: the recipient block followed by an
/// item line.
///
/// ```text
/// DELIVERY TO:
/// <name>
/// <street>
/// <city>, <province> '<zip>'
/// <phone>
/// Total Quantity: <n>          (or)  Items: <category>: <n>, ...
/// ```
///
/// The headings are bold. Blank fields keep their line so every label has
/// the same shape.
pub fn compose_label(record: &LabelRecord) -> RichText {
    let shipping = &record.shipping;
    let text = RichText::new()
        .bold("DELIVERY TO:")
        .line_break()
        .line(shipping.name.as_str())
        .line(shipping.street.as_str())
        .line(format!(
            "{}, {} '{}'",
            shipping.city, shipping.province, shipping.zip
        ))
        .line(shipping.phone.as_str());

    match &record.items {
        ItemSummary::Total(total) => text.bold("Total Quantity:").text(format!(" {}", total)),
        ItemSummary::ByCategory(buckets) => text.bold("Items:").text(format!(
            " {}",
            buckets
                .iter()
                .map(|(category, count)| format!("{}: {}", category, count))
                .join(", ")
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use labelsheet_style::{FontWeight, TextSpan};
    use labelsheet_types::ShippingKey;

    fn shipping() -> ShippingKey {
        ShippingKey {
            name: "Ana Lopez".into(),
            street: "Rua Augusta 10".into(),
            city: "Lisboa".into(),
            zip: "1100-053".into(),
            province: "LX".into(),
            phone: "5551234567".into(),
        }
    }

    #[test]
    fn test_total_quantity_label() {
        let record = LabelRecord {
            order_id: Some("#1001".into()),
            shipping: shipping(),
            items: ItemSummary::Total(3),
        };
        let text = compose_label(&record);
        assert_eq!(
            text.plain_text(),
            "DELIVERY TO:\nAna Lopez\nRua Augusta 10\nLisboa, LX '1100-053'\n5551234567\nTotal Quantity: 3"
        );
        let bold: Vec<_> = text
            .spans()
            .iter()
            .filter_map(|span| match span {
                TextSpan::Text {
                    text,
                    weight: FontWeight::Bold,
                } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(bold, vec!["DELIVERY TO:", "Total Quantity:"]);
    }

    #[test]
    fn test_category_label() {
        let mut buckets = IndexMap::new();
        buckets.insert("Spanish".to_string(), 5);
        buckets.insert("French".to_string(), 1);
        let record = LabelRecord {
            order_id: None,
            shipping: shipping(),
            items: ItemSummary::ByCategory(buckets),
        };
        let text = compose_label(&record).plain_text();
        assert!(text.ends_with("\nItems: Spanish: 5, French: 1"));
    }

    #[test]
    fn test_blank_fields_keep_their_lines() {
        let record = LabelRecord {
            order_id: None,
            shipping: ShippingKey::default(),
            items: ItemSummary::Total(0),
        };
        let text = compose_label(&record).plain_text();
        assert_eq!(text, "DELIVERY TO:\n\n\n,  ''\n\nTotal Quantity: 0");
    }
}
