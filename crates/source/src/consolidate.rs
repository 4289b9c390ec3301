use labelsheet_types::{LineItemRow, OrderId, ShippingField, ShippingFields};
use std::collections::HashMap;

/// Completes each row's shipping data from earlier rows of the same order.
///
/// An unset field takes the most recent value seen for that field in the
/// row's order. Orders need not be contiguous, and values never cross from one
/// order to another. Rows keep their input order; a field with no earlier
/// value in its order stays unset.
///
/// A row with a blank order id belongs to no order: it is passed through as
/// is and never lends its values to another row.
pub fn forward_fill<I>(rows: I) -> Vec<LineItemRow>
where
    I: IntoIterator<Item = LineItemRow>,
{
    let mut last_seen: HashMap<OrderId, ShippingFields> = HashMap::new();
    let mut filled = 0usize;

    let rows: Vec<LineItemRow> = rows
        .into_iter()
        .map(|mut row| {
            if row.order_id.is_blank() {
                log::debug!("Row without an order id left unfilled");
                return row;
            }
            let seen = last_seen.entry(row.order_id.clone()).or_default();
            for field in ShippingField::ALL {
                let current = row.shipping.slot_mut(field);
                if let Some(value) = current.as_ref() {
                    *seen.slot_mut(field) = Some(value.clone());
                } else if let Some(value) = seen.slot(field) {
                    *current = Some(value.clone());
                    filled += 1;
                }
            }
            row
        })
        .collect();

    log::debug!(
        "Consolidated {} rows across {} orders ({} fields filled)",
        rows.len(),
        last_seen.len(),
        filled
    );
    rows
}
