//! Order exports in CSV form.
//!
//! Header names are trimmed and matched case-sensitively. Extra columns are
//! ignored; short rows read their missing cells as empty.

use crate::{RowSource, SourceError};
use csv::{StringRecord, StringRecordsIntoIter};
use labelsheet_types::{LineItemRow, OrderId, ShippingField, ShippingFields};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column holding the order identifier.
pub const ORDER_COLUMN: &str = "Name";
pub const QUANTITY_COLUMN: &str = "Lineitem quantity";
pub const ITEM_NAME_COLUMN: &str = "Lineitem name";

/// Columns an export must have, in the order they are reported when missing.
pub fn required_columns(require_item_name: bool) -> Vec<&'static str> {
    let mut columns = vec![ORDER_COLUMN];
    columns.extend(ShippingField::ALL.iter().map(|f| f.column()));
    columns.push(QUANTITY_COLUMN);
    if require_item_name {
        columns.push(ITEM_NAME_COLUMN);
    }
    columns
}

struct ColumnIndex {
    order: usize,
    shipping: [(ShippingField, usize); 6],
    quantity: usize,
    item_name: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, require_item_name: bool) -> Result<Self, SourceError> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = required_columns(require_item_name)
            .into_iter()
            .filter(|column| position(column).is_none())
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(SourceError::Schema { missing });
        }

        let find = |name: &str| {
            position(name).ok_or_else(|| SourceError::Schema {
                missing: vec![name.to_string()],
            })
        };
        let mut shipping = [(ShippingField::Name, 0); 6];
        for (slot, field) in shipping.iter_mut().zip(ShippingField::ALL) {
            *slot = (field, find(field.column())?);
        }

        Ok(Self {
            order: find(ORDER_COLUMN)?,
            shipping,
            quantity: find(QUANTITY_COLUMN)?,
            item_name: position(ITEM_NAME_COLUMN),
        })
    }

    fn row_from_record(&self, record: &StringRecord) -> LineItemRow {
        let cell = |index: usize| record.get(index).unwrap_or("");

        let mut shipping = ShippingFields::default();
        for (field, index) in self.shipping {
            shipping.set(field, cell(index));
        }
        let item_name = self
            .item_name
            .map(cell)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        LineItemRow {
            order_id: OrderId::new(cell(self.order).trim()),
            shipping,
            quantity: cell(self.quantity).to_string(),
            item_name,
        }
    }
}

/// Reads line item rows from CSV. The header is validated when the source
/// is opened, so a schema error surfaces before any row is read.
pub struct CsvRowSource<R: Read> {
    records: StringRecordsIntoIter<R>,
    columns: ColumnIndex,
}

impl<R: Read + Send> CsvRowSource<R> {
    pub fn from_reader(reader: R, require_item_name: bool) -> Result<Self, SourceError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(reader);
        let headers = reader.headers()?.clone();
        let columns = ColumnIndex::resolve(&headers, require_item_name)?;
        log::debug!("CSV header has {} columns; schema check passed", headers.len());
        Ok(Self {
            records: reader.into_records(),
            columns,
        })
    }
}

impl CsvRowSource<File> {
    pub fn from_path(path: impl AsRef<Path>, require_item_name: bool) -> Result<Self, SourceError> {
        let path = path.as_ref();
        log::debug!("Opening order export {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(file, require_item_name)
    }
}

impl<R: Read + Send> RowSource for CsvRowSource<R> {
    fn next_row(&mut self) -> Option<Result<LineItemRow, SourceError>> {
        let record = self.records.next()?;
        Some(
            record
                .map(|r| self.columns.row_from_record(&r))
                .map_err(SourceError::from),
        )
    }
}
