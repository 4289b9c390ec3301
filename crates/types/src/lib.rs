pub mod geometry;
pub mod ids;
pub mod record;

pub use geometry::{Rect, Size, mm};
pub use ids::OrderId;
pub use record::{
    ItemSummary, LabelRecord, LineItemRow, ShippingField, ShippingFields, ShippingKey,
    normalize_phone,
};
