pub mod dimension;
pub mod font;
pub mod text;

pub use dimension::PageSize;
pub use font::FontWeight;
pub use text::{RichText, TextSpan};
