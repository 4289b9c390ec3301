pub mod grid;
pub mod pagination;
