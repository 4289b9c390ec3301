pub mod builder;
pub mod fit;
pub mod wrapper;
