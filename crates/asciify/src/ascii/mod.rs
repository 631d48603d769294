pub mod fit;
pub mod gradient;
pub mod grid;
pub mod mapping;
