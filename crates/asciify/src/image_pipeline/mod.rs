pub mod adjust;
pub mod loader;
pub mod metrics;
pub mod resize;
