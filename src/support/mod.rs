pub mod fixtures;
pub mod metrics;
pub mod price;
pub mod security;
