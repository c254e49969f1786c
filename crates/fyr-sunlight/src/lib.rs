pub mod client;
pub mod error;
pub mod types;

pub use client::{LegislatorSource, SunlightClient};
pub use error::SunlightError;
pub use types::{extract_results, ResultSet};
