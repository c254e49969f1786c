pub mod client;
pub mod error;
pub mod types;

pub use client::{resolve_address, Geocoder, GeocoderClient};
pub use error::GeocodeError;
