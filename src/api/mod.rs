pub mod client;
pub mod geocoding;

pub use client::CoffeeFilterClient;
pub use geocoding::{NominatimGeocoder, PhotonAutocomplete};
