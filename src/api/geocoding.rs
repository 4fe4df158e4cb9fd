//! Address lookup for the shop forms: Nominatim for geocoding an address,
//! Photon for autocomplete suggestions.

use crate::core::Geocoder;
use crate::domain::model::{AddressCandidate, Coordinates};
use crate::utils::error::{CoffeeFilterError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_PHOTON_URL: &str = "https://photon.komoot.io";
pub const USER_AGENT: &str = "CoffeeFilter/1.0";

/// Queries shorter than this are not sent to the autocomplete service.
pub const MIN_QUERY_LEN: usize = 3;
const SUGGESTION_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
}

impl NominatimGeocoder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        Self::new(DEFAULT_NOMINATIM_URL)
    }
}

fn parse_coordinate(field: &str, value: &str) -> Result<f64> {
    value.trim().parse::<f64>().map_err(|e| CoffeeFilterError::GeocodingError {
        message: format!("invalid {} '{}': {}", field, value, e),
    })
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>> {
        let url = format!("{}/search", self.endpoint);
        tracing::debug!("Geocoding '{}' via {}", address, url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!("Geocoding failed with status {}", response.status());
            return Ok(None);
        }

        let places: Vec<NominatimPlace> = response.json().await?;
        let Some(place) = places.first() else {
            tracing::debug!("No geocoding result for '{}'", address);
            return Ok(None);
        };

        Ok(Some(Coordinates {
            latitude: parse_coordinate("lat", &place.lat)?,
            longitude: parse_coordinate("lon", &place.lon)?,
        }))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PhotonProperties {
    pub name: Option<String>,
    pub street: Option<String>,
    pub housenumber: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PhotonGeometry {
    /// GeoJSON order: longitude, latitude.
    coordinates: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct PhotonFeature {
    #[serde(default)]
    properties: PhotonProperties,
    geometry: PhotonGeometry,
}

#[derive(Debug, Deserialize)]
struct PhotonResponse {
    #[serde(default)]
    features: Vec<PhotonFeature>,
}

/// "12 Main St, Springfield, IL, 62701"
pub fn format_address(p: &PhotonProperties) -> String {
    let mut parts: Vec<String> = Vec::new();

    match (&p.housenumber, &p.street, &p.name) {
        (Some(number), Some(street), _) => parts.push(format!("{} {}", number, street)),
        (_, Some(street), _) => parts.push(street.clone()),
        (_, None, Some(name)) => parts.push(name.clone()),
        _ => {}
    }

    parts.extend([&p.city, &p.state, &p.postcode].into_iter().flatten().cloned());
    parts.join(", ")
}

pub struct PhotonAutocomplete {
    client: Client,
    endpoint: String,
}

impl PhotonAutocomplete {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    /// Ranked address candidates for a partial address.
    pub async fn suggest(&self, query: &str) -> Result<Vec<AddressCandidate>> {
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }

        let url = format!("{}/api/", self.endpoint);
        tracing::debug!("Fetching address suggestions for '{}'", query);

        let limit = SUGGESTION_LIMIT.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("limit", limit.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CoffeeFilterError::GeocodingError {
                message: format!("autocomplete returned {}", response.status()),
            });
        }

        let body: PhotonResponse = response.json().await?;
        Ok(body
            .features
            .into_iter()
            .map(|feature| {
                let [longitude, latitude] = feature.geometry.coordinates;
                AddressCandidate {
                    label: format_address(&feature.properties),
                    coordinates: Coordinates {
                        latitude,
                        longitude,
                    },
                }
            })
            .collect())
    }
}

impl Default for PhotonAutocomplete {
    fn default() -> Self {
        Self::new(DEFAULT_PHOTON_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_prefers_street_number() {
        let props = PhotonProperties {
            name: Some("Messenger Coffee".into()),
            street: Some("McGee St".into()),
            housenumber: Some("1624".into()),
            city: Some("Kansas City".into()),
            state: Some("Missouri".into()),
            postcode: Some("64108".into()),
            country: Some("United States".into()),
        };
        assert_eq!(format_address(&props), "1624 McGee St, Kansas City, Missouri, 64108");
    }

    #[test]
    fn address_falls_back_to_street_then_name() {
        let street_only = PhotonProperties {
            street: Some("Main St".into()),
            city: Some("Lawrence".into()),
            ..Default::default()
        };
        assert_eq!(format_address(&street_only), "Main St, Lawrence");

        let named = PhotonProperties {
            name: Some("Union Station".into()),
            housenumber: Some("30".into()),
            ..Default::default()
        };
        assert_eq!(format_address(&named), "Union Station");
        assert_eq!(format_address(&PhotonProperties::default()), "");
    }

    #[tokio::test]
    async fn short_queries_skip_the_request() {
        // Unroutable endpoint: any request would fail.
        let autocomplete = PhotonAutocomplete::new("http://127.0.0.1:9");
        assert!(autocomplete.suggest("ab").await.unwrap().is_empty());
    }
}
