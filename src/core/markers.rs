use crate::core::hours::is_open_at;
use crate::domain::model::{CoffeeShop, Coordinates};
use chrono::{Datelike, Timelike};
use serde::Serialize;

/// Rough kilometres per degree, good enough for city-scale searches.
const KM_PER_DEGREE: f64 = 111.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayState {
    Open,
    Closed,
}

/// What the map needs to draw a shop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub display_state: DisplayState,
    pub starred: bool,
}

pub fn marker_for<T: Datelike + Timelike>(shop: &CoffeeShop, now: &T) -> Marker {
    let display_state = if is_open_at(&shop.weekly_hours, now) {
        DisplayState::Open
    } else {
        DisplayState::Closed
    };

    Marker {
        id: shop.id,
        latitude: shop.latitude,
        longitude: shop.longitude,
        display_state,
        starred: shop.starred,
    }
}

pub fn markers_for<T: Datelike + Timelike>(shops: &[CoffeeShop], now: &T) -> Vec<Marker> {
    shops.iter().map(|shop| marker_for(shop, now)).collect()
}

/// Planar distance in kilometres; not accurate over long distances.
pub fn approximate_distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat_diff = (a.latitude - b.latitude).abs();
    let lon_diff = (a.longitude - b.longitude).abs();
    (lat_diff.powi(2) + lon_diff.powi(2)).sqrt() * KM_PER_DEGREE
}

pub fn within_radius(shops: &[CoffeeShop], center: Coordinates, radius_km: f64) -> Vec<&CoffeeShop> {
    shops
        .iter()
        .filter(|shop| {
            let here = Coordinates {
                latitude: shop.latitude,
                longitude: shop.longitude,
            };
            approximate_distance_km(here, center) <= radius_km
        })
        .collect()
}
