pub mod api;
pub mod auth;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use api::{CoffeeFilterClient, NominatimGeocoder, PhotonAutocomplete};
pub use auth::{FileTokenStore, MemoryTokenStore};
pub use config::Settings;
pub use domain::model::{CoffeeShop, CoffeeShopUpdate, Day, DayHours, NewCoffeeShop, WeeklySchedule};
pub use utils::error::{CoffeeFilterError, Result};
