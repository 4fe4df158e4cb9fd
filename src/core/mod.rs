pub mod display;
pub mod hours;
pub mod markers;

pub use crate::domain::model::{CoffeeShop, Day, DayHours, WeeklySchedule};
pub use crate::domain::ports::{ConfigProvider, Geocoder, TokenStore};
pub use crate::utils::error::Result;
