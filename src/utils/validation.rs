use crate::core::hours::parse_time_to_minutes;
use crate::domain::model::{CoffeeShopUpdate, NewCoffeeShop, WeeklySchedule};
use crate::utils::error::{CoffeeFilterError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CoffeeFilterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CoffeeFilterError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CoffeeFilterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CoffeeFilterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CoffeeFilterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(CoffeeFilterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CoffeeFilterError::ValidationError {
            field: field_name.to_string(),
            message: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if !(value >= min && value <= max) {
        return Err(CoffeeFilterError::ValidationError {
            field: field_name.to_string(),
            message: format!("{} is not between {} and {}", value, min, max),
        });
    }
    Ok(())
}

/// Every listed day needs a readable opening and closing time.
pub fn validate_weekly_hours(field_name: &str, schedule: &WeeklySchedule) -> Result<()> {
    for (day, hours) in schedule.iter() {
        for (which, time) in [("open", &hours.open), ("close", &hours.close)] {
            let field = format!("{}.{}.{}", field_name, day.key(), which);
            validate_non_empty_string(&field, time)?;
            if parse_time_to_minutes(time).is_none() {
                return Err(CoffeeFilterError::ValidationError {
                    field,
                    message: format!("'{}' is not a time like 7am, 5:30pm or 17:00", time),
                });
            }
        }
    }
    Ok(())
}

fn validate_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<()> {
    if let Some(latitude) = latitude {
        validate_range("latitude", latitude, -90.0, 90.0)?;
    }
    if let Some(longitude) = longitude {
        validate_range("longitude", longitude, -180.0, 180.0)?;
    }
    Ok(())
}

impl Validate for NewCoffeeShop {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        validate_non_empty_string("address", &self.address)?;
        validate_coordinates(self.latitude, self.longitude)?;
        validate_weekly_hours("weekly_hours", &self.weekly_hours)
    }
}

impl Validate for CoffeeShopUpdate {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_non_empty_string("name", name)?;
        }
        if let Some(address) = &self.address {
            validate_non_empty_string("address", address)?;
        }
        validate_coordinates(self.latitude, self.longitude)?;
        if let Some(schedule) = &self.weekly_hours {
            validate_weekly_hours("weekly_hours", schedule)?;
        }
        Ok(())
    }
}
