use chrono::{Datelike, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Image shown for shops that have none.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// The calendar day of `date`.
    pub fn of<D: Datelike>(date: &D) -> Self {
        date.weekday().into()
    }

    /// Lowercase key used on the wire.
    pub fn key(self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            Day::Monday => "Mon",
            Day::Tuesday => "Tue",
            Day::Wednesday => "Wed",
            Day::Thursday => "Thu",
            Day::Friday => "Fri",
            Day::Saturday => "Sat",
            Day::Sunday => "Sun",
        }
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Day::Monday,
            Weekday::Tue => Day::Tuesday,
            Weekday::Wed => Day::Wednesday,
            Weekday::Thu => Day::Thursday,
            Weekday::Fri => Day::Friday,
            Weekday::Sat => Day::Saturday,
            Weekday::Sun => Day::Sunday,
        }
    }
}

impl Serialize for Day {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.key();
        write!(f, "{}{}", key[..1].to_uppercase(), &key[1..])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDay(pub String);

impl fmt::Display for UnknownDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown day of week: {}", self.0)
    }
}

impl std::error::Error for UnknownDay {}

impl FromStr for Day {
    type Err = UnknownDay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Day::ALL
            .into_iter()
            .find(|day| day.key() == key)
            .ok_or_else(|| UnknownDay(s.to_string()))
    }
}

/// Opening and closing time for one day, as entered by an admin ("7am", "17:00").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub open: String,
    pub close: String,
}

impl DayHours {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

/// Per-day hours. A day without an entry is closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySchedule {
    days: BTreeMap<Day, DayHours>,
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_day(mut self, day: Day, hours: DayHours) -> Self {
        self.days.insert(day, hours);
        self
    }

    pub fn set(&mut self, day: Day, hours: DayHours) {
        self.days.insert(day, hours);
    }

    pub fn remove(&mut self, day: Day) -> Option<DayHours> {
        self.days.remove(&day)
    }

    pub fn get(&self, day: Day) -> Option<&DayHours> {
        self.days.get(&day)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Entries in Monday..Sunday order.
    pub fn iter(&self) -> impl Iterator<Item = (Day, &DayHours)> {
        self.days.iter().map(|(day, hours)| (*day, hours))
    }
}

impl FromIterator<(Day, DayHours)> for WeeklySchedule {
    fn from_iter<I: IntoIterator<Item = (Day, DayHours)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

impl Serialize for WeeklySchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.days.iter().map(|(day, hours)| (day.key(), hours)))
    }
}

impl<'de> Deserialize<'de> for WeeklySchedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<BTreeMap<String, Option<DayHours>>> = Option::deserialize(deserializer)?;
        let mut schedule = WeeklySchedule::new();

        // Keys are visited in byte order, so for "Monday" and "monday" the lowercase one wins.
        for (key, hours) in raw.unwrap_or_default() {
            let Some(hours) = hours else { continue };
            match key.parse::<Day>() {
                Ok(day) => {
                    if schedule.get(day).is_some() {
                        tracing::debug!("Weekly hours key '{}' replaces an earlier {} entry", key, day);
                    }
                    schedule.set(day, hours);
                }
                Err(e) => tracing::debug!("Ignoring weekly hours entry: {}", e),
            }
        }

        Ok(schedule)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn placeholder_image() -> String {
    PLACEHOLDER_IMAGE.to_string()
}

fn image_or_placeholder<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let image: Option<String> = Option::deserialize(deserializer)?;
    Ok(image
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(placeholder_image))
}

/// A shop as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoffeeShop {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "placeholder_image", deserialize_with = "image_or_placeholder")]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub accessibility: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_wifi: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub machine: String,
    #[serde(default)]
    pub weekly_hours: WeeklySchedule,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pour_over: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub starred: bool,
}

/// Payload for creating a shop. Coordinates left out are geocoded by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCoffeeShop {
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default = "placeholder_image", deserialize_with = "image_or_placeholder")]
    pub image: String,
    #[serde(default)]
    pub accessibility: bool,
    #[serde(default)]
    pub has_wifi: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub machine: String,
    #[serde(default)]
    pub weekly_hours: WeeklySchedule,
    #[serde(default)]
    pub pour_over: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl NewCoffeeShop {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            latitude: None,
            longitude: None,
            image: placeholder_image(),
            accessibility: false,
            has_wifi: false,
            description: String::new(),
            machine: String::new(),
            weekly_hours: WeeklySchedule::new(),
            pour_over: false,
            website: None,
            instagram: None,
        }
    }

    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.latitude = Some(coordinates.latitude);
        self.longitude = Some(coordinates.longitude);
        self
    }
}

/// Partial update; only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoffeeShopUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_wifi: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_hours: Option<WeeklySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pour_over: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starred: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub token: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One ranked result from the address autocomplete service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressCandidate {
    pub label: String,
    pub coordinates: Coordinates,
}
