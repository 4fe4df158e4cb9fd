use crate::core::hours::{is_open_at, today_hours_at};
use crate::domain::model::{CoffeeShop, Day, WeeklySchedule};
use chrono::{Datelike, Timelike};
use serde::Serialize;

pub fn status_label<T: Datelike + Timelike>(schedule: &WeeklySchedule, now: &T) -> &'static str {
    if is_open_at(schedule, now) {
        "Open"
    } else {
        "Closed"
    }
}

/// One row of the hours table on a detail panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayRow {
    pub day: Day,
    pub label: &'static str,
    pub hours: String,
    pub is_today: bool,
}

/// All seven days, Monday first, with hours as they were entered.
pub fn weekly_listing<D: Datelike>(schedule: &WeeklySchedule, now: &D) -> Vec<DayRow> {
    let today = Day::of(now);
    Day::ALL
        .into_iter()
        .map(|day| DayRow {
            day,
            label: day.short_label(),
            hours: schedule
                .get(day)
                .map_or_else(|| "Closed".to_string(), |h| format!("{} - {}", h.open, h.close)),
            is_today: day == today,
        })
        .collect()
}

/// What a list card shows for a shop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopSummary {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub is_open: bool,
    pub today: String,
    pub starred: bool,
}

impl ShopSummary {
    pub fn new<T: Datelike + Timelike>(shop: &CoffeeShop, now: &T, closed_label: &str) -> Self {
        Self {
            id: shop.id,
            name: shop.name.clone(),
            address: shop.address.clone(),
            is_open: is_open_at(&shop.weekly_hours, now),
            today: today_hours_at(&shop.weekly_hours, now, closed_label),
            starred: shop.starred,
        }
    }
}

pub fn ensure_https(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}
