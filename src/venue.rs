use crate::availability::Reservation;
use crate::calendar::{CalendarDay, DateRange};
use serde::{Deserialize, Serialize};

// Data structures for the booking API's JSON resources.
// Every response body is wrapped in `{ "data": ..., "meta": ... }`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageMeta {
    pub is_first_page: bool,
    pub is_last_page: bool,
    pub current_page: Option<u32>,
    pub previous_page: Option<u32>,
    pub next_page: Option<u32>,
    pub page_count: Option<u32>,
    pub total_count: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub max_guests: Option<u32>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub bookings: Vec<VenueBooking>,
    #[serde(default)]
    pub owner: Option<VenueOwner>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueBooking {
    #[serde(default)]
    pub id: Option<String>,
    pub date_from: CalendarDay,
    pub date_to: CalendarDay,
    #[serde(default = "default_guests")]
    pub guests: u32,
}

fn default_guests() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VenueOwner {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Venue {
    // Existing bookings as reservations. The API does not promise
    // dateFrom <= dateTo, so an inverted pair is normalized rather than dropped.
    pub fn reservations(&self) -> Vec<Reservation> {
        self.bookings
            .iter()
            .map(|b| Reservation::new(DateRange::normalized(b.date_from, b.date_to), b.guests))
            .collect()
    }
}

// A user's profile with the stays they booked and, for managers, the venues
// they list
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub venue_manager: bool,
    #[serde(default)]
    pub bookings: Vec<ProfileBooking>,
    #[serde(default)]
    pub venues: Vec<Venue>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBooking {
    pub id: String,
    pub date_from: CalendarDay,
    pub date_to: CalendarDay,
    #[serde(default = "default_guests")]
    pub guests: u32,
    #[serde(default)]
    pub venue: Option<Venue>,
}

impl Profile {
    // Bookings ordered by check-in day
    pub fn upcoming_bookings(&self, today: CalendarDay) -> Vec<&ProfileBooking> {
        let mut upcoming: Vec<_> = self
            .bookings
            .iter()
            .filter(|b| b.date_from.max(b.date_to) >= today)
            .collect();
        upcoming.sort_by_key(|b| b.date_from);
        upcoming
    }
}

// Structured error body returned by the API on non-2xx responses
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub errors: Vec<ApiErrorItem>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorItem {
    pub message: String,
}

impl ApiErrorBody {
    // Joins every reported message, or falls back when the list is empty
    pub fn message(&self, fallback: &str) -> String {
        if self.errors.is_empty() {
            return fallback.to_string();
        }
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
