// Booking request validation
// Checks run in a fixed order and stop at the first failure, so an anonymous
// caller is turned away before any date arithmetic happens.

use crate::api::ApiError;
use crate::availability::BlockedDateSet;
use crate::calendar::{CalendarDay, DateRange};
use crate::pricing::{self, PricingResult};
use crate::session::Session;
use crate::venue::Venue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    #[error("Please log in as a traveller to book the venue.")]
    NotAuthenticated,

    #[error("Venue managers cannot book venues. Please log in as a traveller.")]
    WrongRole,

    #[error("Please select both start and end dates.")]
    MissingDates,

    #[error("The stay must be at least one night.")]
    InvalidRange,

    #[error("The venue is already booked on {day}.")]
    DateConflict { day: CalendarDay },

    #[error("{}", guest_limit_message(.guests, .max_guests))]
    InvalidGuests {
        guests: u32,
        max_guests: Option<u32>,
    },

    #[error("Bookings cannot start in the past ({day}).")]
    PastDate { day: CalendarDay },

    #[error("A booking is already being submitted.")]
    SubmissionInProgress,

    #[error("{0}")]
    SubmissionFailed(String),
}

fn guest_limit_message(guests: &u32, max_guests: &Option<u32>) -> String {
    match max_guests {
        Some(max) => format!("This venue takes between 1 and {} guests, not {}.", max, guests),
        None => format!("A booking needs at least one guest, not {}.", guests),
    }
}

impl From<ApiError> for BookingError {
    fn from(e: ApiError) -> Self {
        BookingError::SubmissionFailed(e.to_string())
    }
}

// The in-progress, unsubmitted choice in a booking form
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSelection {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub guests: u32,
}

impl Default for CandidateSelection {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            guests: 1,
        }
    }
}

impl CandidateSelection {
    pub fn new(start: CalendarDay, end: CalendarDay, guests: u32) -> Self {
        Self {
            start_date: Some(start.start_of_day()),
            end_date: Some(end.start_of_day()),
            guests,
        }
    }

    pub fn pricing(&self, rate: f64) -> PricingResult {
        pricing::quote(self.start_date, self.end_date, rate)
    }
}

// Request body for creating a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub venue_id: String,
    pub date_from: CalendarDay,
    pub date_to: CalendarDay,
    pub guests: u32,
}

impl BookingPayload {
    pub fn new(venue_id: impl Into<String>, range: DateRange, guests: u32) -> Self {
        Self {
            venue_id: venue_id.into(),
            date_from: range.from(),
            date_to: range.to(),
            guests,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBooking {
    pub payload: BookingPayload,
    pub pricing: PricingResult,
}

#[derive(Debug, Clone, Default)]
pub struct BookingRequestBuilder {
    earliest_day: Option<CalendarDay>,
}

impl BookingRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // Reject stays that start before `day`. Usually today's date.
    pub fn not_before(mut self, day: CalendarDay) -> Self {
        self.earliest_day = Some(day);
        self
    }

    pub fn build(
        &self,
        session: &Session,
        venue: &Venue,
        blocked: &BlockedDateSet,
        selection: &CandidateSelection,
    ) -> Result<ValidatedBooking, BookingError> {
        if !session.is_authenticated() {
            return Err(BookingError::NotAuthenticated);
        }
        if session.is_venue_manager() {
            return Err(BookingError::WrongRole);
        }

        let (Some(start), Some(end)) = (selection.start_date, selection.end_date) else {
            return Err(BookingError::MissingDates);
        };

        let pricing = selection.pricing(venue.price);
        if pricing.nights < 1 {
            return Err(BookingError::InvalidRange);
        }
        // A partial-day selection can price one night while both ends fall
        // on the same calendar day
        let from = CalendarDay::from(start);
        let range = DateRange::new(from, CalendarDay::from(end))
            .map_err(|_| BookingError::InvalidRange)?;

        if let Some(day) = blocked.first_conflict(range) {
            debug!(venue = %venue.id, %day, "Candidate stay overlaps an existing booking");
            return Err(BookingError::DateConflict { day });
        }

        let over_limit = venue.max_guests.is_some_and(|max| selection.guests > max);
        if selection.guests < 1 || over_limit {
            return Err(BookingError::InvalidGuests {
                guests: selection.guests,
                max_guests: venue.max_guests,
            });
        }

        if let Some(earliest) = self.earliest_day {
            if from < earliest {
                return Err(BookingError::PastDate { day: from });
            }
        }

        Ok(ValidatedBooking {
            payload: BookingPayload::new(venue.id.clone(), range, selection.guests),
            pricing,
        })
    }
}
