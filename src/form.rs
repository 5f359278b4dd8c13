// Booking form controller
// One form per venue view. It owns the candidate selection and the venue's
// blocked-date index, and allows at most one submission in flight.

use crate::api::{ApiError, BookingRecord, HolidazeApi};
use crate::availability::{BlockedDateSet, BoundaryPolicy};
use crate::booking::{BookingError, BookingRequestBuilder, CandidateSelection};
use crate::calendar::CalendarDay;
use crate::pricing::PricingResult;
use crate::session::Session;
use crate::venue::Venue;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;
use tracing::{info, warn};

const EVENT_CAPACITY: usize = 16;

// Published after the API acknowledges a write, so listeners can refetch
#[derive(Debug, Clone, PartialEq)]
pub enum BookingEvent {
    Created {
        venue_id: String,
        booking: BookingRecord,
    },
}

pub struct BookingForm {
    venue: RwLock<Venue>,
    blocked: RwLock<BlockedDateSet>,
    policy: BoundaryPolicy,
    selection: Mutex<CandidateSelection>,
    builder: BookingRequestBuilder,
    submitting: AtomicBool,
    completed: AtomicBool,
    events: broadcast::Sender<BookingEvent>,
}

// Clears the in-flight flag however the submission ends
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl BookingForm {
    pub fn new(venue: Venue) -> Self {
        Self::with_options(venue, BoundaryPolicy::default(), BookingRequestBuilder::new())
    }

    pub fn with_options(
        venue: Venue,
        policy: BoundaryPolicy,
        builder: BookingRequestBuilder,
    ) -> Self {
        let blocked = BlockedDateSet::with_policy(&venue.reservations(), policy);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            venue: RwLock::new(venue),
            blocked: RwLock::new(blocked),
            policy,
            selection: Mutex::new(CandidateSelection::default()),
            builder,
            submitting: AtomicBool::new(false),
            completed: AtomicBool::new(false),
            events,
        }
    }

    pub fn venue_id(&self) -> String {
        self.venue.read().id.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BookingEvent> {
        self.events.subscribe()
    }

    pub fn set_start_date(&self, start: Option<DateTime<Utc>>) {
        self.selection.lock().start_date = start;
    }

    pub fn set_end_date(&self, end: Option<DateTime<Utc>>) {
        self.selection.lock().end_date = end;
    }

    pub fn set_guests(&self, guests: u32) {
        self.selection.lock().guests = guests;
    }

    pub fn select(&self, selection: CandidateSelection) {
        *self.selection.lock() = selection;
    }

    pub fn selection(&self) -> CandidateSelection {
        self.selection.lock().clone()
    }

    pub fn pricing(&self) -> PricingResult {
        let rate = self.venue.read().price;
        self.selection.lock().pricing(rate)
    }

    pub fn is_blocked(&self, day: CalendarDay) -> bool {
        self.blocked.read().contains(day)
    }

    pub fn blocked_dates(&self) -> Vec<CalendarDay> {
        self.blocked.read().iter().collect()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    pub fn is_complete(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }

    // Replace the venue with a freshly fetched copy and rebuild the index
    pub fn refresh(&self, venue: Venue) {
        let blocked = BlockedDateSet::with_policy(&venue.reservations(), self.policy);
        *self.blocked.write() = blocked;
        *self.venue.write() = venue;
    }

    pub async fn reload<A: HolidazeApi + ?Sized>(&self, api: &A) -> Result<(), ApiError> {
        let venue = api.fetch_venue(&self.venue_id()).await?;
        self.refresh(venue);
        Ok(())
    }

    // Validate and send the current selection. A failed request is reported
    // as-is; resubmitting is up to the user.
    pub async fn submit<A: HolidazeApi + ?Sized>(
        &self,
        api: &A,
        session: &Session,
    ) -> Result<BookingRecord, BookingError> {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(BookingError::SubmissionInProgress);
        }
        let _in_flight = InFlight(&self.submitting);

        let validated = {
            let venue = self.venue.read();
            let blocked = self.blocked.read();
            let selection = self.selection.lock();
            self.builder.build(session, &venue, &blocked, &selection)?
        };
        let token = session
            .access_token()
            .ok_or(BookingError::NotAuthenticated)?;

        let payload = validated.payload;
        info!(
            venue = %payload.venue_id,
            from = %payload.date_from,
            to = %payload.date_to,
            nights = validated.pricing.nights,
            "Submitting booking"
        );

        match api.create_booking(token, &payload).await {
            Ok(booking) => {
                *self.selection.lock() = CandidateSelection::default();
                self.completed.store(true, Ordering::SeqCst);
                // No subscribers is fine
                let _ = self.events.send(BookingEvent::Created {
                    venue_id: payload.venue_id,
                    booking: booking.clone(),
                });
                Ok(booking)
            }
            Err(e) => {
                warn!(venue = %payload.venue_id, "Booking submission failed: {}", e);
                Err(e.into())
            }
        }
    }
}
