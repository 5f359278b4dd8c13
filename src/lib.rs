// Booking core for the Holidaze venue storefront: availability, pricing and
// validation of reservations against a hosted booking API

pub mod api;
pub mod availability;
pub mod booking;
pub mod cache;
pub mod calendar;
pub mod config;
pub mod form;
pub mod pricing;
pub mod session;
pub mod venue;

// Re-export key types for convenience
pub use api::{
    all_venues, search_all, ApiError, BookingRecord, ClientStats, HolidazeApi, HolidazeClient,
    SortOrder, VenueQuery,
};
pub use availability::{BlockedDateSet, BoundaryPolicy, Reservation};
pub use booking::{
    BookingError, BookingPayload, BookingRequestBuilder, CandidateSelection, ValidatedBooking,
};
pub use cache::{CacheConfig, CachedApi, VenueCache};
pub use calendar::{expand_range, CalendarDay, CalendarError, DateRange};
pub use config::{ClientConfig, ConfigError};
pub use form::{BookingEvent, BookingForm};
pub use pricing::{quote, quote_days, PricingResult};
pub use session::{
    Credentials, FileStorage, MemoryStorage, Session, SessionError, SessionStorage, SessionStore,
    UserProfile,
};
pub use venue::{Envelope, PageMeta, Profile, ProfileBooking, Venue, VenueBooking};
