// REST client for the hosted booking API
// Every call is a single attempt; failures are returned to the caller, who
// decides whether to resubmit.

use crate::booking::BookingPayload;
use crate::calendar::CalendarDay;
use crate::config::ClientConfig;
use crate::session::{Credentials, UserProfile};
use crate::venue::{ApiErrorBody, Envelope, Profile, Venue};
use async_trait::async_trait;
use futures::stream::{self, Stream, TryStreamExt};
use std::future::Future;
use parking_lot::Mutex;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

pub const API_KEY_HEADER: &str = "X-Noroff-API-Key";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Client error: {0}")]
    Client(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// Booking as echoed back by the API after creation
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: String,
    pub date_from: CalendarDay,
    pub date_to: CalendarDay,
    pub guests: u32,
}

#[derive(Debug, Default, Clone)]
pub struct ClientStats {
    pub requests_sent: usize,
    pub requests_succeeded: usize,
    pub requests_failed: usize,
    pub requests_timeout: usize,
    pub average_response_time_ms: f64,
    pub max_response_time_ms: f64,
}

impl ClientStats {
    fn record(&mut self, elapsed_ms: f64, outcome: &Result<(), ApiError>) {
        self.requests_sent += 1;
        match outcome {
            Ok(()) => self.requests_succeeded += 1,
            Err(ApiError::Timeout(_)) => {
                self.requests_failed += 1;
                self.requests_timeout += 1;
            }
            Err(_) => self.requests_failed += 1,
        }
        let n = self.requests_sent as f64;
        self.average_response_time_ms += (elapsed_ms - self.average_response_time_ms) / n;
        self.max_response_time_ms = self.max_response_time_ms.max(elapsed_ms);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

// Free-text search and ordering of the venue listing. An empty query lists
// every venue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueQuery {
    pub text: Option<String>,
    pub sort: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl VenueQuery {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some(field.into());
        self.sort_order = Some(order);
        self
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    fn path(&self) -> &'static str {
        if self.text().is_some() {
            "/holidaze/venues/search"
        } else {
            "/holidaze/venues"
        }
    }

    fn params(&self, page: u32, limit: u32) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(text) = self.text() {
            params.push(("q", text.to_string()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort", sort.clone()));
        }
        if let Some(order) = self.sort_order {
            params.push(("sortOrder", order.as_str().to_string()));
        }
        params.push(("_owner", "true".to_string()));
        params.push(("limit", limit.to_string()));
        params.push(("page", page.to_string()));
        params
    }
}

#[async_trait]
pub trait HolidazeApi: Send + Sync {
    // Exchange credentials for a profile carrying an access token
    async fn login(&self, credentials: &Credentials) -> Result<UserProfile, ApiError>;

    // Profile with the bookings it made and the venues it manages
    async fn fetch_profile(&self, access_token: &str, name: &str) -> Result<Profile, ApiError>;

    // Venues listed by a manager, each with its bookings
    async fn manager_venues(
        &self,
        access_token: &str,
        name: &str,
    ) -> Result<Vec<Venue>, ApiError>;

    // Venue with its owner and existing bookings
    async fn fetch_venue(&self, venue_id: &str) -> Result<Venue, ApiError>;

    // One page of the venue listing, 1-based
    async fn list_venues(&self, page: u32, limit: u32) -> Result<Envelope<Vec<Venue>>, ApiError>;

    async fn search_venues(
        &self,
        query: &VenueQuery,
        page: u32,
        limit: u32,
    ) -> Result<Envelope<Vec<Venue>>, ApiError>;

    async fn create_booking(
        &self,
        access_token: &str,
        payload: &BookingPayload,
    ) -> Result<BookingRecord, ApiError>;

    async fn delete_booking(&self, access_token: &str, booking_id: &str) -> Result<(), ApiError>;

    fn stats(&self) -> ClientStats;
}

pub struct HolidazeClient {
    config: ClientConfig,
    http: reqwest::Client,
    stats: Mutex<ClientStats>,
}

impl HolidazeClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;
        Ok(Self::with_http(config, http))
    }

    // Use a preconfigured HTTP client, e.g. one with custom proxy settings
    pub fn with_http(config: ClientConfig, http: reqwest::Client) -> Self {
        Self {
            config,
            http,
            stats: Mutex::new(ClientStats::default()),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder, access_token: Option<&str>) -> RequestBuilder {
        let request = request.header(API_KEY_HEADER, &self.config.api_key);
        match access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let started = Instant::now();
        let result = request.send().await.map_err(|e| self.transport_error(e));
        let outcome = match &result {
            Ok(response) if response.status().is_success() => Ok(()),
            Ok(response) => Err(ApiError::Rejected {
                status: response.status().as_u16(),
                message: String::new(),
            }),
            Err(e) => Err(e.clone()),
        };
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        self.stats.lock().record(elapsed_ms, &outcome);
        result
    }

    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            warn!("Request timed out after {}ms", self.config.timeout_ms);
            ApiError::Timeout(self.config.timeout_ms)
        } else {
            warn!("Request failed: {}", e);
            ApiError::Network(e.to_string())
        }
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        response: Response,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        if !status.is_success() {
            return Err(rejection(status, &body, fallback));
        }
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

// Message from the structured error list, or the call's fallback
fn rejection(status: StatusCode, body: &[u8], fallback: &str) -> ApiError {
    let message = serde_json::from_slice::<ApiErrorBody>(body)
        .map(|b| b.message(fallback))
        .unwrap_or_else(|_| fallback.to_string());
    debug!("API rejected request with {}: {}", status, message);
    ApiError::Rejected {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl HolidazeApi for HolidazeClient {
    async fn login(&self, credentials: &Credentials) -> Result<UserProfile, ApiError> {
        let request = self.authorized(
            self.http
                .post(self.url("/auth/login"))
                .query(&[("_holidaze", "true")])
                .json(credentials),
            None,
        );
        let response = self.send(request).await?;
        let envelope: Envelope<UserProfile> = self.decode(response, "Login failed.").await?;
        Ok(envelope.data)
    }

    async fn fetch_profile(&self, access_token: &str, name: &str) -> Result<Profile, ApiError> {
        let request = self.authorized(
            self.http
                .get(self.url(&format!("/holidaze/profiles/{}", name)))
                .query(&[("_bookings", "true"), ("_venues", "true")]),
            Some(access_token),
        );
        let response = self.send(request).await?;
        let envelope: Envelope<Profile> = self.decode(response, "Error fetching profile").await?;
        Ok(envelope.data)
    }

    async fn manager_venues(
        &self,
        access_token: &str,
        name: &str,
    ) -> Result<Vec<Venue>, ApiError> {
        let request = self.authorized(
            self.http
                .get(self.url(&format!("/holidaze/profiles/{}/venues", name)))
                .query(&[("_bookings", "true")]),
            Some(access_token),
        );
        let response = self.send(request).await?;
        let envelope: Envelope<Vec<Venue>> = self
            .decode(response, "Error fetching manager venues")
            .await?;
        Ok(envelope.data)
    }

    async fn fetch_venue(&self, venue_id: &str) -> Result<Venue, ApiError> {
        let request = self
            .http
            .get(self.url(&format!("/holidaze/venues/{}", venue_id)))
            .query(&[("_owner", "true"), ("_bookings", "true")]);
        let response = self.send(request).await?;
        let envelope: Envelope<Venue> = self.decode(response, "Failed to fetch venue data.").await?;
        Ok(envelope.data)
    }

    async fn list_venues(&self, page: u32, limit: u32) -> Result<Envelope<Vec<Venue>>, ApiError> {
        self.search_venues(&VenueQuery::default(), page, limit).await
    }

    async fn search_venues(
        &self,
        query: &VenueQuery,
        page: u32,
        limit: u32,
    ) -> Result<Envelope<Vec<Venue>>, ApiError> {
        let request = self
            .http
            .get(self.url(query.path()))
            .query(&query.params(page, limit));
        let response = self.send(request).await?;
        let fallback = format!("Server Error (Status: {})", response.status().as_u16());
        self.decode(response, &fallback).await
    }

    async fn create_booking(
        &self,
        access_token: &str,
        payload: &BookingPayload,
    ) -> Result<BookingRecord, ApiError> {
        let request = self.authorized(
            self.http.post(self.url("/holidaze/bookings")).json(payload),
            Some(access_token),
        );
        let response = self.send(request).await?;
        let envelope: Envelope<BookingRecord> = self.decode(response, "Booking failed").await?;
        Ok(envelope.data)
    }

    async fn delete_booking(&self, access_token: &str, booking_id: &str) -> Result<(), ApiError> {
        let request = self.authorized(
            self.http
                .delete(self.url(&format!("/holidaze/bookings/{}", booking_id))),
            Some(access_token),
        );
        let response = self.send(request).await?;
        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(());
        }
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        Err(rejection(status, &body, "Delete booking failed"))
    }

    fn stats(&self) -> ClientStats {
        self.stats.lock().clone()
    }
}

// Every venue across all pages, fetched lazily one page at a time until the
// API reports the last page.
pub fn all_venues<'a, A>(api: &'a A, limit: u32) -> impl Stream<Item = Result<Venue, ApiError>> + 'a
where
    A: HolidazeApi + ?Sized,
{
    paginate(move |page| api.list_venues(page, limit))
}

// Every venue matching `query`, page by page
pub fn search_all<'a, A>(
    api: &'a A,
    query: &'a VenueQuery,
    limit: u32,
) -> impl Stream<Item = Result<Venue, ApiError>> + 'a
where
    A: HolidazeApi + ?Sized,
{
    paginate(move |page| api.search_venues(query, page, limit))
}

fn paginate<'a, F, Fut>(mut fetch_page: F) -> impl Stream<Item = Result<Venue, ApiError>> + 'a
where
    F: FnMut(u32) -> Fut + 'a,
    Fut: Future<Output = Result<Envelope<Vec<Venue>>, ApiError>> + 'a,
{
    stream::try_unfold(Some(1u32), move |page| {
        let request = page.map(|page| (page, fetch_page(page)));
        async move {
            let Some((page, request)) = request else {
                return Ok::<_, ApiError>(None);
            };
            let envelope = request.await?;
            debug!(
                "Fetched venue page {} ({} venues)",
                page,
                envelope.data.len()
            );
            // The API names the next page; counting on is the fallback
            let next = if envelope.meta.is_last_page || envelope.data.is_empty() {
                None
            } else {
                Some(envelope.meta.next_page.unwrap_or(page + 1))
            };
            let venues = stream::iter(envelope.data.into_iter().map(Ok::<Venue, ApiError>));
            Ok(Some((venues, next)))
        }
    })
    .try_flatten()
}

// In-memory stand-in for the booking API
#[cfg(test)]
pub mod mock_api {
    use super::*;
    use crate::calendar::DateRange;
    use crate::venue::{PageMeta, ProfileBooking, VenueBooking, VenueOwner};
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Mutex as AsyncMutex;

    pub fn venue(id: &str, bookings: &[(&str, &str)]) -> Venue {
        Venue {
            id: id.to_string(),
            name: format!("Venue {}", id),
            description: None,
            price: 100.0,
            max_guests: Some(4),
            rating: None,
            bookings: bookings
                .iter()
                .enumerate()
                .map(|(i, (from, to))| VenueBooking {
                    id: Some(format!("{}-b{}", id, i)),
                    date_from: from.parse().unwrap(),
                    date_to: to.parse().unwrap(),
                    guests: 1,
                })
                .collect(),
            owner: None,
        }
    }

    pub fn owned_by(mut venue: Venue, owner: &str) -> Venue {
        venue.owner = Some(VenueOwner {
            name: owner.to_string(),
            email: None,
        });
        venue
    }

    fn unauthorized() -> ApiError {
        ApiError::Rejected {
            status: 401,
            message: "Missing authorization header".to_string(),
        }
    }

    fn no_profile() -> ApiError {
        ApiError::Rejected {
            status: 404,
            message: "No profile with this name".to_string(),
        }
    }

    fn page_of(venues: Vec<Venue>, page: u32, limit: u32) -> Envelope<Vec<Venue>> {
        let total = venues.len() as u32;
        let page_count = total.div_ceil(limit).max(1);
        let data = venues
            .into_iter()
            .skip(((page - 1) * limit) as usize)
            .take(limit as usize)
            .collect();
        Envelope {
            data,
            meta: PageMeta {
                is_first_page: page == 1,
                is_last_page: page >= page_count,
                current_page: Some(page),
                previous_page: (page > 1).then(|| page - 1),
                next_page: (page < page_count).then(|| page + 1),
                page_count: Some(page_count),
                total_count: Some(total),
            },
        }
    }

    struct Account {
        profile: UserProfile,
        password: String,
    }

    pub struct MockApi {
        venues: AsyncMutex<BTreeMap<String, Venue>>,
        // Keyed by email
        accounts: AsyncMutex<BTreeMap<String, Account>>,
        // Booking id to the name of the user who made it
        booked_by: AsyncMutex<BTreeMap<String, String>>,
        fail_next_requests: AtomicUsize,
        delay_ms: AtomicUsize,
        pub fetch_count: AtomicUsize,
        pub booking_count: AtomicUsize,
        stats: Mutex<ClientStats>,
    }

    impl MockApi {
        pub fn new() -> Self {
            Self {
                venues: AsyncMutex::new(BTreeMap::new()),
                accounts: AsyncMutex::new(BTreeMap::new()),
                booked_by: AsyncMutex::new(BTreeMap::new()),
                fail_next_requests: AtomicUsize::new(0),
                delay_ms: AtomicUsize::new(0),
                fetch_count: AtomicUsize::new(0),
                booking_count: AtomicUsize::new(0),
                stats: Mutex::new(ClientStats::default()),
            }
        }

        pub fn with_venue(venue: Venue) -> Self {
            let api = Self::new();
            api.venues.try_lock().unwrap().insert(venue.id.clone(), venue);
            api
        }

        pub async fn add_venue(&self, venue: Venue) {
            self.venues.lock().await.insert(venue.id.clone(), venue);
        }

        pub async fn add_user(&self, profile: UserProfile, password: &str) {
            let account = Account {
                profile,
                password: password.to_string(),
            };
            self.accounts
                .lock()
                .await
                .insert(account.profile.email.to_lowercase(), account);
        }

        async fn user_for_token(&self, access_token: &str) -> Option<UserProfile> {
            self.accounts
                .lock()
                .await
                .values()
                .find(|a| a.profile.access_token == access_token)
                .map(|a| a.profile.clone())
        }

        async fn user_named(&self, name: &str) -> Option<UserProfile> {
            self.accounts
                .lock()
                .await
                .values()
                .find(|a| a.profile.name == name)
                .map(|a| a.profile.clone())
        }

        async fn venues_owned_by(&self, name: &str) -> Vec<Venue> {
            self.venues
                .lock()
                .await
                .values()
                .filter(|v| v.owner.as_ref().is_some_and(|o| o.name == name))
                .cloned()
                .collect()
        }

        pub fn set_delay(&self, delay_ms: usize) {
            self.delay_ms.store(delay_ms, Ordering::SeqCst);
        }

        pub fn fail_next_requests(&self, count: usize) {
            self.fail_next_requests.store(count, Ordering::SeqCst);
        }

        async fn simulate(&self) -> Result<(), ApiError> {
            let delay = self.delay_ms.load(Ordering::SeqCst);
            if delay > 0 {
                tokio::time::sleep(Duration::from_millis(delay as u64)).await;
            }
            let failing = self
                .fail_next_requests
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            let outcome = if failing {
                Err(ApiError::Rejected {
                    status: 500,
                    message: "Internal Server Error".to_string(),
                })
            } else {
                Ok(())
            };
            self.stats.lock().record(delay as f64, &outcome);
            outcome
        }
    }

    #[async_trait]
    impl HolidazeApi for MockApi {
        async fn login(&self, credentials: &Credentials) -> Result<UserProfile, ApiError> {
            self.simulate().await?;
            let accounts = self.accounts.lock().await;
            accounts
                .get(&credentials.email.trim().to_lowercase())
                .filter(|a| a.password == credentials.password)
                .map(|a| a.profile.clone())
                .ok_or_else(|| ApiError::Rejected {
                    status: 401,
                    message: "Invalid email or password".to_string(),
                })
        }

        async fn fetch_profile(&self, access_token: &str, name: &str) -> Result<Profile, ApiError> {
            self.simulate().await?;
            if access_token.is_empty() {
                return Err(unauthorized());
            }
            let user = self.user_named(name).await.ok_or_else(no_profile)?;

            let booked_by = self.booked_by.lock().await;
            let mut bookings = Vec::new();
            for venue in self.venues.lock().await.values() {
                for booking in &venue.bookings {
                    let Some(id) = &booking.id else { continue };
                    if booked_by.get(id).map(String::as_str) != Some(name) {
                        continue;
                    }
                    bookings.push(ProfileBooking {
                        id: id.clone(),
                        date_from: booking.date_from,
                        date_to: booking.date_to,
                        guests: booking.guests,
                        venue: Some(venue.clone()),
                    });
                }
            }
            drop(booked_by);

            Ok(Profile {
                name: user.name,
                email: Some(user.email),
                venue_manager: user.venue_manager,
                bookings,
                venues: self.venues_owned_by(name).await,
            })
        }

        async fn manager_venues(
            &self,
            access_token: &str,
            name: &str,
        ) -> Result<Vec<Venue>, ApiError> {
            self.simulate().await?;
            if access_token.is_empty() {
                return Err(unauthorized());
            }
            self.user_named(name).await.ok_or_else(no_profile)?;
            Ok(self.venues_owned_by(name).await)
        }

        async fn fetch_venue(&self, venue_id: &str) -> Result<Venue, ApiError> {
            self.simulate().await?;
            self.fetch_count.fetch_add(1, Ordering::SeqCst);
            self.venues
                .lock()
                .await
                .get(venue_id)
                .cloned()
                .ok_or_else(|| ApiError::Rejected {
                    status: 404,
                    message: "No venue with such ID".to_string(),
                })
        }

        async fn list_venues(
            &self,
            page: u32,
            limit: u32,
        ) -> Result<Envelope<Vec<Venue>>, ApiError> {
            self.simulate().await?;
            let venues = self.venues.lock().await.values().cloned().collect();
            Ok(page_of(venues, page, limit))
        }

        // Matches name or description; sorts by name or price
        async fn search_venues(
            &self,
            query: &VenueQuery,
            page: u32,
            limit: u32,
        ) -> Result<Envelope<Vec<Venue>>, ApiError> {
            self.simulate().await?;
            let needle = query.text().map(str::to_lowercase);
            let mut venues: Vec<Venue> = self
                .venues
                .lock()
                .await
                .values()
                .filter(|v| {
                    needle.as_deref().map_or(true, |n| {
                        v.name.to_lowercase().contains(n)
                            || v.description
                                .as_deref()
                                .is_some_and(|d| d.to_lowercase().contains(n))
                    })
                })
                .cloned()
                .collect();

            let sorted = match query.sort.as_deref() {
                Some("name") => {
                    venues.sort_by(|a, b| a.name.cmp(&b.name));
                    true
                }
                Some("price") => {
                    venues.sort_by(|a, b| a.price.total_cmp(&b.price));
                    true
                }
                _ => false,
            };
            if sorted && query.sort_order.unwrap_or_default() == SortOrder::Desc {
                venues.reverse();
            }
            Ok(page_of(venues, page, limit))
        }

        async fn create_booking(
            &self,
            access_token: &str,
            payload: &BookingPayload,
        ) -> Result<BookingRecord, ApiError> {
            self.simulate().await?;
            if access_token.is_empty() {
                return Err(unauthorized());
            }
            let booker = self.user_for_token(access_token).await;
            let mut venues = self.venues.lock().await;
            let venue = venues.get_mut(&payload.venue_id).ok_or_else(|| ApiError::Rejected {
                status: 404,
                message: "No venue with such ID".to_string(),
            })?;

            let wanted = DateRange::normalized(payload.date_from, payload.date_to);
            let taken = venue
                .reservations()
                .iter()
                .any(|r| wanted.from() <= r.date_to() && r.date_from() <= wanted.to());
            if taken {
                return Err(ApiError::Rejected {
                    status: 409,
                    message: "The venue is already booked for the selected dates".to_string(),
                });
            }

            let record = BookingRecord {
                id: format!("booking-{}", rand::random::<u32>()),
                date_from: payload.date_from,
                date_to: payload.date_to,
                guests: payload.guests,
            };
            venue.bookings.push(VenueBooking {
                id: Some(record.id.clone()),
                date_from: record.date_from,
                date_to: record.date_to,
                guests: record.guests,
            });
            drop(venues);
            if let Some(user) = booker {
                self.booked_by
                    .lock()
                    .await
                    .insert(record.id.clone(), user.name);
            }
            self.booking_count.fetch_add(1, Ordering::SeqCst);
            Ok(record)
        }

        async fn delete_booking(
            &self,
            _access_token: &str,
            booking_id: &str,
        ) -> Result<(), ApiError> {
            self.simulate().await?;
            let mut venues = self.venues.lock().await;
            for venue in venues.values_mut() {
                let before = venue.bookings.len();
                venue
                    .bookings
                    .retain(|b| b.id.as_deref() != Some(booking_id));
                if venue.bookings.len() != before {
                    return Ok(());
                }
            }
            Err(ApiError::Rejected {
                status: 404,
                message: "No booking with such ID".to_string(),
            })
        }

        fn stats(&self) -> ClientStats {
            self.stats.lock().clone()
        }
    }
}
