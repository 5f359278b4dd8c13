// Venue cache
// Sits between the booking views and the API so that opening the same venue
// twice does not refetch it. Entries are dropped explicitly after every
// successful booking write instead of relying on a data-fetching library to
// notice.

use crate::api::{ApiError, BookingRecord, ClientStats, HolidazeApi, VenueQuery};
use crate::booking::BookingPayload;
use crate::session::{Credentials, UserProfile};
use crate::venue::{Envelope, Profile, Venue};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Default)]
pub struct CacheStats {
    pub hit_count: AtomicUsize,
    pub miss_count: AtomicUsize,
    pub expired_count: AtomicUsize,
    pub eviction_count: AtomicUsize,
    pub invalidation_count: AtomicUsize,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CacheStatsReport {
    pub items_count: usize,
    pub hit_count: usize,
    pub miss_count: usize,
    pub expired_count: usize,
    pub eviction_count: usize,
    pub invalidation_count: usize,
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl: Duration,
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_entries: 256,
        }
    }
}

struct CacheEntry {
    venue: Venue,
    created_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

pub struct VenueCache {
    entries: DashMap<String, CacheEntry>,
    config: CacheConfig,
    stats: CacheStats,
}

impl VenueCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            config,
            stats: CacheStats::default(),
        }
    }

    pub fn get(&self, venue_id: &str) -> Option<Venue> {
        let expired = match self.entries.get(venue_id) {
            Some(entry) if !entry.is_expired(self.config.ttl) => {
                self.stats.hit_count.fetch_add(1, Ordering::SeqCst);
                return Some(entry.venue.clone());
            }
            Some(_) => true,
            None => false,
        };

        // The read guard is released before removing
        if expired && self.entries.remove(venue_id).is_some() {
            self.stats.expired_count.fetch_add(1, Ordering::SeqCst);
        }
        self.stats.miss_count.fetch_add(1, Ordering::SeqCst);
        None
    }

    pub fn store(&self, venue: Venue) {
        if !self.entries.contains_key(&venue.id) && self.entries.len() >= self.config.max_entries {
            self.evict_oldest();
        }
        self.entries.insert(
            venue.id.clone(),
            CacheEntry {
                venue,
                created_at: Instant::now(),
            },
        );
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.created_at)
            .map(|entry| entry.key().clone());

        if let Some(key) = oldest {
            if self.entries.remove(&key).is_some() {
                debug!("Evicted venue {} from cache", key);
                self.stats.eviction_count.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    pub fn invalidate(&self, venue_id: &str) -> bool {
        let removed = self.entries.remove(venue_id).is_some();
        if removed {
            debug!("Invalidated cached venue {}", venue_id);
            self.stats.invalidation_count.fetch_add(1, Ordering::SeqCst);
        }
        removed
    }

    pub fn invalidate_all(&self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.stats
            .invalidation_count
            .fetch_add(count, Ordering::SeqCst);
        count
    }

    pub fn stats(&self) -> CacheStatsReport {
        CacheStatsReport {
            items_count: self.entries.len(),
            hit_count: self.stats.hit_count.load(Ordering::SeqCst),
            miss_count: self.stats.miss_count.load(Ordering::SeqCst),
            expired_count: self.stats.expired_count.load(Ordering::SeqCst),
            eviction_count: self.stats.eviction_count.load(Ordering::SeqCst),
            invalidation_count: self.stats.invalidation_count.load(Ordering::SeqCst),
        }
    }
}

// API client that serves venue reads from a `VenueCache`
pub struct CachedApi<A> {
    inner: A,
    cache: VenueCache,
}

impl<A: HolidazeApi> CachedApi<A> {
    pub fn new(inner: A, config: CacheConfig) -> Self {
        Self {
            inner,
            cache: VenueCache::new(config),
        }
    }

    pub fn cache(&self) -> &VenueCache {
        &self.cache
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }
}

// Profiles and listings pass straight through; only single venues are cached
#[async_trait]
impl<A: HolidazeApi> HolidazeApi for CachedApi<A> {
    async fn login(&self, credentials: &Credentials) -> Result<UserProfile, ApiError> {
        self.inner.login(credentials).await
    }

    async fn fetch_profile(&self, access_token: &str, name: &str) -> Result<Profile, ApiError> {
        self.inner.fetch_profile(access_token, name).await
    }

    async fn manager_venues(
        &self,
        access_token: &str,
        name: &str,
    ) -> Result<Vec<Venue>, ApiError> {
        self.inner.manager_venues(access_token, name).await
    }

    async fn fetch_venue(&self, venue_id: &str) -> Result<Venue, ApiError> {
        if let Some(venue) = self.cache.get(venue_id) {
            return Ok(venue);
        }
        let venue = self.inner.fetch_venue(venue_id).await?;
        self.cache.store(venue.clone());
        Ok(venue)
    }

    async fn list_venues(&self, page: u32, limit: u32) -> Result<Envelope<Vec<Venue>>, ApiError> {
        self.inner.list_venues(page, limit).await
    }

    async fn search_venues(
        &self,
        query: &VenueQuery,
        page: u32,
        limit: u32,
    ) -> Result<Envelope<Vec<Venue>>, ApiError> {
        self.inner.search_venues(query, page, limit).await
    }

    async fn create_booking(
        &self,
        access_token: &str,
        payload: &BookingPayload,
    ) -> Result<BookingRecord, ApiError> {
        let record = self.inner.create_booking(access_token, payload).await?;
        self.cache.invalidate(&payload.venue_id);
        Ok(record)
    }

    // The booking id alone does not name its venue, so every entry goes
    async fn delete_booking(&self, access_token: &str, booking_id: &str) -> Result<(), ApiError> {
        self.inner.delete_booking(access_token, booking_id).await?;
        self.cache.invalidate_all();
        Ok(())
    }

    fn stats(&self) -> ClientStats {
        self.inner.stats()
    }
}
