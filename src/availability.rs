// Venue availability: blocked-date index and overlap checking
// The index is rebuilt from the full reservation list every time the venue is
// (re)fetched; it is never patched in place.

use crate::calendar::{CalendarDay, DateRange};
use std::collections::BTreeSet;

// One existing or candidate booking of a venue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    range: DateRange,
    guests: u32,
}

impl Reservation {
    pub fn new(range: DateRange, guests: u32) -> Self {
        Self { range, guests }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn date_from(&self) -> CalendarDay {
        self.range.from()
    }

    pub fn date_to(&self) -> CalendarDay {
        self.range.to()
    }

    pub fn guests(&self) -> u32 {
        self.guests
    }
}

// Which days of a reservation count as occupied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    // Every day from check-in to check-out, both included. A stay may not
    // start on the day another one ends.
    #[default]
    Inclusive,
    // Only the nights are occupied; the check-out day is free for the next
    // guest to check in.
    SameDayTurnover,
}

impl BoundaryPolicy {
    fn occupied(&self, range: DateRange) -> Vec<CalendarDay> {
        match self {
            BoundaryPolicy::Inclusive => range.days(),
            BoundaryPolicy::SameDayTurnover => range.nights(),
        }
    }
}

// Every calendar day already taken at one venue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockedDateSet {
    days: BTreeSet<CalendarDay>,
    policy: BoundaryPolicy,
}

impl BlockedDateSet {
    pub fn from_reservations(reservations: &[Reservation]) -> Self {
        Self::with_policy(reservations, BoundaryPolicy::default())
    }

    pub fn with_policy(reservations: &[Reservation], policy: BoundaryPolicy) -> Self {
        let days = reservations
            .iter()
            .flat_map(|r| policy.occupied(r.range()))
            .collect();
        Self { days, policy }
    }

    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    pub fn contains(&self, day: CalendarDay) -> bool {
        self.days.contains(&day)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    // Blocked days in calendar order
    pub fn iter(&self) -> impl Iterator<Item = CalendarDay> + '_ {
        self.days.iter().copied()
    }

    // Earliest day of `range` that is already taken
    pub fn first_conflict(&self, range: DateRange) -> Option<CalendarDay> {
        if self.days.is_empty() {
            return None;
        }
        self.policy
            .occupied(range)
            .into_iter()
            .find(|day| self.days.contains(day))
    }

    // Whether a candidate stay shares a day with an existing reservation.
    // Accepts anything convertible to a day (timestamps are truncated first)
    // and tolerates an inverted pair.
    pub fn overlaps(&self, start: impl Into<CalendarDay>, end: impl Into<CalendarDay>) -> bool {
        let range = DateRange::normalized(start.into(), end.into());
        self.first_conflict(range).is_some()
    }
}
