use crate::calendar::CalendarDay;
use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

// Nights and total price of a candidate stay
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PricingResult {
    pub nights: u32,
    pub total_price: f64,
}

// Nights are the elapsed time rounded up to whole days, so a partial day is
// billed as a night. Missing dates price as nothing; an end before the start
// clamps to zero nights.
pub fn quote(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    rate: f64,
) -> PricingResult {
    let (Some(start), Some(end)) = (start, end) else {
        return PricingResult::default();
    };

    let elapsed_ms = (end - start).num_milliseconds();
    if elapsed_ms <= 0 {
        return PricingResult::default();
    }

    let nights = elapsed_ms.div_euclid(MILLIS_PER_DAY)
        + i64::from(elapsed_ms.rem_euclid(MILLIS_PER_DAY) != 0);
    let nights = u32::try_from(nights).unwrap_or(u32::MAX);

    PricingResult {
        nights,
        total_price: f64::from(nights) * rate,
    }
}

pub fn quote_days(start: CalendarDay, end: CalendarDay, rate: f64) -> PricingResult {
    quote(Some(start.start_of_day()), Some(end.start_of_day()), rate)
}
