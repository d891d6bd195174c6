//! Pure pricing and interest arithmetic.
//!
//! Everything in this module is a total function of its arguments: no
//! storage reads, no clock. Multiplications are checked so a pathological
//! price or rate surfaces as an error instead of wrapping.

pub const SECONDS_PER_DAY: u64 = 86_400;

/// Days billed for a rental window: ceiling division, minimum one day.
///
/// A 25-hour window bills two days; a 30-minute window bills one.
pub fn billable_days(start_date: u64, end_date: u64) -> u64 {
    let span = end_date.saturating_sub(start_date);
    span.div_ceil(SECONDS_PER_DAY).max(1)
}

/// Total rental cost for `days` at `price_per_day`.
pub fn rental_cost(price_per_day: i128, days: u64) -> Option<i128> {
    (days as i128).checked_mul(price_per_day)
}

/// Whole days of lateness past `end_date`. Zero when `now` is on time.
pub fn late_days(end_date: u64, now: u64) -> u64 {
    now.saturating_sub(end_date) / SECONDS_PER_DAY
}

/// Late-return interest: `late_days * rate` percent of the guarantee,
/// capped at the guarantee itself. The renter can never lose more than
/// the deposit.
pub fn late_interest(guarantee: i128, rate: u32, late_days: u64) -> Option<i128> {
    let raw = (late_days as i128).checked_mul(rate as i128)?;
    let amount = guarantee.checked_mul(raw)? / 100;
    Some(amount.min(guarantee))
}
