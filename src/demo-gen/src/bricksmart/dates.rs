use chrono::Datelike;
use chrono::Duration;
use chrono::NaiveDate;
use chrono::Weekday;
use lazy_static::lazy_static;
use rand::Rng;

/// Days in the window dates are drawn from, counting back from an anchor.
pub const WINDOW_DAYS: f64 = 365.;

lazy_static! {
    pub static ref REGISTRATION_DATE: NaiveDate = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    pub static ref TRANSACTIONS_ANCHOR: NaiveDate = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    pub static ref FEEDBACKS_ANCHOR: NaiveDate = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    static ref EPOCH: NaiveDate = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
}

/// Anchor minus a whole number of days in `[0, 365)`, truncated like an integer cast.
pub fn days_before<R: Rng>(rng: &mut R, anchor: NaiveDate) -> NaiveDate {
    anchor - Duration::days((rng.gen::<f64>() * WINDOW_DAYS) as i64)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// August and December.
pub fn is_peak_month(date: NaiveDate) -> bool {
    matches!(date.month(), 8 | 12)
}

/// Days since the unix epoch.
pub fn to_date32(date: NaiveDate) -> i32 {
    (date - *EPOCH).num_days() as i32
}
