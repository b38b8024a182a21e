//! Julian Day conversion on the proleptic Gregorian calendar, UT basis

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};

/// Julian Day for a proleptic-Gregorian date and decimal UT hours.
pub fn julian_day_ymd(year: i32, month: u32, day: u32, ut_hours: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let y = y as f64;
    let m = m as f64;
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64 + b - 1524.5
        + ut_hours / 24.0
}

/// Julian Day for a UTC instant.
pub fn julian_day(utc: DateTime<Utc>) -> f64 {
    let ut_hours = utc.hour() as f64
        + utc.minute() as f64 / 60.0
        + utc.second() as f64 / 3600.0
        + utc.nanosecond() as f64 / 3.6e12;
    julian_day_ymd(utc.year(), utc.month(), utc.day(), ut_hours)
}

/// Inverse conversion. Always takes the Gregorian branch so that
/// `julian_day(utc_from_julian_day(jd))` round-trips on the proleptic
/// calendar, matching `julian_day_ymd`.
pub fn utc_from_julian_day(jd: f64) -> Option<DateTime<Utc>> {
    if !jd.is_finite() {
        return None;
    }
    let jd = jd + 0.5;
    let z = jd.floor();
    let f = jd - z;

    let alpha = ((z - 1867216.25) / 36524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = (b - d - (30.6001 * e).floor()) as u32;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 } as u32;
    let year = if month > 2 { c - 4716.0 } else { c - 4715.0 } as i32;

    let total_seconds = f * 86400.0;
    let hour = (total_seconds / 3600.0) as u32;
    let minute = ((total_seconds - hour as f64 * 3600.0) / 60.0) as u32;
    let sec_f = total_seconds - hour as f64 * 3600.0 - minute as f64 * 60.0;
    let second = sec_f as u32;
    let nanos = ((sec_f - second as f64) * 1e9).round() as u32;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let naive = date.and_hms_nano_opt(hour.min(23), minute.min(59), second.min(59), nanos.min(999_999_999))?;
    Some(Utc.from_utc_datetime(&naive))
}
