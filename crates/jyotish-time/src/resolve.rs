//! Civil date/time resolution to UTC
//!
//! Pre-1955 dates go through the historical region table before any IANA
//! lookup; modern dates resolve through the IANA database directly.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

use jyotish_core::JyotishError;

use crate::historical::{identify_region, OffsetRule};

/// Which layer produced the UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetSource {
    Historical,
    Modern,
    Lmt,
}

/// Result of resolving a civil date/time at a place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    pub utc: chrono::DateTime<Utc>,
    pub offset_hours: f64,
    pub source: OffsetSource,
    /// -1, 0 or +1: whether the UTC date differs from the civil date.
    pub day_shift: i8,
}

/// Resolve a civil `date` ("YYYY-MM-DD") and `time` ("HH:MM") in `zone_id`
/// to a UTC instant. `place` and `coords` refine historical resolution.
pub fn resolve(
    date: &str,
    time: &str,
    zone_id: &str,
    place: Option<&str>,
    coords: Option<(f64, f64)>,
) -> Result<Resolution, JyotishError> {
    let civil_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| JyotishError::InvalidDateTime(format!("unparseable date '{date}'")))?;
    let civil_time = NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .map_err(|_| JyotishError::InvalidDateTime(format!("unparseable time '{time}'")))?;

    if let Some((lat, lon)) = coords {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(JyotishError::CoordinatesOutOfRange(format!(
                "lat {lat}, lon {lon}"
            )));
        }
    }

    if civil_date.year() < 1955 {
        resolve_historical(civil_date, civil_time, zone_id, place, coords)
    } else {
        resolve_modern(civil_date, civil_time, zone_id)
    }
}

fn resolve_historical(
    date: NaiveDate,
    time: NaiveTime,
    zone_id: &str,
    place: Option<&str>,
    coords: Option<(f64, f64)>,
) -> Result<Resolution, JyotishError> {
    let year = date.year();

    if let Some(region) = identify_region(zone_id, place, coords) {
        match region.rule_for_year(year) {
            Some(OffsetRule::Fixed(offset)) => {
                let (utc, day_shift) = apply_offset(date, time, offset)?;
                return Ok(Resolution {
                    utc,
                    offset_hours: offset,
                    source: OffsetSource::Historical,
                    day_shift,
                });
            }
            Some(OffsetRule::Lmt) => {
                if let Some((_, lon)) = coords {
                    let offset = lon / 15.0;
                    let (utc, day_shift) = apply_offset(date, time, offset)?;
                    return Ok(Resolution {
                        utc,
                        offset_hours: offset,
                        source: OffsetSource::Lmt,
                        day_shift,
                    });
                }
                warn!(
                    region = region.name,
                    year, "local mean time era but no coordinates; falling back to IANA zone"
                );
            }
            None => {}
        }
    }

    // No historical rule applied. Try the IANA zone, then raw LMT.
    if let Ok(tz) = zone_id.parse::<Tz>() {
        warn!(zone_id, year, "no historical region match; using IANA data for a pre-1955 date");
        return resolve_with_tz(date, time, tz);
    }
    if let Some((_, lon)) = coords {
        warn!(zone_id, year, "invalid zone for a pre-1955 date; using local mean time");
        let offset = lon / 15.0;
        let (utc, day_shift) = apply_offset(date, time, offset)?;
        return Ok(Resolution {
            utc,
            offset_hours: offset,
            source: OffsetSource::Lmt,
            day_shift,
        });
    }
    Err(JyotishError::TimezoneUnresolvable(format!(
        "pre-1955 date {date} with unknown zone '{zone_id}' and no coordinates"
    )))
}

fn resolve_modern(
    date: NaiveDate,
    time: NaiveTime,
    zone_id: &str,
) -> Result<Resolution, JyotishError> {
    let tz = zone_id.parse::<Tz>().map_err(|_| {
        JyotishError::TimezoneUnresolvable(format!("unknown IANA zone '{zone_id}'"))
    })?;
    resolve_with_tz(date, time, tz)
}

fn resolve_with_tz(date: NaiveDate, time: NaiveTime, tz: Tz) -> Result<Resolution, JyotishError> {
    let naive = date.and_time(time);
    let local = match tz.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => dt,
        // DST fold: the earlier reading wins.
        chrono::LocalResult::Ambiguous(earliest, _) => earliest,
        chrono::LocalResult::None => {
            return Err(JyotishError::InvalidDateTime(format!(
                "local time {naive} does not exist in zone {tz}"
            )));
        }
    };
    let offset_hours = local.offset().fix().local_minus_utc() as f64 / 3600.0;
    let utc = local.with_timezone(&Utc);
    let day_shift = (utc.date_naive() - date).num_days() as i8;
    Ok(Resolution {
        utc,
        offset_hours,
        source: OffsetSource::Modern,
        day_shift,
    })
}

/// UTC arithmetic with day-shift bookkeeping and the minute-rounding
/// cascade: a rounded minute of 60 rolls into the hour, which may roll the
/// day shift again.
fn apply_offset(
    date: NaiveDate,
    time: NaiveTime,
    offset_hours: f64,
) -> Result<(chrono::DateTime<Utc>, i8), JyotishError> {
    use chrono::Timelike;

    let mut decimal = time.hour() as f64 + time.minute() as f64 / 60.0 - offset_hours;
    let mut day_shift: i8 = 0;
    if decimal < 0.0 {
        decimal += 24.0;
        day_shift = -1;
    } else if decimal >= 24.0 {
        decimal -= 24.0;
        day_shift = 1;
    }

    let mut hour = decimal.floor() as i64;
    let mut minute = ((decimal - hour as f64) * 60.0).round() as i64;
    if minute == 60 {
        minute = 0;
        hour += 1;
        if hour == 24 {
            hour = 0;
            day_shift += 1;
        }
    }

    let utc_date = date + Duration::days(day_shift as i64);
    let naive = utc_date
        .and_hms_opt(hour as u32, minute as u32, 0)
        .ok_or_else(|| {
            JyotishError::InvalidDateTime(format!("offset arithmetic produced {hour}:{minute}"))
        })?;
    Ok((Utc.from_utc_datetime(&naive), day_shift))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_jfk_war_time() {
        // US Eastern 1917: year-round war-time convention, UTC-4.
        let r = resolve(
            "1917-05-29",
            "15:00",
            "America/New_York",
            Some("Brookline, Massachusetts"),
            Some((42.3, -71.1)),
        )
        .unwrap();
        assert_eq!(r.offset_hours, -4.0);
        assert_eq!(r.source, OffsetSource::Historical);
        assert_eq!(r.day_shift, 0);
        assert_eq!(r.utc.hour(), 19);
        assert_eq!(r.utc.date_naive().to_string(), "1917-05-29");
    }

    #[test]
    fn test_oprah_central_standard() {
        let r = resolve(
            "1954-01-29",
            "04:30",
            "America/Chicago",
            Some("Kosciusko, Mississippi"),
            Some((33.7, -90.7)),
        )
        .unwrap();
        assert_eq!(r.offset_hours, -6.0);
        assert_eq!(r.source, OffsetSource::Historical);
        assert_eq!(r.utc.hour(), 10);
        assert_eq!(r.utc.minute(), 30);
    }

    #[test]
    fn test_india_lmt_era() {
        // Pre-1905 India resolves by local mean time from the longitude.
        let r = resolve(
            "1890-03-15",
            "06:00",
            "Asia/Kolkata",
            Some("Calcutta"),
            Some((22.57, 88.36)),
        )
        .unwrap();
        assert_eq!(r.source, OffsetSource::Lmt);
        assert!((r.offset_hours - 88.36 / 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_modern_kolkata() {
        let r = resolve("2000-09-30", "12:00", "Asia/Kolkata", None, Some((22.57, 88.36))).unwrap();
        assert_eq!(r.source, OffsetSource::Modern);
        assert!((r.offset_hours - 5.5).abs() < 1e-9);
        assert_eq!(r.utc.hour(), 6);
        assert_eq!(r.utc.minute(), 30);
        assert_eq!(r.day_shift, 0);
    }

    #[test]
    fn test_negative_day_shift() {
        // 02:00 IST is the previous UTC day.
        let r = resolve("2000-10-01", "02:00", "Asia/Kolkata", None, None).unwrap();
        assert_eq!(r.day_shift, -1);
        assert_eq!(r.utc.date_naive().to_string(), "2000-09-30");
        assert_eq!(r.utc.hour(), 20);
        assert_eq!(r.utc.minute(), 30);
    }

    #[test]
    fn test_positive_day_shift() {
        // Late evening in a negative-offset zone lands on the next UTC day.
        let r = resolve("1917-05-29", "22:30", "America/New_York", None, Some((42.3, -71.1)))
            .unwrap();
        assert_eq!(r.day_shift, 1);
        assert_eq!(r.utc.date_naive().to_string(), "1917-05-30");
        assert_eq!(r.utc.hour(), 2);
    }

    #[test]
    fn test_minute_rounding_cascade() {
        // LMT at longitude 0.125 deg is a 30 s offset; rounding the minute
        // produces 60 and must cascade into the hour.
        let r = resolve("1850-06-01", "12:00", "Etc/Unknown", None, Some((51.5, 0.125))).unwrap();
        assert_eq!(r.source, OffsetSource::Lmt);
        assert_eq!(r.utc.hour(), 12);
        assert_eq!(r.utc.minute(), 0);
    }

    #[test]
    fn test_unresolvable_pre_1955() {
        let err = resolve("1890-01-01", "12:00", "Not/AZone", None, None).unwrap_err();
        assert_eq!(err.kind(), "timezone_unresolvable");
    }

    #[test]
    fn test_invalid_date() {
        let err = resolve("1917-13-41", "12:00", "UTC", None, None).unwrap_err();
        assert_eq!(err.kind(), "invalid_date_time");
    }

    #[test]
    fn test_coordinates_out_of_range() {
        let err = resolve("2000-01-01", "12:00", "UTC", None, Some((95.0, 10.0))).unwrap_err();
        assert_eq!(err.kind(), "coordinates_out_of_range");
    }

    #[test]
    fn test_pre_1955_unmatched_region_uses_iana() {
        // Sydney predates the table; resolution falls through to IANA data.
        let r = resolve("1948-04-02", "09:00", "Australia/Sydney", None, Some((-33.8, 151.2)))
            .unwrap();
        assert_eq!(r.source, OffsetSource::Modern);
        assert!((r.offset_hours - 10.0).abs() < 0.51);
    }
}
