//! Acquisition time: seconds since 2000-01-01T00:00:00 UTC.

use chrono::{DateTime, TimeZone, Utc};

/// 2000-01-01T00:00:00Z as Unix seconds.
pub const REFERENCE_EPOCH_UNIX_SECONDS: i64 = 946_684_800;

/// Converts raw seconds to a UTC timestamp at microsecond resolution.
///
/// `None` for non-finite input or offsets chrono cannot represent.
pub fn epoch_to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let micros = (seconds * 1e6).round();
    if micros.abs() >= i64::MAX as f64 {
        return None;
    }
    let micros = micros as i64;
    let secs = REFERENCE_EPOCH_UNIX_SECONDS.checked_add(micros.div_euclid(1_000_000))?;
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
    Utc.timestamp_opt(secs, nanos).single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn zero_offset_is_reference_epoch() {
        let epoch = epoch_to_datetime(0.0).unwrap();
        assert_eq!(epoch.to_rfc3339(), "2000-01-01T00:00:00+00:00");
    }

    #[test]
    fn offset_is_added_in_seconds() {
        let one_day = epoch_to_datetime(86_400.5).unwrap();
        let expected = Utc.with_ymd_and_hms(2000, 1, 2, 0, 0, 0).unwrap() + Duration::milliseconds(500);
        assert_eq!(one_day, expected);
    }

    #[test]
    fn negative_offsets_precede_the_epoch() {
        let before = epoch_to_datetime(-1.0).unwrap();
        assert_eq!(before.to_rfc3339(), "1999-12-31T23:59:59+00:00");
    }

    #[test]
    fn non_finite_offsets_have_no_timestamp() {
        assert_eq!(epoch_to_datetime(f64::NAN), None);
        assert_eq!(epoch_to_datetime(f64::INFINITY), None);
    }

    #[test]
    fn out_of_range_offsets_have_no_timestamp() {
        assert_eq!(epoch_to_datetime(1e300), None);
        assert_eq!(epoch_to_datetime(-1e300), None);
        // fits in i64 microseconds but lies past chrono's last representable year
        assert_eq!(epoch_to_datetime(9.0e12), None);
    }
}
