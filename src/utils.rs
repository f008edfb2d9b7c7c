// Utility functions
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};

/// Tokyo offset; the ETFs trade on the TSE and the report is timestamped in JST.
pub fn jst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("valid JST offset")
}

pub fn jst_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&jst())
}

/// Converts provider epoch seconds into the JST trading date.
pub fn jst_date_from_epoch(ts: i64) -> Option<NaiveDate> {
    jst()
        .timestamp_opt(ts, 0)
        .single()
        .map(|dt| dt.date_naive())
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_to_jst_date() {
        // 2024-01-04 09:00 JST = 2024-01-04 00:00 UTC
        let date = jst_date_from_epoch(1_704_326_400).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 4).unwrap());
        // 2024-01-04 23:30 UTC is already 2024-01-05 in Tokyo
        let date = jst_date_from_epoch(1_704_411_000).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn rounding() {
        assert_eq!(round1(70.25), 70.3);
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(-3.456), -3.46);
    }
}
