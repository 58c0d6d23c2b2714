use chrono::{DateTime, Utc};

/// Source of "now" for the scan engine. Injectable so duration-threshold
/// behavior can be tested without depending on wall-clock timing.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Elapsed minutes between two instants, rounded to 2 decimal places.
/// The rounded figure is what gets stored; it is never recomputed on read.
pub fn elapsed_minutes(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let millis = (to - from).num_milliseconds() as f64;
    (millis / 60_000.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn elapsed_minutes_rounds_to_hundredths() {
        let start = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();
        let end = start + chrono::Duration::seconds(3599) + chrono::Duration::milliseconds(400);
        // 3599.4s = 59.99 min
        assert_eq!(elapsed_minutes(start, end), 59.99);

        let exact = start + chrono::Duration::minutes(60);
        assert_eq!(elapsed_minutes(start, exact), 60.0);
    }
}
