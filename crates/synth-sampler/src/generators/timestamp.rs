//! Timestamp value generators.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Generate a random timestamp in the given range (inclusive, whole seconds).
pub fn generate_timestamp_range<R: Rng>(
    rng: &mut R,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DateTime<Utc> {
    let start_ts = start.timestamp();
    let end_ts = end.timestamp();

    if start_ts >= end_ts {
        return start;
    }

    let random_ts = rng.gen_range(start_ts..=end_ts);
    DateTime::from_timestamp(random_ts, 0).unwrap_or(start)
}

/// Generate a random lag in whole minutes (inclusive).
///
/// Returns `None` when the drawn lag does not fit in a [`Duration`].
pub fn generate_lag<R: Rng>(rng: &mut R, min_minutes: i64, max_minutes: i64) -> Option<Duration> {
    Duration::try_minutes(rng.gen_range(min_minutes..=max_minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_generate_timestamp_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let value = generate_timestamp_range(
                &mut rng,
                ts("2020-01-01T00:00:00Z"),
                ts("2024-12-31T23:59:59Z"),
            );
            assert!(value.year() >= 2020 && value.year() <= 2024);
            assert_eq!(value.timestamp_subsec_micros(), 0);
        }
    }

    #[test]
    fn test_inverted_range_returns_start() {
        let mut rng = StdRng::seed_from_u64(42);
        let start = ts("2024-06-01T00:00:00Z");

        let value = generate_timestamp_range(&mut rng, start, ts("2024-01-01T00:00:00Z"));
        assert_eq!(value, start);
    }

    #[test]
    fn test_generate_lag() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let lag = generate_lag(&mut rng, 60, 299).unwrap();
            assert!(lag >= Duration::minutes(60) && lag <= Duration::minutes(299));
        }
    }

    #[test]
    fn test_generate_lag_out_of_range() {
        let mut rng = StdRng::seed_from_u64(42);

        assert!(generate_lag(&mut rng, i64::MAX, i64::MAX).is_none());
    }
}
