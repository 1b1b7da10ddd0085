//! Individual value generators for the column types of both streams.
//!
//! This module provides the generation logic for each generator kind a
//! profile can name. Dispatch is per column type, so a profile that asks for
//! a decimal generator on a text column is rejected when it is parsed rather
//! than when it is sampled.

pub mod numeric;
pub mod pattern;
pub mod timestamp;

use crate::profile::{DecimalGenerator, IntGenerator, TextGenerator, TimestampGenerator};
use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use synth_core::money;

/// Generate a text value.
///
/// `external_id` fills `{external_id}` placeholders in patterns.
pub fn generate_text<R: Rng>(
    config: &TextGenerator,
    rng: &mut R,
    index: u64,
    external_id: Option<&str>,
) -> String {
    match config {
        TextGenerator::Pattern { pattern } => {
            pattern::generate_pattern(pattern, rng, index, external_id)
        }
        TextGenerator::OneOf { values } => pick(rng, values).cloned().unwrap_or_default(),
        TextGenerator::Static { value } => value.clone(),
    }
}

/// Generate a money value at scale 4.
pub fn generate_decimal<R: Rng>(config: &DecimalGenerator, rng: &mut R) -> Decimal {
    match config {
        DecimalGenerator::DecimalRange { min, max } => {
            numeric::generate_decimal_range(rng, *min, *max)
        }
        DecimalGenerator::Static { value } => money::money(*value),
    }
}

/// Generate an integer value.
pub fn generate_int<R: Rng>(config: &IntGenerator, rng: &mut R) -> i32 {
    match config {
        IntGenerator::IntRange { min, max } => numeric::generate_int_range(rng, *min, *max),
        IntGenerator::OneOf { values } => pick(rng, values).copied().unwrap_or_default(),
        IntGenerator::Static { value } => *value,
    }
}

/// Generate a UTC timestamp.
pub fn generate_timestamp<R: Rng>(config: &TimestampGenerator, rng: &mut R) -> DateTime<Utc> {
    match config {
        TimestampGenerator::TimestampRange { start, end } => {
            timestamp::generate_timestamp_range(rng, *start, *end)
        }
        TimestampGenerator::Static { value } => *value,
    }
}

fn pick<'a, R: Rng, T>(rng: &mut R, values: &'a [T]) -> Option<&'a T> {
    if values.is_empty() {
        None
    } else {
        values.get(rng.gen_range(0..values.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_one_of_picks_from_pool() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = TextGenerator::OneOf {
            values: vec!["USD".to_string(), "EUR".to_string()],
        };

        for _ in 0..20 {
            let value = generate_text(&config, &mut rng, 0, None);
            assert!(value == "USD" || value == "EUR");
        }
    }

    #[test]
    fn test_static_decimal_is_normalized() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = DecimalGenerator::Static {
            value: Decimal::ZERO,
        };

        assert_eq!(generate_decimal(&config, &mut rng).to_string(), "0.0000");
    }

    #[test]
    fn test_int_one_of() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = IntGenerator::OneOf {
            values: vec![4000, 4010],
        };

        for _ in 0..20 {
            let value = generate_int(&config, &mut rng);
            assert!(value == 4000 || value == 4010);
        }
    }
}
