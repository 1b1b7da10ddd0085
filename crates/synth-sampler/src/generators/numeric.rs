//! Numeric value generators.

use rand::Rng;
use rust_decimal::Decimal;
use synth_core::money;

/// Generate a random integer in the given range (inclusive).
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i32, max: i32) -> i32 {
    rng.gen_range(min..=max)
}

/// Generate a random money value in the given range (inclusive).
///
/// The draw happens on the scale-4 integer mantissa, so every value in the
/// range is equally likely and the result is exact.
pub fn generate_decimal_range<R: Rng>(rng: &mut R, min: Decimal, max: Decimal) -> Decimal {
    let low = money::to_units(min);
    let high = money::to_units(max);
    let units = rng.gen_range(low..=high);
    // both bounds came from valid decimals, so anything between them fits
    money::from_units(units).unwrap_or_else(|| money::money(min))
}
