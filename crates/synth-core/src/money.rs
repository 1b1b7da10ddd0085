//! Scale-4 fixed-point money.
//!
//! Every monetary field in both streams is a `rust_decimal::Decimal` held at
//! exactly [`MONEY_SCALE`] fractional digits. Values cross into storage as the
//! raw `i128` mantissa at that scale, so nothing on the monetary path ever
//! touches binary floating point.

use rust_decimal::Decimal;

/// Number of fractional digits carried by every monetary field.
pub const MONEY_SCALE: u32 = 4;

/// Decimal precision used for monetary columns in storage.
pub const MONEY_PRECISION: u8 = 19;

/// Normalize a decimal to [`MONEY_SCALE`] fractional digits.
///
/// Values with more digits are rounded; values with fewer are padded, so
/// `12.5` becomes `12.5000`.
pub fn money(value: Decimal) -> Decimal {
    let mut value = value;
    value.rescale(MONEY_SCALE);
    value
}

/// `0.0000`
pub fn zero() -> Decimal {
    Decimal::new(0, MONEY_SCALE)
}

/// One minor currency unit, `0.0100`. The size of every amount modification.
pub fn minor_unit() -> Decimal {
    Decimal::new(100, MONEY_SCALE)
}

/// Raw mantissa of a value at [`MONEY_SCALE`].
pub fn to_units(value: Decimal) -> i128 {
    money(value).mantissa()
}

/// Rebuild a money value from its mantissa at [`MONEY_SCALE`].
pub fn from_units(units: i128) -> Option<Decimal> {
    Decimal::try_from_i128_with_scale(units, MONEY_SCALE).ok()
}
