//! Sampler profiles.
//!
//! A profile is the stand-in for a trained model: one YAML file per stream
//! naming a generator for each column. Profiles are validated when loaded so
//! that a bad artifact fails the run before the first batch is sampled.
//!
//! Monetary bounds should be quoted (`"50.0000"`) so they are parsed as
//! decimals rather than through a float.

use crate::error::SamplerError;
use crate::generators::pattern::{placeholders, Placeholder};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use synth_core::money::MONEY_SCALE;

fn default_version() -> u32 {
    1
}

/// Generator for a text column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextGenerator {
    /// Pattern string with placeholders
    Pattern { pattern: String },
    /// Uniform pick from a list
    OneOf { values: Vec<String> },
    /// Fixed value
    Static { value: String },
}

/// Generator for a money column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecimalGenerator {
    /// Uniform value in `[min, max]` at scale 4
    DecimalRange { min: Decimal, max: Decimal },
    /// Fixed value
    Static { value: Decimal },
}

/// Generator for an integer column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IntGenerator {
    /// Uniform value in `[min, max]`
    IntRange { min: i32, max: i32 },
    /// Uniform pick from a list
    OneOf { values: Vec<i32> },
    /// Fixed value
    Static { value: i32 },
}

/// Generator for a UTC timestamp column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimestampGenerator {
    /// Uniform instant in `[start, end]`, whole seconds
    TimestampRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// Fixed instant
    Static { value: DateTime<Utc> },
}

/// Delay, in minutes, between a processor event and its ledger posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LagRange {
    pub min_minutes: i64,
    pub max_minutes: i64,
}

/// Profile for the processor stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessorProfile {
    #[serde(default = "default_version")]
    pub version: u32,
    pub external_id: TextGenerator,
    pub amount: DecimalGenerator,
    pub currency: TextGenerator,
    pub created_at: TimestampGenerator,
}

/// Profile for the ledger stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerProfile {
    #[serde(default = "default_version")]
    pub version: u32,
    pub external_id: TextGenerator,
    pub account_code: IntGenerator,
    pub credit_amount: DecimalGenerator,
    pub debit_amount: DecimalGenerator,
    /// May reference the row's identifier through `{external_id}`.
    pub memo: TextGenerator,
    pub created_at: TimestampGenerator,
    /// Added to the sampled `created_at`.
    #[serde(default)]
    pub posting_lag: Option<LagRange>,
}

impl ProcessorProfile {
    /// Load and validate a profile from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SamplerError> {
        let profile: Self = load_yaml(path.as_ref())?;
        profile.validate()?;
        Ok(profile)
    }

    /// Parse and validate a profile from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SamplerError> {
        let profile: Self = serde_yaml::from_str(yaml)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn to_yaml(&self) -> Result<String, SamplerError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check that every generator can produce a value.
    pub fn validate(&self) -> Result<(), SamplerError> {
        validate_text("external_id", &self.external_id, false)?;
        validate_decimal("amount", &self.amount)?;
        validate_text("currency", &self.currency, false)?;
        validate_timestamp("created_at", &self.created_at)
    }
}

impl Default for ProcessorProfile {
    /// Shape of the reference seed data: `ch_` charge ids, 50.00..5000.00 USD
    /// charges spread over 2024.
    fn default() -> Self {
        Self {
            version: 1,
            external_id: TextGenerator::Pattern {
                pattern: "ch_{alnum:24}".to_string(),
            },
            amount: DecimalGenerator::DecimalRange {
                min: Decimal::new(500_000, MONEY_SCALE),
                max: Decimal::new(50_000_000, MONEY_SCALE),
            },
            currency: TextGenerator::OneOf {
                values: vec!["USD".to_string()],
            },
            created_at: default_window(),
        }
    }
}

impl LedgerProfile {
    /// Load and validate a profile from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SamplerError> {
        let profile: Self = load_yaml(path.as_ref())?;
        profile.validate()?;
        Ok(profile)
    }

    /// Parse and validate a profile from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SamplerError> {
        let profile: Self = serde_yaml::from_str(yaml)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn to_yaml(&self) -> Result<String, SamplerError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check that every generator can produce a value.
    pub fn validate(&self) -> Result<(), SamplerError> {
        validate_text("external_id", &self.external_id, false)?;
        validate_int("account_code", &self.account_code)?;
        validate_decimal("credit_amount", &self.credit_amount)?;
        validate_decimal("debit_amount", &self.debit_amount)?;
        validate_text("memo", &self.memo, true)?;
        validate_timestamp("created_at", &self.created_at)?;

        if let Some(lag) = &self.posting_lag {
            validate_lag(lag, latest_instant(&self.created_at))?;
        }
        Ok(())
    }
}

impl Default for LedgerProfile {
    /// Shape of the reference seed data: revenue account 4000, credit-only
    /// postings whose memo names the charge, booked 1-4 hours after the charge.
    fn default() -> Self {
        Self {
            version: 1,
            external_id: TextGenerator::Pattern {
                pattern: "ch_{alnum:24}".to_string(),
            },
            account_code: IntGenerator::Static { value: 4000 },
            credit_amount: DecimalGenerator::DecimalRange {
                min: Decimal::new(500_000, MONEY_SCALE),
                max: Decimal::new(50_000_000, MONEY_SCALE),
            },
            debit_amount: DecimalGenerator::Static {
                value: Decimal::new(0, MONEY_SCALE),
            },
            memo: TextGenerator::Pattern {
                pattern: "Stripe: {external_id}".to_string(),
            },
            created_at: default_window(),
            posting_lag: Some(LagRange {
                min_minutes: 60,
                max_minutes: 299,
            }),
        }
    }
}

fn default_window() -> TimestampGenerator {
    TimestampGenerator::TimestampRange {
        start: Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_default(),
        end: Utc
            .with_ymd_and_hms(2024, 12, 31, 23, 59, 59)
            .single()
            .unwrap_or_default(),
    }
}

fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, SamplerError> {
    let content = fs::read_to_string(path).map_err(|source| SamplerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_yaml::from_str(&content)?)
}

fn invalid(column: &str, reason: impl std::fmt::Display) -> SamplerError {
    SamplerError::InvalidProfile(format!("{column}: {reason}"))
}

fn validate_text(
    column: &str,
    config: &TextGenerator,
    allow_external_id: bool,
) -> Result<(), SamplerError> {
    match config {
        TextGenerator::Pattern { pattern } => {
            for placeholder in placeholders(pattern) {
                match placeholder {
                    Placeholder::Unknown(token) => {
                        return Err(invalid(column, format!("unknown placeholder {{{token}}}")))
                    }
                    Placeholder::ExternalId if !allow_external_id => {
                        return Err(invalid(column, "{external_id} is only allowed in memo"))
                    }
                    _ => {}
                }
            }
            Ok(())
        }
        TextGenerator::OneOf { values } if values.is_empty() => {
            Err(invalid(column, "one_of needs at least one value"))
        }
        _ => Ok(()),
    }
}

fn validate_decimal(column: &str, config: &DecimalGenerator) -> Result<(), SamplerError> {
    let bounds = match config {
        DecimalGenerator::DecimalRange { min, max } => {
            if min > max {
                return Err(invalid(column, format!("min {min} is greater than max {max}")));
            }
            [*min, *max]
        }
        DecimalGenerator::Static { value } => [*value, *value],
    };

    match bounds.iter().find(|v| v.scale() > MONEY_SCALE) {
        Some(value) => Err(invalid(
            column,
            format!("{value} has more than {MONEY_SCALE} fractional digits"),
        )),
        None => Ok(()),
    }
}

fn validate_int(column: &str, config: &IntGenerator) -> Result<(), SamplerError> {
    match config {
        IntGenerator::IntRange { min, max } if min > max => {
            Err(invalid(column, format!("min {min} is greater than max {max}")))
        }
        IntGenerator::OneOf { values } if values.is_empty() => {
            Err(invalid(column, "one_of needs at least one value"))
        }
        _ => Ok(()),
    }
}

fn validate_timestamp(column: &str, config: &TimestampGenerator) -> Result<(), SamplerError> {
    match config {
        TimestampGenerator::TimestampRange { start, end } if start > end => Err(invalid(
            column,
            format!("start {start} is after end {end}"),
        )),
        _ => Ok(()),
    }
}

/// Latest instant a timestamp generator can produce.
fn latest_instant(config: &TimestampGenerator) -> DateTime<Utc> {
    match config {
        TimestampGenerator::TimestampRange { end, .. } => *end,
        TimestampGenerator::Static { value } => *value,
    }
}

/// The longest lag must still land on a representable instant when added to
/// the latest sampled `created_at`.
fn validate_lag(lag: &LagRange, latest: DateTime<Utc>) -> Result<(), SamplerError> {
    if lag.min_minutes < 0 || lag.min_minutes > lag.max_minutes {
        return Err(invalid(
            "posting_lag",
            format!(
                "expected 0 <= min_minutes <= max_minutes, got {}..{}",
                lag.min_minutes, lag.max_minutes
            ),
        ));
    }
    TimeDelta::try_minutes(lag.max_minutes)
        .and_then(|delta| latest.checked_add_signed(delta))
        .map(|_| ())
        .ok_or_else(|| {
            invalid(
                "posting_lag",
                format!(
                    "max_minutes {} overflows the latest created_at {latest}",
                    lag.max_minutes
                ),
            )
        })
}
