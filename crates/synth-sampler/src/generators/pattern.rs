//! Pattern-based string generator.
//!
//! Supports placeholders:
//! - `{index}` - row index within the sampler
//! - `{rand:N}` - random N-digit number
//! - `{alnum:N}` - N random ASCII letters and digits
//! - `{external_id}` - the row's own sampled identifier (ledger memos only)
//!
//! Unknown placeholders are copied through unchanged; profile validation
//! rejects them before sampling starts.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// A placeholder found in a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder<'a> {
    Index,
    RandDigits(usize),
    Alphanumeric(usize),
    ExternalId,
    Unknown(&'a str),
}

impl<'a> Placeholder<'a> {
    fn parse(token: &'a str) -> Self {
        match token.split_once(':') {
            None if token == "index" => Placeholder::Index,
            None if token == "external_id" => Placeholder::ExternalId,
            Some(("rand", n)) => n
                .parse()
                .map(Placeholder::RandDigits)
                .unwrap_or(Placeholder::Unknown(token)),
            Some(("alnum", n)) => n
                .parse()
                .map(Placeholder::Alphanumeric)
                .unwrap_or(Placeholder::Unknown(token)),
            _ => Placeholder::Unknown(token),
        }
    }
}

/// List the placeholders of a pattern in order of appearance.
pub fn placeholders(pattern: &str) -> Vec<Placeholder<'_>> {
    let mut found = Vec::new();
    let mut rest = pattern;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        found.push(Placeholder::parse(&rest[open + 1..open + close]));
        rest = &rest[open + close + 1..];
    }
    found
}

/// Render a pattern.
///
/// `external_id` fills `{external_id}`; when it is `None` the placeholder is
/// left as written.
pub fn generate_pattern<R: Rng>(
    pattern: &str,
    rng: &mut R,
    index: u64,
    external_id: Option<&str>,
) -> String {
    let mut result = String::with_capacity(pattern.len() + 24);
    let mut rest = pattern;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let tail = &rest[open..];
        let Some(close) = tail.find('}') else {
            rest = tail;
            break;
        };

        let token = &tail[1..close];
        match (Placeholder::parse(token), external_id) {
            (Placeholder::Index, _) => result.push_str(&index.to_string()),
            (Placeholder::RandDigits(n), _) => result.push_str(&generate_random_digits(rng, n)),
            (Placeholder::Alphanumeric(n), _) => {
                result.extend((0..n).map(|_| char::from(rng.sample(Alphanumeric))))
            }
            (Placeholder::ExternalId, Some(id)) => result.push_str(id),
            (Placeholder::ExternalId, None) | (Placeholder::Unknown(_), _) => {
                result.push_str(&tail[..=close])
            }
        }
        rest = &tail[close + 1..];
    }

    // either no braces remain or an unclosed '{' starts the tail
    result.push_str(rest);
    result
}

/// Generate a random number with exactly N digits.
fn generate_random_digits<R: Rng>(rng: &mut R, digits: usize) -> String {
    if digits == 0 {
        return String::new();
    }

    let mut result = String::with_capacity(digits);

    // First digit should be 1-9 to avoid leading zeros
    result.push(char::from(b'0' + rng.gen_range(1..10u8)));

    for _ in 1..digits {
        result.push(char::from(b'0' + rng.gen_range(0..10u8)));
    }

    result
}
