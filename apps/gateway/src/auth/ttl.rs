//! Token lifetime and its text form (`"7d"`, `"15m"`, `"3600"`).

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;

/// Lifetime attached to a token at signing time. Always at least one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TokenTtl(Duration);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseTtlError {
    #[error("duration is empty")]
    Empty,
    #[error("duration must be a positive whole number followed by s, m, h, d or w")]
    Malformed,
    #[error("duration must be greater than zero")]
    Zero,
    #[error("duration is too large")]
    Overflow,
}

impl TokenTtl {
    /// Seven days.
    pub const DEFAULT: TokenTtl = TokenTtl(Duration::from_secs(7 * DAY));

    /// Returns `None` for lifetimes shorter than one second.
    pub fn from_secs(secs: u64) -> Option<Self> {
        (secs > 0).then(|| Self(Duration::from_secs(secs)))
    }

    pub fn as_secs(&self) -> u64 {
        self.0.as_secs()
    }
}

impl Default for TokenTtl {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for TokenTtl {
    type Err = ParseTtlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseTtlError::Empty);
        }

        let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (digits, unit) = s.split_at(split);
        if digits.is_empty() {
            return Err(ParseTtlError::Malformed);
        }

        let multiplier = match unit {
            "" | "s" => 1,
            "m" => MINUTE,
            "h" => HOUR,
            "d" => DAY,
            "w" => WEEK,
            _ => return Err(ParseTtlError::Malformed),
        };

        let value: u64 = digits.parse().map_err(|_| ParseTtlError::Overflow)?;
        let secs = value
            .checked_mul(multiplier)
            // jsonwebtoken carries exp as i64 seconds
            .filter(|secs| *secs <= i64::MAX as u64 / 2)
            .ok_or(ParseTtlError::Overflow)?;

        Self::from_secs(secs).ok_or(ParseTtlError::Zero)
    }
}

impl fmt::Display for TokenTtl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.as_secs();
        let (value, unit) = [(WEEK, "w"), (DAY, "d"), (HOUR, "h"), (MINUTE, "m")]
            .into_iter()
            .find(|(size, _)| secs % size == 0)
            .map(|(size, unit)| (secs / size, unit))
            .unwrap_or((secs, "s"));
        write!(f, "{value}{unit}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_seven_days() {
        assert_eq!(TokenTtl::default().as_secs(), 7 * 24 * 60 * 60);
        assert_eq!("7d".parse::<TokenTtl>().unwrap(), TokenTtl::DEFAULT);
    }

    #[test]
    fn parses_units() {
        let cases = [
            ("30s", 30),
            ("15m", 15 * 60),
            ("12h", 12 * 3600),
            ("2w", 14 * 86_400),
            ("3600", 3600),
            (" 1h ", 3600),
        ];

        for (input, secs) in cases {
            let ttl: TokenTtl = input.parse().unwrap();
            assert_eq!(ttl.as_secs(), secs, "input {input:?}");
        }
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!("".parse::<TokenTtl>(), Err(ParseTtlError::Empty));
        assert_eq!("d".parse::<TokenTtl>(), Err(ParseTtlError::Malformed));
        assert_eq!("-5m".parse::<TokenTtl>(), Err(ParseTtlError::Malformed));
        assert_eq!("5 days".parse::<TokenTtl>(), Err(ParseTtlError::Malformed));
        assert_eq!("7D".parse::<TokenTtl>(), Err(ParseTtlError::Malformed));
        assert_eq!("0d".parse::<TokenTtl>(), Err(ParseTtlError::Zero));
        assert_eq!(
            "99999999999999999999w".parse::<TokenTtl>(),
            Err(ParseTtlError::Overflow)
        );
    }

    #[test]
    fn displays_largest_whole_unit() {
        assert_eq!(TokenTtl::DEFAULT.to_string(), "1w");
        assert_eq!(TokenTtl::from_secs(90).unwrap().to_string(), "90s");
        assert_eq!(TokenTtl::from_secs(7200).unwrap().to_string(), "2h");
        assert!(TokenTtl::from_secs(0).is_none());
    }
}
