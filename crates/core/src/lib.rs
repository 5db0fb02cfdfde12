#![forbid(unsafe_code)]

pub mod posts;

pub use posts::*;

pub mod ids {
    /// Parses the leading integer of `value` the way the HTTP surface expects:
    /// optional whitespace, optional sign, then at least one digit. Anything
    /// after the digits is ignored. Values past the `i64` range saturate.
    pub fn parse_leading_int(value: &str) -> Option<i64> {
        let value = value.trim_start();
        let (negative, digits) = match value.as_bytes().first() {
            Some(b'-') => (true, &value[1..]),
            Some(b'+') => (false, &value[1..]),
            _ => (false, value),
        };

        let end = digits
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(digits.len());
        if end == 0 {
            return None;
        }

        let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
        Some(if negative { -magnitude } else { magnitude })
    }

    /// A leading integer that is at least 1, or `fallback`.
    pub fn positive_or(value: Option<&str>, fallback: i64) -> i64 {
        value
            .and_then(parse_leading_int)
            .filter(|parsed| *parsed >= 1)
            .unwrap_or(fallback)
    }
}

pub mod board {
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Board {
        #[default]
        Free,
        Notice,
    }

    impl Board {
        pub const ALL: [Board; 2] = [Board::Free, Board::Notice];

        /// `"notice"` selects the notice board; anything else lands on `free`.
        pub fn coerce(value: Option<&str>) -> Self {
            match value {
                Some("notice") => Board::Notice,
                _ => Board::Free,
            }
        }

        pub fn code(self) -> &'static str {
            match self {
                Board::Free => "free",
                Board::Notice => "notice",
            }
        }

        pub fn default_name(self) -> &'static str {
            match self {
                Board::Free => "Free board",
                Board::Notice => "Notices",
            }
        }

        pub fn from_code(code: &str) -> Option<Self> {
            Self::ALL.into_iter().find(|board| board.code() == code)
        }
    }

    impl std::fmt::Display for Board {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.code())
        }
    }
}

pub mod clock {
    use time::OffsetDateTime;
    use time::format_description::well_known::Rfc3339;

    pub fn now_ms_i64() -> i64 {
        let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
        let ms = nanos / 1_000_000i128;
        if ms <= 0 {
            0
        } else if ms >= i64::MAX as i128 {
            i64::MAX
        } else {
            ms as i64
        }
    }

    pub fn format_ts_ms(ts_ms: i64) -> String {
        let nanos = (ts_ms as i128) * 1_000_000i128;
        let dt =
            OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or(OffsetDateTime::UNIX_EPOCH);
        dt.format(&Rfc3339)
            .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
    }

    /// `2024-05-01T09:30:12Z` → `2024-05-01 09:30`.
    pub fn display_ts(value: &str) -> String {
        value.replacen('T', " ", 1).chars().take(16).collect()
    }
}
