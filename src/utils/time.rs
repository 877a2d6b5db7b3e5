//! Time utilities: fixed UTC offsets.

use crate::errors::{AppError, AppResult};
use chrono::FixedOffset;

/// Parse a fixed UTC offset: `+HH:MM`, `-HH:MM`, `+HHMM`, `Z` or `UTC`.
pub fn parse_utc_offset(s: &str) -> AppResult<FixedOffset> {
    let t = s.trim();
    if t.eq_ignore_ascii_case("z") || t.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(|| AppError::InvalidOffset(s.to_string()));
    }

    let invalid = || AppError::InvalidOffset(s.to_string());

    let (sign, rest) = match t.chars().next() {
        Some('+') => (1, &t[1..]),
        Some('-') => (-1, &t[1..]),
        _ => return Err(invalid()),
    };

    if !rest.is_ascii() {
        return Err(invalid());
    }

    let (hh, mm) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => return Err(invalid()),
    };

    if hh.len() != 2 || mm.len() != 2 {
        return Err(invalid());
    }

    let hours: i32 = hh.parse().map_err(|_| invalid())?;
    let minutes: i32 = mm.parse().map_err(|_| invalid())?;
    if hours > 14 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_offsets() {
        assert_eq!(parse_utc_offset("+05:30").unwrap().local_minus_utc(), 19_800);
        assert_eq!(parse_utc_offset("-08:00").unwrap().local_minus_utc(), -28_800);
        assert_eq!(parse_utc_offset("+0545").unwrap().local_minus_utc(), 20_700);
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset(" utc ").unwrap().local_minus_utc(), 0);
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "05:30", "+5:30", "+05:3", "+15:00", "+05:60", "Asia/Kolkata", "+aé1", "-é:00"] {
            assert!(parse_utc_offset(bad).is_err(), "{bad} should be rejected");
        }
    }
}
