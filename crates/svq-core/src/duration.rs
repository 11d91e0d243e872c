//! Completion-duration parsing.
//!
//! Survey platforms export the interview length in whichever format the
//! panel software produced: `H:MM:SS` (sometimes with fractional seconds or
//! a trailing `s`), a bare number of seconds, or a decimal-comma number.
//! Anything else is treated as missing, never as an error.

/// Parse a raw duration value into seconds. `None` for blank or
/// unrecognizable input.
pub fn parse_duration_seconds(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // "H:MM:SS", "H:MM:SS.5", "H:MM:SSs"
    let clock = trimmed.trim_end_matches('s');
    let parts: Vec<&str> = clock.split(':').collect();
    if parts.len() == 3
        && let (Ok(hours), Ok(minutes), Ok(seconds)) = (
            parts[0].trim().parse::<u32>(),
            parts[1].trim().parse::<u32>(),
            parts[2].trim().parse::<f64>(),
        )
    {
        return Some(f64::from(hours) * 3600.0 + f64::from(minutes) * 60.0 + seconds);
    }

    // Bare seconds.
    if let Ok(value) = trimmed.parse::<f64>() {
        return Some(value);
    }

    // Decimal comma: "123,4".
    if trimmed.contains(',')
        && let Ok(value) = trimmed.replace(',', ".").parse::<f64>()
    {
        return Some(value);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clock_format() {
        assert_eq!(parse_duration_seconds("0:05:30"), Some(330.0));
        assert_eq!(parse_duration_seconds("1:02:03"), Some(3723.0));
        assert_eq!(parse_duration_seconds("1:02:03.5"), Some(3723.5));
        assert_eq!(parse_duration_seconds("0:05:30s"), Some(330.0));
    }

    #[test]
    fn parses_bare_and_comma_numbers() {
        assert_eq!(parse_duration_seconds("330"), Some(330.0));
        assert_eq!(parse_duration_seconds("330.5"), Some(330.5));
        assert_eq!(parse_duration_seconds("123,4"), Some(123.4));
        assert_eq!(parse_duration_seconds(" 60 "), Some(60.0));
    }

    #[test]
    fn rejects_garbage_as_missing() {
        assert_eq!(parse_duration_seconds(""), None);
        assert_eq!(parse_duration_seconds("   "), None);
        assert_eq!(parse_duration_seconds("abc"), None);
        assert_eq!(parse_duration_seconds("1:02"), None);
        assert_eq!(parse_duration_seconds("a:b:c"), None);
    }
}
