use anyhow::{Context, Result, bail};
use chrono::{Duration, Local};
use serde::Serialize;
use std::process;

/// Resolve an optional date argument to a `YYYY-MM-DD` string.
/// Accepts ISO dates plus today/yesterday/tomorrow; `None` means today.
pub(crate) fn parse_date(date_str: Option<String>) -> Result<String> {
    let today = Local::now().date_naive();
    let date = match date_str.as_deref() {
        None | Some("today") => today,
        Some("yesterday") => today - Duration::days(1),
        Some("tomorrow") => today + Duration::days(1),
        Some(s) => {
            fitlog_core::models::validate_date(s).with_context(|| {
                format!("Invalid date '{s}'. Use YYYY-MM-DD or today/yesterday/tomorrow")
            })?
        }
    };
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Parse a grams argument like "150" or "150g"; must be positive.
pub(crate) fn parse_grams(s: &str) -> Result<f64> {
    let trimmed = s.trim().trim_end_matches('g').trim();
    let value: f64 = trimmed
        .parse()
        .with_context(|| format!("Invalid grams value: '{s}'. Use a number like '150' or '150g'"))?;
    if value <= 0.0 {
        bail!("Grams must be greater than 0");
    }
    Ok(value)
}

/// Validate a per-100g nutrition value from the command line.
pub(crate) fn parse_per_100g(label: &str, value: f64) -> Result<f64> {
    if value < 0.0 {
        bail!("{label} per 100g must not be negative");
    }
    Ok(value)
}

/// Report a record that does not exist and exit with the "nothing found"
/// code, the same way an empty listing does: JSON to stdout when requested,
/// plain text to stderr otherwise.
pub(crate) fn exit_not_found(message: &str, json: bool) -> ! {
    if json {
        println!("{}", json_error(message));
    } else {
        eprintln!("{message}");
    }
    process::exit(2);
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_none_is_today() {
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        assert_eq!(parse_date(None).unwrap(), today);
    }

    #[test]
    fn test_parse_date_keywords() {
        let today = Local::now().date_naive();
        assert_eq!(
            parse_date(Some("yesterday".to_string())).unwrap(),
            (today - Duration::days(1)).format("%Y-%m-%d").to_string()
        );
        assert_eq!(
            parse_date(Some("tomorrow".to_string())).unwrap(),
            (today + Duration::days(1)).format("%Y-%m-%d").to_string()
        );
    }

    #[test]
    fn test_parse_date_iso() {
        assert_eq!(
            parse_date(Some("2024-01-15".to_string())).unwrap(),
            "2024-01-15"
        );
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date(Some("nope".to_string())).is_err());
        assert!(parse_date(Some("2024-02-30".to_string())).is_err());
    }

    #[test]
    fn test_parse_grams() {
        assert!((parse_grams("150").unwrap() - 150.0).abs() < f64::EPSILON);
        assert!((parse_grams("150g").unwrap() - 150.0).abs() < f64::EPSILON);
        assert!((parse_grams("62.5g").unwrap() - 62.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_grams_invalid() {
        assert!(parse_grams("abc").is_err());
        assert!(parse_grams("0").is_err());
        assert!(parse_grams("-50g").is_err());
    }

    #[test]
    fn test_parse_per_100g() {
        assert!((parse_per_100g("Calories", 165.0).unwrap() - 165.0).abs() < f64::EPSILON);
        assert!(parse_per_100g("Calories", -1.0).is_err());
    }

    #[test]
    fn test_json_error_shape() {
        assert_eq!(
            json_error("Session abc123 not found"),
            r#"{"error":"Session abc123 not found"}"#
        );
        // Quotes in the message must stay valid JSON
        assert_eq!(
            json_error(r#"no food named "egg""#),
            r#"{"error":"no food named \"egg\""}"#
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world this is long", 10), "hello w...");
    }

    #[test]
    fn test_truncate_utf8() {
        // Should not panic on multi-byte characters
        assert_eq!(truncate("Crème fraîche", 10), "Crème f...");
        assert_eq!(truncate("Müsli", 10), "Müsli");
    }
}
