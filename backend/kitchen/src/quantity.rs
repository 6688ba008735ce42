//! Leading quantities on free-text ingredient lines.
//!
//! Accepted forms: `2`, `2.5`, `1/2`, `1 1/2`. The token must be followed by
//! whitespace or the end of the line, so `1.5kg` or `2-3 tomatoes` are left alone.
use std::sync::LazyLock;

use regex::Regex;

static LEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<prefix>\s*)(?P<qty>\d+\s+\d+/\d+|\d+/\d+|\d+(?:\.\d+)?)(?:\s|$)").unwrap()
});

#[derive(Debug, PartialEq)]
pub struct Leading<'a> {
    pub value: f64,
    pub prefix: &'a str,
    pub rest: &'a str,
}

pub fn leading(line: &str) -> Option<Leading<'_>> {
    let captures = LEADING.captures(line)?;
    let qty = captures.name("qty")?;
    let value = parse(qty.as_str())?;

    Some(Leading {
        value,
        prefix: captures.name("prefix").map_or("", |m| m.as_str()),
        rest: &line[qty.end()..],
    })
}

/// Parses a number, fraction or mixed number. No arithmetic beyond that.
pub fn parse(token: &str) -> Option<f64> {
    let mut parts = token.split_whitespace();
    let first = parts.next()?;

    let value = match parts.next() {
        Some(fraction) => whole(first)? + ratio(fraction)?,
        None if first.contains('/') => ratio(first)?,
        None => first.parse::<f64>().ok()?,
    };

    if parts.next().is_some() || !value.is_finite() {
        return None;
    }

    Some(value)
}

fn whole(token: &str) -> Option<f64> {
    token.parse::<u32>().ok().map(f64::from)
}

fn ratio(token: &str) -> Option<f64> {
    let (numerator, denominator) = token.split_once('/')?;
    let numerator = whole(numerator)?;
    let denominator = whole(denominator)?;

    if denominator == 0.0 {
        return None;
    }

    Some(numerator / denominator)
}

/// Rounds to one decimal, dropping a trailing `.0`.
pub fn format(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;

    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::{format, leading, parse};

    #[test]
    fn test_parse_forms() {
        assert_eq!(parse("2"), Some(2.0));
        assert_eq!(parse("2.5"), Some(2.5));
        assert_eq!(parse("1/2"), Some(0.5));
        assert_eq!(parse("1 1/2"), Some(1.5));
    }

    #[test]
    fn test_parse_rejects() {
        assert_eq!(parse("1/0"), None);
        assert_eq!(parse("abc"), None);
        assert_eq!(parse("1 2"), None);
        assert_eq!(parse(""), None);
        assert_eq!(parse("2*3"), None);
    }

    #[test]
    fn test_leading() {
        let found = leading("1 1/2 cups water").unwrap();

        assert_eq!(found.value, 1.5);
        assert_eq!(found.prefix, "");
        assert_eq!(found.rest, " cups water");

        let found = leading("  3 cloves").unwrap();
        assert_eq!(found.prefix, "  ");
        assert_eq!(found.rest, " cloves");

        assert_eq!(leading("4").unwrap().rest, "");
    }

    #[test]
    fn test_leading_none() {
        assert!(leading("Salt to taste").is_none());
        assert!(leading("1.5kg mutton").is_none());
        assert!(leading("2-3 tomatoes").is_none());
        assert!(leading("1/0 cup").is_none());
    }

    #[test]
    fn test_format() {
        assert_eq!(format(2.0), "2");
        assert_eq!(format(0.75), "0.8");
        assert_eq!(format(1.04), "1");
        assert_eq!(format(3.25), "3.3");
    }
}
