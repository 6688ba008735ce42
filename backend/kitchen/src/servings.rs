use crate::quantity::{self, leading};

/// Ratio between the servings the user wants and the recipe's own.
pub fn ratio(original: u32, wanted: u32) -> f64 {
    if original == 0 {
        return 1.0;
    }

    f64::from(wanted) / f64::from(original)
}

pub fn scale_line(line: &str, ratio: f64) -> String {
    match leading(line) {
        Some(found) => format!(
            "{}{}{}",
            found.prefix,
            quantity::format(found.value * ratio),
            found.rest
        ),
        None => line.to_string(),
    }
}

pub fn scale_lines(lines: &[String], ratio: f64) -> Vec<String> {
    lines.iter().map(|line| scale_line(line, ratio)).collect()
}
