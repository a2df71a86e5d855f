use crate::error::{ProcessingError, Result};

/// Parse a coordinate cell into decimal degrees.
///
/// Cells are read the lenient way spreadsheet exports need: leading
/// whitespace is skipped and the longest leading decimal number is taken,
/// so trailing units or notes do not invalidate the value.
///
/// # Examples
/// ```
/// use sheet_markers::utils::parse_coordinate;
///
/// assert_eq!(parse_coordinate(" 38.05").unwrap(), 38.05);
/// assert_eq!(parse_coordinate("138.4度").unwrap(), 138.4);
/// assert!(parse_coordinate("abc").is_err());
/// ```
pub fn parse_coordinate(coord_str: &str) -> Result<f64> {
    let trimmed = coord_str.trim_start();

    let value = leading_number(trimmed)
        .and_then(|number| number.parse::<f64>().ok())
        .filter(|value| value.is_finite());

    value.ok_or_else(|| {
        ProcessingError::InvalidFormat(format!("Invalid coordinate value: '{}'", coord_str))
    })
}

/// Longest prefix of `s` that forms a decimal number with optional sign,
/// fraction and exponent.
fn leading_number(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < len && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < len && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    Some(&s[..end])
}
