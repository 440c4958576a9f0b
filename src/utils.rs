use crate::errors::DecisionTreeError;

/// Create a string of all available items.
pub fn items_to_strings(items: Vec<&str>) -> String {
    let mut s = String::new();
    for i in items {
        s.push_str(i);
        s.push_str(&String::from(", "));
    }
    s
}

// Validation
pub fn validate_min_usize_parameter(value: usize, min: usize, parameter: &str) -> Result<(), DecisionTreeError> {
    if value < min {
        Err(DecisionTreeError::InvalidParameter(
            parameter.to_string(),
            format!("integer of at least {}", min),
            value.to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Format `numerator / denominator` with a fixed number of fractional digits,
/// rounding half up.
///
/// The rounding is done on integers, so values that sit exactly on a half
/// (like `1 / 8` at two digits) always round up. Returns `None` when the
/// denominator is zero.
pub fn format_ratio(numerator: usize, denominator: usize, decimals: u32) -> Option<String> {
    if denominator == 0 {
        return None;
    }
    let scale = 10_u128.pow(decimals);
    let (num, den) = (numerator as u128, denominator as u128);
    let scaled = (2 * num * scale + den) / (2 * den);
    let whole = scaled / scale;
    if decimals == 0 {
        return Some(whole.to_string());
    }
    let frac = scaled % scale;
    Some(format!("{}.{:0width$}", whole, frac, width = decimals as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_to_strings() {
        assert_eq!(items_to_strings(vec!["a", "b"]), "a, b, ");
    }

    #[test]
    fn test_validate_min_usize_parameter() {
        assert!(validate_min_usize_parameter(1, 1, "min_size_datalist").is_ok());
        assert_eq!(
            validate_min_usize_parameter(0, 1, "min_size_datalist"),
            Err(DecisionTreeError::InvalidParameter(
                "min_size_datalist".to_string(),
                "integer of at least 1".to_string(),
                "0".to_string()
            ))
        );
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(0, 4, 3).as_deref(), Some("0.000"));
        assert_eq!(format_ratio(1, 4, 3).as_deref(), Some("0.250"));
        assert_eq!(format_ratio(1, 3, 3).as_deref(), Some("0.333"));
        assert_eq!(format_ratio(2, 3, 3).as_deref(), Some("0.667"));
        assert_eq!(format_ratio(4, 4, 3).as_deref(), Some("1.000"));
        // Exactly half way rounds up.
        assert_eq!(format_ratio(1, 8, 2).as_deref(), Some("0.13"));
        assert_eq!(format_ratio(1, 2000, 3).as_deref(), Some("0.001"));
        assert_eq!(format_ratio(1, 2001, 3).as_deref(), Some("0.000"));
        assert_eq!(format_ratio(3, 2, 0).as_deref(), Some("2"));
        assert_eq!(format_ratio(1, 0, 3), None);
    }
}
