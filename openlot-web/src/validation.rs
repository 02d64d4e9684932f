//! Form validation support
//!
//! Form structs derive `validator::Validate` for the shape rules (non-empty,
//! length bounds, email format); the helpers here flatten the result into an
//! ordered error list and cover the rules the derive cannot express
//! (numeric parsing of form strings, the four-digit year, the alphanumeric
//! classification name).
//!
//! Policy, uniform across every form: collect all field errors rather than
//! failing fast, then re-render the originating view with the error list
//! and every previously submitted value so no user input is lost. Handlers
//! only reach the database once the list is empty.

use validator::ValidationErrors;

/// A single field-level validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,

    /// Human-readable message
    pub message: String,
}

impl FieldError {
    /// Creates a field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Flattens `validator` output into an ordered error list
///
/// Sorted by field name so re-renders are deterministic.
pub fn collect_errors(result: Result<(), ValidationErrors>) -> Vec<FieldError> {
    let Err(errors) = result else {
        return Vec::new();
    };

    let mut out: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();

    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

/// Parses a form string as an integer no smaller than `min`
pub fn parse_int_min(value: &str, min: i32) -> Option<i32> {
    value
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|n| *n >= min)
}

/// Parses a form string as a non-negative price
pub fn parse_price(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
}

/// Whether a form string is exactly four ASCII digits
pub fn is_four_digit_year(value: &str) -> bool {
    let value = value.trim();
    value.len() == 4 && value.chars().all(|c| c.is_ascii_digit())
}

/// Whether a classification name is non-empty alphanumeric
///
/// No spaces or punctuation, matching `^[A-Za-z0-9]+$`.
pub fn is_alphanumeric_name(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct SampleForm {
        #[validate(length(min = 1, message = "First name is required."))]
        firstname: String,

        #[validate(email(message = "A valid email is required."))]
        email: String,
    }

    #[test]
    fn test_collect_errors_collects_all_fields() {
        let form = SampleForm {
            firstname: String::new(),
            email: "not-an-email".to_string(),
        };

        let errors = collect_errors(form.validate());
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "email");
        assert_eq!(errors[0].message, "A valid email is required.");
        assert_eq!(errors[1].field, "firstname");
    }

    #[test]
    fn test_collect_errors_empty_on_valid() {
        let form = SampleForm {
            firstname: "Pat".to_string(),
            email: "pat@example.com".to_string(),
        };

        assert!(collect_errors(form.validate()).is_empty());
    }

    #[test]
    fn test_parse_int_min() {
        assert_eq!(parse_int_min("5", 1), Some(5));
        assert_eq!(parse_int_min(" 12 ", 1), Some(12));
        assert_eq!(parse_int_min("0", 1), None);
        assert_eq!(parse_int_min("-3", 0), None);
        assert_eq!(parse_int_min("6x", 1), None);
        assert_eq!(parse_int_min("", 1), None);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("24999.99"), Some(24999.99));
        assert_eq!(parse_price("0"), Some(0.0));
        assert_eq!(parse_price("-5"), None);
        assert_eq!(parse_price("NaN"), None);
        assert_eq!(parse_price("abc"), None);
    }

    #[test]
    fn test_is_four_digit_year() {
        assert!(is_four_digit_year("1999"));
        assert!(is_four_digit_year(" 2024 "));
        assert!(!is_four_digit_year("99"));
        assert!(!is_four_digit_year("20245"));
        assert!(!is_four_digit_year("twenty"));
    }

    #[test]
    fn test_is_alphanumeric_name() {
        assert!(is_alphanumeric_name("Sedan"));
        assert!(is_alphanumeric_name("SUV4x4".trim()));
        assert!(!is_alphanumeric_name("Sport Utility"));
        assert!(!is_alphanumeric_name("Trucks!"));
        assert!(!is_alphanumeric_name(""));
    }
}
