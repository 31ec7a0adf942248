use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(String),
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

pub trait FormField {
    fn name(&self) -> Option<String>;
    fn id(&self) -> Option<String>;
    fn value(&self) -> String;

    fn label(&self) -> String {
        self.name()
            .filter(|name| !name.is_empty())
            .or_else(|| self.id().filter(|id| !id.is_empty()))
            .unwrap_or_else(|| "Field".to_string())
    }
}

#[derive(Debug)]
pub struct Invalid<'f, F> {
    pub field: &'f F,
    pub error: FieldError,
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Checks every required field for a non-blank value, then the email field's
/// shape when it holds anything. Failures are reported in that order.
pub fn validate<'f, F: FormField>(
    required: &'f [F],
    email: Option<&'f F>,
) -> Result<(), Vec<Invalid<'f, F>>> {
    let mut invalid: Vec<Invalid<'f, F>> = required
        .iter()
        .filter(|field| field.value().trim().is_empty())
        .map(|field| Invalid {
            field,
            error: FieldError::Required(field.label()),
        })
        .collect();

    if let Some(field) = email {
        let value = field.value();
        if !value.is_empty() && !is_valid_email(&value) {
            invalid.push(Invalid {
                field,
                error: FieldError::InvalidEmail,
            });
        }
    }

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Field {
        name: &'static str,
        id: &'static str,
        value: &'static str,
    }

    impl FormField for Field {
        fn name(&self) -> Option<String> {
            Some(self.name.to_string())
        }
        fn id(&self) -> Option<String> {
            Some(self.id.to_string())
        }
        fn value(&self) -> String {
            self.value.to_string()
        }
    }

    fn field(name: &'static str, id: &'static str, value: &'static str) -> Field {
        Field { name, id, value }
    }

    fn messages(invalid: &[Invalid<'_, Field>]) -> Vec<String> {
        invalid.iter().map(|i| i.error.to_string()).collect()
    }

    #[test]
    fn empty_required_email_is_reported_once() {
        let required = [field("email", "", "")];
        let invalid = validate(&required, Some(&required[0])).unwrap_err();
        assert_eq!(messages(&invalid), vec!["email is required"]);
        assert_eq!(invalid[0].field, &required[0]);
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let required = [field("message", "", "   \n")];
        let invalid = validate(&required, None).unwrap_err();
        assert_eq!(invalid[0].error, FieldError::Required("message".to_string()));
    }

    #[test]
    fn label_falls_back_to_id_then_generic() {
        let required = [field("", "phone", ""), field("", "", "")];
        let invalid = validate(&required, None).unwrap_err();
        assert_eq!(
            messages(&invalid),
            vec!["phone is required", "Field is required"]
        );
    }

    #[test]
    fn malformed_email_is_rejected() {
        let required: [Field; 0] = [];
        let email = field("email", "email", "not-an-email");
        let invalid = validate(&required, Some(&email)).unwrap_err();
        assert_eq!(messages(&invalid), vec!["Please enter a valid email address"]);
    }

    #[test]
    fn well_formed_email_passes() {
        let required = [field("name", "name", "Ada"), field("email", "email", "user@example.com")];
        assert!(validate(&required, Some(&required[1])).is_ok());
    }

    #[test]
    fn optional_empty_email_is_not_checked() {
        let required: [Field; 0] = [];
        let email = field("email", "email", "");
        assert!(validate(&required, Some(&email)).is_ok());
    }

    #[test]
    fn required_and_format_errors_accumulate() {
        let required = [field("name", "", "")];
        let email = field("email", "", "a@b");
        let invalid = validate(&required, Some(&email)).unwrap_err();
        assert_eq!(
            messages(&invalid),
            vec!["name is required", "Please enter a valid email address"]
        );
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("@example.com"));
    }
}
