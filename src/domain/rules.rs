/// Declarative validation rules
///
/// Every entity carries a `Rules` table: an ordered list of field checks and an
/// optional unique field. The service walks the checks in order and reports the
/// first violated one; the unique field drives both the service pre-check and the
/// UNIQUE index in storage.

use once_cell::sync::Lazy;
use regex::Regex;

/// Basic e-mail shape: local part of `[A-Za-z0-9+_.-]`, an `@`, then anything
pub static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@(.+)$").expect("valid e-mail regex")
});

/// A single required-field check with the message reported on failure
pub enum Check<E> {
    /// String must contain something other than whitespace
    NotBlank(fn(&E) -> &str, &'static str),
    /// Optional value (date, number, reference) must be supplied
    Present(fn(&E) -> bool, &'static str),
    /// String must match the pattern
    Matches(fn(&E) -> &str, &'static Regex, &'static str),
    /// String length in characters must lie within `min..=max`
    Length(fn(&E) -> &str, usize, usize, &'static str),
}

impl<E> Check<E> {
    fn message_if_violated(&self, entity: &E) -> Option<&'static str> {
        let passed = match self {
            Check::NotBlank(value, _) => !value(entity).trim().is_empty(),
            Check::Present(present, _) => present(entity),
            Check::Matches(value, pattern, _) => pattern.is_match(value(entity)),
            Check::Length(value, min, max, _) => (*min..=*max).contains(&value(entity).chars().count()),
        };
        if passed {
            return None;
        }
        match self {
            Check::NotBlank(_, message)
            | Check::Present(_, message)
            | Check::Matches(_, _, message)
            | Check::Length(_, _, _, message) => Some(*message),
        }
    }
}

/// Field whose value must be distinct across all records of an entity
pub struct UniqueField<E> {
    /// Subject used in duplicate messages (e.g. "Contact")
    pub subject: &'static str,
    /// Field label used in duplicate messages (e.g. "email")
    pub field: &'static str,
    /// Storage column carrying the UNIQUE index
    pub column: &'static str,
    pub value: fn(&E) -> &str,
}

impl<E> UniqueField<E> {
    /// Message reported when `value` is already taken
    pub fn duplicate_message(&self, value: &str) -> String {
        format!("{} with {} {} already exists", self.subject, self.field, value)
    }
}

/// Validation rule table for one entity type
pub struct Rules<E> {
    pub checks: Vec<Check<E>>,
    pub unique: Option<UniqueField<E>>,
}

impl<E> Rules<E> {
    /// Run the checks in order; the first failure wins
    pub fn validate(&self, entity: &E) -> Result<(), &'static str> {
        match self.checks.iter().find_map(|check| check.message_if_violated(entity)) {
            Some(message) => Err(message),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Sample {
        name: String,
        email: String,
        zip: Option<i64>,
    }

    fn rules() -> Rules<Sample> {
        Rules {
            checks: vec![
                Check::Matches(|s| s.email.as_str(), &EMAIL_PATTERN, "Invalid email format"),
                Check::NotBlank(|s| s.name.as_str(), "Name is required"),
                Check::Present(|s| s.zip.is_some(), "ZIP code is required"),
            ],
            unique: Some(UniqueField {
                subject: "Sample",
                field: "name",
                column: "name",
                value: |s| s.name.as_str(),
            }),
        }
    }

    #[test]
    fn first_failing_check_is_reported() {
        let sample = Sample::default();
        assert_eq!(rules().validate(&sample), Err("Invalid email format"));

        let sample = Sample { email: "a@b".into(), name: "   ".into(), ..Default::default() };
        assert_eq!(rules().validate(&sample), Err("Name is required"));

        let sample = Sample { email: "a@b".into(), name: "x".into(), zip: None };
        assert_eq!(rules().validate(&sample), Err("ZIP code is required"));
    }

    #[test]
    fn complete_record_passes() {
        let sample = Sample { email: "jane.doe+crm@example.org".into(), name: "Jane".into(), zip: Some(10115) };
        assert_eq!(rules().validate(&sample), Ok(()));
    }

    #[test]
    fn email_pattern_accepts_anything_after_at() {
        assert!(EMAIL_PATTERN.is_match("x@y"));
        assert!(EMAIL_PATTERN.is_match("first_last-1@sub.domain"));
        assert!(!EMAIL_PATTERN.is_match("@example.org"));
        assert!(!EMAIL_PATTERN.is_match("no-at-sign"));
        assert!(!EMAIL_PATTERN.is_match("sp ace@example.org"));
        assert!(!EMAIL_PATTERN.is_match("name@"));
    }

    #[test]
    fn length_counts_characters_inclusively() {
        let check: Check<Sample> = Check::Length(|s| s.name.as_str(), 2, 4, "Name must be between 2 and 4 characters");
        let sized = |name: &str| Sample { name: name.into(), ..Default::default() };

        assert_eq!(check.message_if_violated(&sized("a")), Some("Name must be between 2 and 4 characters"));
        assert_eq!(check.message_if_violated(&sized("ab")), None);
        assert_eq!(check.message_if_violated(&sized("äöüß")), None);
        assert!(check.message_if_violated(&sized("abcde")).is_some());
    }

    #[test]
    fn duplicate_message_names_subject_field_and_value() {
        let unique = rules().unique.expect("unique field");
        assert_eq!(unique.duplicate_message("Tech"), "Sample with name Tech already exists");
    }
}
