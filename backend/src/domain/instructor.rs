//! Instructor data model and field validation.
//!
//! Clients submit an [`InstructorPayload`]; converting it into an
//! [`InstructorDraft`] collects every field-level problem at once so callers
//! can report them together.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::FieldError;

/// Shortest accepted first or last name, in characters.
pub const NAME_MIN_CHARS: usize = 2;
/// Longest accepted first or last name, in characters.
pub const NAME_MAX_CHARS: usize = 20;

/// Surrogate instructor identifier assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstructorId(i64);

impl InstructorId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for InstructorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unvalidated instructor fields as supplied by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorPayload {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Instructor fields that passed validation but have not been stored.
///
/// Email uniqueness needs storage access and is checked by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructorDraft {
    first_name: String,
    last_name: String,
    email: String,
}

impl InstructorDraft {
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^@\s]+@[^@\s]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn validate_name(
    value: Option<String>,
    field: &str,
    label: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let Some(value) = value else {
        errors.push(FieldError::new(field, format!("{label} is required")));
        return None;
    };
    let length = value.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&length) {
        errors.push(FieldError::new(
            field,
            format!("{label} must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"),
        ));
        return None;
    }
    Some(value)
}

fn validate_email(value: Option<String>, errors: &mut Vec<FieldError>) -> Option<String> {
    let Some(value) = value else {
        errors.push(FieldError::new("email", "Email is required"));
        return None;
    };
    if !email_regex().is_match(&value) {
        errors.push(FieldError::new("email", "Email should be valid"));
        return None;
    }
    Some(value)
}

impl TryFrom<InstructorPayload> for InstructorDraft {
    type Error = Vec<FieldError>;

    fn try_from(payload: InstructorPayload) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();
        let first_name = validate_name(payload.first_name, "firstName", "First name", &mut errors);
        let last_name = validate_name(payload.last_name, "lastName", "Last name", &mut errors);
        let email = validate_email(payload.email, &mut errors);

        match (first_name, last_name, email) {
            (Some(first_name), Some(last_name), Some(email)) if errors.is_empty() => Ok(Self {
                first_name,
                last_name,
                email,
            }),
            _ => Err(errors),
        }
    }
}

/// Stored instructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instructor {
    id: InstructorId,
    first_name: String,
    last_name: String,
    email: String,
}

impl Instructor {
    /// Rebuild an instructor read back from storage without revalidating it.
    pub fn restore(id: InstructorId, first_name: String, last_name: String, email: String) -> Self {
        Self {
            id,
            first_name,
            last_name,
            email,
        }
    }

    /// Attach a storage identifier to validated fields.
    pub fn new(id: InstructorId, draft: InstructorDraft) -> Self {
        let InstructorDraft {
            first_name,
            last_name,
            email,
        } = draft;
        Self {
            id,
            first_name,
            last_name,
            email,
        }
    }

    pub fn id(&self) -> InstructorId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for instructor validation.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn payload() -> InstructorPayload {
        InstructorPayload {
            first_name: Some("Ada".to_owned()),
            last_name: Some("Lovelace".to_owned()),
            email: Some("ada@example.org".to_owned()),
        }
    }

    fn rejected_fields(payload: InstructorPayload) -> Vec<(String, String)> {
        InstructorDraft::try_from(payload)
            .expect_err("payload should be rejected")
            .into_iter()
            .map(|error| (error.field, error.message))
            .collect()
    }

    #[rstest]
    fn accepts_valid_payload(payload: InstructorPayload) {
        let draft = InstructorDraft::try_from(payload).expect("valid payload");
        assert_eq!(draft.first_name(), "Ada");
        assert_eq!(draft.email(), "ada@example.org");
    }

    #[rstest]
    #[case("A")]
    #[case("Bartholomew-Maximilian")]
    fn rejects_first_names_outside_bounds(mut payload: InstructorPayload, #[case] name: &str) {
        payload.first_name = Some(name.to_owned());
        assert_eq!(
            rejected_fields(payload),
            [(
                "firstName".to_owned(),
                "First name must be between 2 and 20 characters".to_owned()
            )]
        );
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("ada@@example.org")]
    #[case("ada lovelace@example.org")]
    #[case(" ada@example.org")]
    fn rejects_malformed_email(mut payload: InstructorPayload, #[case] email: &str) {
        payload.email = Some(email.to_owned());
        assert_eq!(
            rejected_fields(payload),
            [("email".to_owned(), "Email should be valid".to_owned())]
        );
    }

    #[rstest]
    fn reports_every_missing_field() {
        let fields: Vec<String> = rejected_fields(InstructorPayload::default())
            .into_iter()
            .map(|(field, _)| field)
            .collect();
        assert_eq!(fields, ["firstName", "lastName", "email"]);
    }

    #[rstest]
    #[case("ops@localhost")]
    #[case("ada@example.org")]
    fn accepts_addresses_with_any_domain(mut payload: InstructorPayload, #[case] email: &str) {
        payload.email = Some(email.to_owned());
        let draft = InstructorDraft::try_from(payload).expect("valid email");
        assert_eq!(draft.email(), email);
    }

    #[rstest]
    fn keeps_names_as_submitted(mut payload: InstructorPayload) {
        payload.first_name = Some(" Ada".to_owned());
        let draft = InstructorDraft::try_from(payload).expect("valid payload");
        assert_eq!(draft.first_name(), " Ada");
    }

    #[rstest]
    fn counts_characters_not_bytes(mut payload: InstructorPayload) {
        payload.last_name = Some("Żółć".to_owned());
        assert!(InstructorDraft::try_from(payload).is_ok());
    }
}
