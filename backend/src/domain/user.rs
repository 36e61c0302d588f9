//! User data model.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::UserId;

/// Validation errors raised while building or patching a [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    BlankName,
    MissingEmail,
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankName => write!(f, "name must not be blank"),
            Self::MissingEmail => write!(f, "email must not be blank"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
        }
    }
}

impl std::error::Error for UserValidationError {}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Format-checked email address.
///
/// # Examples
/// ```
/// use shareit::domain::Email;
///
/// assert!(Email::new("ada@example.com").is_ok());
/// assert!(Email::new("ada.example.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::MissingEmail);
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registered user.
///
/// ## Invariants
/// - `name` is non-blank.
/// - `email` is format-checked; uniqueness is enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: Email,
}

impl User {
    /// Build a user, validating the name and email.
    pub fn try_new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::BlankName);
        }
        Ok(Self {
            id,
            name,
            email: Email::new(email)?,
        })
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Apply a partial update. Absent or blank fields keep their old values.
    pub fn patched(&self, patch: &UserPatch) -> Result<Self, UserValidationError> {
        let name = non_blank(patch.name.as_deref()).unwrap_or(&self.name);
        let email = non_blank(patch.email.as_deref()).unwrap_or(self.email.as_str());
        Self::try_new(self.id, name, email)
    }
}

/// Partial user update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
