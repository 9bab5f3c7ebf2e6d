//! Contact identity shared by every entity that represents a person.

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::domain::types::{ContactEmail, ContactPhone, PersonName, TypeConstraintError};

/// Name and contact details of a person.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactInfo {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: ContactEmail,
    pub phone: ContactPhone,
}

impl ContactInfo {
    #[must_use]
    pub fn new(
        first_name: PersonName,
        last_name: PersonName,
        email: ContactEmail,
        phone: ContactPhone,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            phone,
        }
    }

    /// Builds contact info from raw strings, rejecting empty values.
    pub fn try_new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            first_name: PersonName::new(first_name)?,
            last_name: PersonName::new(last_name)?,
            email: ContactEmail::new(email)?,
            phone: ContactPhone::new(phone)?,
        })
    }

    /// Returns `true` when the email looks like `local@domain.tld`.
    ///
    /// The local part may only hold ASCII letters, digits and `._%+-`, the
    /// domain letters, digits, `.` and `-`, and the top-level domain at least
    /// two ASCII letters.
    pub fn validate_email(&self) -> bool {
        let email = self.email.as_str();
        let Some((local, domain)) = email.rsplit_once('@') else {
            return false;
        };
        let Some((_, tld)) = domain.rsplit_once('.') else {
            return false;
        };

        email.validate_email()
            && !local.is_empty()
            && local
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b"._%+-".contains(&b))
            && domain
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-')
            && tld.len() >= 2
            && tld.bytes().all(|b| b.is_ascii_alphabetic())
    }

    /// Returns `true` for an optional `+` followed by 10 to 12 digits.
    pub fn validate_phone(&self) -> bool {
        let phone = self.phone.as_str();
        let digits = phone.strip_prefix('+').unwrap_or(phone);
        (10..=12).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
    }

    /// Runs both format checks, reporting the first failure.
    pub fn validate(&self) -> Result<(), TypeConstraintError> {
        if !self.validate_email() {
            return Err(TypeConstraintError::InvalidEmail);
        }
        if !self.validate_phone() {
            return Err(TypeConstraintError::InvalidPhone);
        }
        Ok(())
    }
}

/// Capability of entities carrying a contact identity.
pub trait Person {
    fn contact(&self) -> &ContactInfo;

    fn full_name(&self) -> String {
        let contact = self.contact();
        format!("{} {}", contact.first_name, contact.last_name)
    }

    /// Advisory format check of the email and phone; storage never calls it.
    fn validate_contact(&self) -> Result<(), TypeConstraintError> {
        self.contact().validate()
    }
}

impl Person for ContactInfo {
    fn contact(&self) -> &ContactInfo {
        self
    }
}
