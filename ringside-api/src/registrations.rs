use std::fmt::{self, Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::{EventId, RegistrationId};

/// A person's sign-up record for one event, either as a fighter or as a
/// trainer.
///
/// A person registers at most once per event; the server enforces the
/// unique (email, event) pair at creation time. Fighter registrations
/// are handed to the matchmaker after they are persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Registration {
    #[cfg_attr(feature = "server", serde(skip_deserializing))]
    pub id: RegistrationId,
    pub registration_type: RegistrationType,

    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,

    pub street1: String,
    pub street2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: String,

    /// Banded skill level string, e.g. "Novice: 0-2 Years". The part
    /// before the colon becomes the division criteria.
    pub skill_level: Option<String>,
    pub weight_class: Option<String>,
    pub rule_style: Option<String>,
    pub walk_around_weight: Option<f64>,

    pub gym_name: Option<String>,

    pub payment_method: Option<PaymentMethod>,
    /// Opaque payment intent reference, issued by the payment service.
    pub purchase: Option<String>,
    /// Opaque cash code reference for pay-at-the-door registrations.
    pub cash_code: Option<String>,

    pub event: EventId,
    #[serde(default)]
    pub status: RegistrationStatus,
}

impl Registration {
    /// Validates the caller supplied fields.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.first_name.trim().is_empty() {
            return Err(ValidationError::MissingField("first_name"));
        }

        if self.last_name.trim().is_empty() {
            return Err(ValidationError::MissingField("last_name"));
        }

        if !self.email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }

        if self.phone_number.trim().is_empty() {
            return Err(ValidationError::MissingField("phone_number"));
        }

        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid email address")]
    InvalidEmail,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationType {
    Fighter,
    Trainer,
}

impl RegistrationType {
    #[inline]
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Fighter => 0,
            Self::Trainer => 1,
        }
    }

    #[inline]
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Fighter),
            1 => Some(Self::Trainer),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

impl Display for Gender {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
}

/// Verification state of a registration, managed administratively.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationStatus {
    #[default]
    Pending,
    Rejected,
    Verified,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_test::{assert_tokens, Token};

    use super::{
        Gender, Registration, RegistrationStatus, RegistrationType, ValidationError,
    };
    use crate::id::{EventId, RegistrationId};

    fn registration() -> Registration {
        Registration {
            id: RegistrationId(1),
            registration_type: RegistrationType::Fighter,
            first_name: String::from("Maya"),
            last_name: String::from("Torres"),
            gender: Gender::Female,
            email: String::from("maya@example.com"),
            date_of_birth: NaiveDate::from_ymd_opt(1999, 3, 12).unwrap(),
            phone_number: String::from("555-0100"),
            street1: String::from("12 Gym Road"),
            street2: None,
            city: None,
            state: None,
            country: None,
            postal_code: String::from("90210"),
            skill_level: Some(String::from("Novice: 0-2 Years")),
            weight_class: Some(String::from("Bantamweight")),
            rule_style: None,
            walk_around_weight: None,
            gym_name: None,
            payment_method: None,
            purchase: None,
            cash_code: None,
            event: EventId(1),
            status: RegistrationStatus::Pending,
        }
    }

    #[test]
    fn test_registration_validate() {
        assert_eq!(registration().validate(), Ok(()));

        let mut invalid = registration();
        invalid.first_name = String::from("  ");
        assert_eq!(
            invalid.validate(),
            Err(ValidationError::MissingField("first_name"))
        );

        let mut invalid = registration();
        invalid.email = String::from("not-an-address");
        assert_eq!(invalid.validate(), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_registration_type_tokens() {
        assert_tokens(
            &RegistrationType::Fighter,
            &[Token::UnitVariant {
                name: "RegistrationType",
                variant: "fighter",
            }],
        );
        assert_tokens(
            &RegistrationType::Trainer,
            &[Token::UnitVariant {
                name: "RegistrationType",
                variant: "trainer",
            }],
        );
    }

    #[test]
    fn test_registration_status_default() {
        assert_eq!(RegistrationStatus::default(), RegistrationStatus::Pending);
    }

    #[test]
    fn test_registration_json_shape() {
        let value = serde_json::to_value(registration()).unwrap();

        assert_eq!(value["registration_type"], "fighter");
        assert_eq!(value["gender"], "Female");
        assert_eq!(value["status"], "Pending");
        assert_eq!(value["date_of_birth"], "1999-03-12");
    }
}
