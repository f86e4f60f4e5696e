use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{RegistrationId, SuspensionId};

/// A training or competition suspension imposed on a person.
///
/// Time-bound suspensions expire once either window has elapsed since
/// the incident; the server closes them in an hourly sweep. Indefinite
/// suspensions and medical suspensions without clearance never expire
/// on their own.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Suspension {
    #[cfg_attr(feature = "server", serde(skip_deserializing))]
    pub id: SuspensionId,
    pub person: RegistrationId,
    pub kind: SuspensionKind,
    #[serde(default)]
    pub status: SuspensionStatus,
    pub incident_date: DateTime<Utc>,
    pub days_without_training: Option<u32>,
    pub days_before_competing: Option<u32>,
    #[serde(default)]
    pub indefinite: bool,
    #[serde(default)]
    pub medical_clearance: bool,
}

impl Suspension {
    /// Whether the suspension has run out as of `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        if self.indefinite {
            return false;
        }

        if self.kind == SuspensionKind::Medical && !self.medical_clearance {
            return false;
        }

        let days_since_incident = (now - self.incident_date).num_days();

        let training_elapsed = self
            .days_without_training
            .map_or(false, |days| days_since_incident >= days as i64);
        let competing_elapsed = self
            .days_before_competing
            .map_or(false, |days| days_since_incident >= days as i64);

        training_elapsed || competing_elapsed
    }

    /// Merges the fields of `partial` into `self`.
    pub fn update(&mut self, partial: PartialSuspension) {
        if let Some(status) = partial.status {
            self.status = status;
        }

        if let Some(days_without_training) = partial.days_without_training {
            self.days_without_training = Some(days_without_training);
        }

        if let Some(days_before_competing) = partial.days_before_competing {
            self.days_before_competing = Some(days_before_competing);
        }

        if let Some(indefinite) = partial.indefinite {
            self.indefinite = indefinite;
        }

        if let Some(medical_clearance) = partial.medical_clearance {
            self.medical_clearance = medical_clearance;
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PartialSuspension {
    pub status: Option<SuspensionStatus>,
    pub days_without_training: Option<u32>,
    pub days_before_competing: Option<u32>,
    pub indefinite: Option<bool>,
    pub medical_clearance: Option<bool>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuspensionKind {
    Medical,
    Disciplinary,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuspensionStatus {
    #[default]
    Active,
    Closed,
}

impl SuspensionStatus {
    #[inline]
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Closed => 1,
        }
    }

    #[inline]
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Active),
            1 => Some(Self::Closed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::{Suspension, SuspensionKind, SuspensionStatus};
    use crate::id::{RegistrationId, SuspensionId};

    fn suspension(kind: SuspensionKind, days_ago: i64) -> Suspension {
        Suspension {
            id: SuspensionId(1),
            person: RegistrationId(1),
            kind,
            status: SuspensionStatus::Active,
            incident_date: Utc::now() - Duration::days(days_ago),
            days_without_training: Some(30),
            days_before_competing: Some(60),
            indefinite: false,
            medical_clearance: false,
        }
    }

    #[test]
    fn test_expiry_after_training_window() {
        let now = Utc::now();

        assert!(suspension(SuspensionKind::Disciplinary, 30).is_expired(now));
        assert!(!suspension(SuspensionKind::Disciplinary, 29).is_expired(now));
    }

    #[test]
    fn test_indefinite_never_expires() {
        let mut suspension = suspension(SuspensionKind::Disciplinary, 365);
        suspension.indefinite = true;

        assert!(!suspension.is_expired(Utc::now()));
    }

    #[test]
    fn test_medical_requires_clearance() {
        let now = Utc::now();

        let mut suspension = suspension(SuspensionKind::Medical, 90);
        assert!(!suspension.is_expired(now));

        suspension.medical_clearance = true;
        assert!(suspension.is_expired(now));
    }
}
