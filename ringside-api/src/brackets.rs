use std::fmt::{self, Display, Formatter};

use ringside_core::{AgeClass, Division, DivisionKey, Error};
use serde::{Deserialize, Serialize};

use crate::id::{BoutId, BracketId, EventId, RegistrationId};

/// A single division within one event, holding the ordered fighter
/// roster to be paired into bouts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Bracket {
    #[cfg_attr(feature = "server", serde(skip_deserializing))]
    pub id: BracketId,
    pub event: EventId,
    /// Unique within the event.
    pub bracket_number: u32,
    pub division_title: String,
    pub max_competitors: u32,
    #[serde(default)]
    pub status: BracketStatus,

    pub age_class: AgeClass,
    /// Sport label composed with the gender, e.g. "Kickboxing (Male)".
    pub sport: String,
    pub rule_style: String,
    #[serde(default)]
    pub bracket_criteria: String,
    pub weight_class: Option<String>,

    #[serde(default)]
    pub fighters: Vec<FighterSeed>,
    #[serde(default)]
    pub bouts: Vec<BoutId>,
}

impl Bracket {
    /// Appends a fighter to the roster with the next sequential seed
    /// and returns that seed. Existing seeds are never renumbered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] when the roster already
    /// holds `max_competitors` fighters.
    pub fn push_fighter(&mut self, fighter: RegistrationId) -> Result<u32, Error> {
        if self.fighters.len() >= self.max_competitors as usize {
            return Err(Error::CapacityExceeded);
        }

        let seed = ringside_core::next_seed(self.fighters.len());
        self.fighters.push(FighterSeed { fighter, seed });

        Ok(seed)
    }

    #[inline]
    pub fn contains_fighter(&self, id: RegistrationId) -> bool {
        self.fighters.iter().any(|entry| entry.fighter == id)
    }

    /// Merges the fields of `partial` into `self`. Capacity and
    /// collision guards run at the service layer before this is called.
    pub fn update(&mut self, partial: PartialBracket) {
        if let Some(bracket_number) = partial.bracket_number {
            self.bracket_number = bracket_number;
        }

        if let Some(division_title) = partial.division_title {
            self.division_title = division_title;
        }

        if let Some(max_competitors) = partial.max_competitors {
            self.max_competitors = max_competitors;
        }

        if let Some(status) = partial.status {
            self.status = status;
        }

        if let Some(age_class) = partial.age_class {
            self.age_class = age_class;
        }

        if let Some(sport) = partial.sport {
            self.sport = sport;
        }

        if let Some(rule_style) = partial.rule_style {
            self.rule_style = rule_style;
        }

        if let Some(bracket_criteria) = partial.bracket_criteria {
            self.bracket_criteria = bracket_criteria;
        }

        if let Some(weight_class) = partial.weight_class {
            self.weight_class = Some(weight_class);
        }

        if let Some(fighters) = partial.fighters {
            self.fighters = fighters;
        }
    }
}

impl Division for Bracket {
    fn is_open(&self) -> bool {
        self.status == BracketStatus::Open
    }

    fn fighter_count(&self) -> usize {
        self.fighters.len()
    }

    fn capacity(&self) -> usize {
        self.max_competitors as usize
    }

    fn matches(&self, key: &DivisionKey) -> bool {
        self.age_class == key.age_class
            && self.sport == key.sport
            && self.rule_style == key.rule_style
            && self.bracket_criteria == key.criteria
    }
}

/// One entry in a bracket roster: the fighter and the fixed seed
/// position assigned in registration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterSeed {
    pub fighter: RegistrationId,
    pub seed: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PartialBracket {
    pub bracket_number: Option<u32>,
    pub division_title: Option<String>,
    pub max_competitors: Option<u32>,
    pub status: Option<BracketStatus>,
    pub age_class: Option<AgeClass>,
    pub sport: Option<String>,
    pub rule_style: Option<String>,
    pub bracket_criteria: Option<String>,
    pub weight_class: Option<String>,
    pub fighters: Option<Vec<FighterSeed>>,
}

/// Lifecycle state of a bracket. Only `Open` brackets are eligible
/// matchmaking targets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BracketStatus {
    #[default]
    Open,
    Started,
    Completed,
    Cancelled,
    #[serde(rename = "Not Ready Yet")]
    NotReadyYet,
    #[serde(rename = "Closed To New Participants")]
    ClosedToNewParticipants,
    Undefined,
}

impl BracketStatus {
    #[inline]
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Started => 1,
            Self::Completed => 2,
            Self::Cancelled => 3,
            Self::NotReadyYet => 4,
            Self::ClosedToNewParticipants => 5,
            Self::Undefined => 6,
        }
    }

    #[inline]
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Open),
            1 => Some(Self::Started),
            2 => Some(Self::Completed),
            3 => Some(Self::Cancelled),
            4 => Some(Self::NotReadyYet),
            5 => Some(Self::ClosedToNewParticipants),
            6 => Some(Self::Undefined),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Started => "Started",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::NotReadyYet => "Not Ready Yet",
            Self::ClosedToNewParticipants => "Closed To New Participants",
            Self::Undefined => "Undefined",
        }
    }
}

impl Display for BracketStatus {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use ringside_core::{seeds_contiguous, AgeClass, Error};
    use serde_test::{assert_tokens, Token};

    use super::{Bracket, BracketStatus};
    use crate::id::{BracketId, EventId, RegistrationId};

    fn bracket(max_competitors: u32) -> Bracket {
        Bracket {
            id: BracketId(1),
            event: EventId(1),
            bracket_number: 1,
            division_title: String::from("Men's Novice Bantamweight"),
            max_competitors,
            status: BracketStatus::Open,
            age_class: AgeClass::Adult,
            sport: String::from("Kickboxing (Male)"),
            rule_style: String::from("Standard Single Elimination"),
            bracket_criteria: String::from("Novice"),
            weight_class: Some(String::from("Bantamweight")),
            fighters: Vec::new(),
            bouts: Vec::new(),
        }
    }

    #[test]
    fn test_push_fighter_seeds() {
        let mut bracket = bracket(4);

        for i in 1..=4 {
            let seed = bracket.push_fighter(RegistrationId(i as u64)).unwrap();
            assert_eq!(seed, i);
        }

        assert!(seeds_contiguous(bracket.fighters.iter().map(|f| f.seed)));
    }

    #[test]
    fn test_push_fighter_capacity() {
        let mut bracket = bracket(4);

        for i in 1..=4 {
            bracket.push_fighter(RegistrationId(i)).unwrap();
        }

        // The 5th fighter never lands in a full bracket.
        assert_eq!(
            bracket.push_fighter(RegistrationId(5)),
            Err(Error::CapacityExceeded)
        );
        assert_eq!(bracket.fighters.len(), 4);
    }

    #[test]
    fn test_bracket_status_tokens() {
        assert_tokens(
            &BracketStatus::Open,
            &[Token::UnitVariant {
                name: "BracketStatus",
                variant: "Open",
            }],
        );
        assert_tokens(
            &BracketStatus::NotReadyYet,
            &[Token::UnitVariant {
                name: "BracketStatus",
                variant: "Not Ready Yet",
            }],
        );
        assert_tokens(
            &BracketStatus::ClosedToNewParticipants,
            &[Token::UnitVariant {
                name: "BracketStatus",
                variant: "Closed To New Participants",
            }],
        );
    }

    #[test]
    fn test_bracket_status_u8_roundtrip() {
        for byte in 0..=6 {
            let status = BracketStatus::from_u8(byte).unwrap();
            assert_eq!(status.to_u8(), byte);
        }

        assert_eq!(BracketStatus::from_u8(7), None);
    }
}
