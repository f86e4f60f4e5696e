use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{BoutId, BracketId, FightId, RegistrationId};

/// One scheduled pairing of two fighters within a bracket.
///
/// Corners reference registrations that must be present in the parent
/// bracket's fighter roster; the server rejects bouts whose corners are
/// not. A bout carries at most one fight, linked through `fight` once
/// the result is recorded.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Bout {
    #[cfg_attr(feature = "server", serde(skip_deserializing))]
    pub id: BoutId,
    pub bracket: BracketId,
    /// Unique within the bracket.
    pub bout_number: u32,
    pub red_corner: Option<RegistrationId>,
    pub blue_corner: Option<RegistrationId>,
    pub start_date: DateTime<Utc>,
    pub weigh_in_time: Option<DateTime<Utc>>,
    pub number_of_rounds: Option<u32>,
    /// Round duration in seconds.
    pub round_duration: Option<u32>,
    pub notes: Option<String>,
    #[cfg_attr(feature = "server", serde(skip_deserializing))]
    pub fight: Option<FightId>,
}

impl Bout {
    /// Merges the fields of `partial` into `self`. The `fight` link is
    /// managed exclusively by fight creation and deletion.
    pub fn update(&mut self, partial: PartialBout) {
        if let Some(bout_number) = partial.bout_number {
            self.bout_number = bout_number;
        }

        if let Some(red_corner) = partial.red_corner {
            self.red_corner = Some(red_corner);
        }

        if let Some(blue_corner) = partial.blue_corner {
            self.blue_corner = Some(blue_corner);
        }

        if let Some(start_date) = partial.start_date {
            self.start_date = start_date;
        }

        if let Some(weigh_in_time) = partial.weigh_in_time {
            self.weigh_in_time = Some(weigh_in_time);
        }

        if let Some(number_of_rounds) = partial.number_of_rounds {
            self.number_of_rounds = Some(number_of_rounds);
        }

        if let Some(round_duration) = partial.round_duration {
            self.round_duration = Some(round_duration);
        }

        if let Some(notes) = partial.notes {
            self.notes = Some(notes);
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PartialBout {
    pub bout_number: Option<u32>,
    pub red_corner: Option<RegistrationId>,
    pub blue_corner: Option<RegistrationId>,
    pub start_date: Option<DateTime<Utc>>,
    pub weigh_in_time: Option<DateTime<Utc>>,
    pub number_of_rounds: Option<u32>,
    pub round_duration: Option<u32>,
    pub notes: Option<String>,
}
