use serde::{Deserialize, Serialize};

use crate::id::{BoutId, BracketId, EventId, FightId, RegistrationId};

/// The recorded outcome of one bout. At most one fight exists per bout.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Fight {
    #[cfg_attr(feature = "server", serde(skip_deserializing))]
    pub id: FightId,
    pub event: EventId,
    pub bracket: BracketId,
    pub bout: BoutId,
    #[serde(default)]
    pub status: FightStatus,
    pub winner: Option<RegistrationId>,
    pub result_method: Option<ResultMethod>,
    pub result_details: Option<ResultDetails>,
    pub judge_scores: Option<JudgeScores>,
}

impl Fight {
    /// Merges the fields of `partial` into `self`.
    pub fn update(&mut self, partial: PartialFight) {
        if let Some(status) = partial.status {
            self.status = status;
        }

        if let Some(winner) = partial.winner {
            self.winner = Some(winner);
        }

        if let Some(result_method) = partial.result_method {
            self.result_method = Some(result_method);
        }

        if let Some(result_details) = partial.result_details {
            self.result_details = Some(result_details);
        }

        if let Some(judge_scores) = partial.judge_scores {
            self.judge_scores = Some(judge_scores);
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PartialFight {
    pub status: Option<FightStatus>,
    pub winner: Option<RegistrationId>,
    pub result_method: Option<ResultMethod>,
    pub result_details: Option<ResultDetails>,
    pub judge_scores: Option<JudgeScores>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FightStatus {
    #[default]
    Scheduled,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultMethod {
    Decision,
    Knockout,
    Walkover,
    Disqualified,
    Draw,
    Other,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResultDetails {
    pub round: Option<u32>,
    pub time: Option<String>,
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JudgeScores {
    pub red: Vec<u32>,
    pub blue: Vec<u32>,
}

#[cfg(test)]
mod tests {
    use serde_test::{assert_tokens, Token};

    use super::FightStatus;

    #[test]
    fn test_fight_status_tokens() {
        assert_tokens(
            &FightStatus::Scheduled,
            &[Token::UnitVariant {
                name: "FightStatus",
                variant: "Scheduled",
            }],
        );
        assert_tokens(
            &FightStatus::InProgress,
            &[Token::UnitVariant {
                name: "FightStatus",
                variant: "In Progress",
            }],
        );
    }
}
