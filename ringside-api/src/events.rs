use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::EventId;

/// A single event hosting any number of divisions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    #[cfg_attr(feature = "server", serde(skip_deserializing))]
    pub id: EventId,
    pub name: String,
    /// The sport fought at this event, e.g. "Kickboxing". Combined with
    /// the fighter's gender it forms the sport label divisions are
    /// matched on.
    pub sport_type: String,
    pub start_date: DateTime<Utc>,
    pub registration_start_date: DateTime<Utc>,
    pub registration_deadline: DateTime<Utc>,
    pub weigh_in_time: Option<DateTime<Utc>>,
    pub fight_start_time: Option<DateTime<Utc>>,
}

impl Event {
    /// Merges the fields of `partial` into `self`.
    pub fn update(&mut self, partial: PartialEvent) {
        if let Some(name) = partial.name {
            self.name = name;
        }

        if let Some(sport_type) = partial.sport_type {
            self.sport_type = sport_type;
        }

        if let Some(start_date) = partial.start_date {
            self.start_date = start_date;
        }

        if let Some(registration_start_date) = partial.registration_start_date {
            self.registration_start_date = registration_start_date;
        }

        if let Some(registration_deadline) = partial.registration_deadline {
            self.registration_deadline = registration_deadline;
        }

        if let Some(weigh_in_time) = partial.weigh_in_time {
            self.weigh_in_time = Some(weigh_in_time);
        }

        if let Some(fight_start_time) = partial.fight_start_time {
            self.fight_start_time = Some(fight_start_time);
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PartialEvent {
    pub name: Option<String>,
    pub sport_type: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub registration_start_date: Option<DateTime<Utc>>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub weigh_in_time: Option<DateTime<Utc>>,
    pub fight_start_time: Option<DateTime<Utc>>,
}

/// Per-event tournament settings, stored separately from the event
/// document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentSettings {
    #[cfg_attr(feature = "server", serde(skip_deserializing))]
    pub event_id: EventId,
    pub simple_fees: SimpleFees,
    pub bracket_settings: BracketSettings,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimpleFees {
    pub fighter_fee: f64,
    pub trainer_fee: f64,
    pub currency: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BracketSettings {
    /// Upper bound for `max_competitors` of any bracket created for
    /// this event.
    pub max_fighters_per_bracket: u32,
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{Event, PartialEvent};
    use crate::id::EventId;

    #[test]
    fn test_event_update() {
        let date = Utc.with_ymd_and_hms(2024, 9, 14, 18, 0, 0).unwrap();

        let mut event = Event {
            id: EventId(1),
            name: String::from("Autumn Showdown"),
            sport_type: String::from("Kickboxing"),
            start_date: date,
            registration_start_date: date,
            registration_deadline: date,
            weigh_in_time: None,
            fight_start_time: None,
        };

        event.update(PartialEvent {
            name: Some(String::from("Autumn Showdown II")),
            weigh_in_time: Some(date),
            ..Default::default()
        });

        assert_eq!(event.name, "Autumn Showdown II");
        assert_eq!(event.sport_type, "Kickboxing");
        assert_eq!(event.weigh_in_time, Some(date));
    }
}
