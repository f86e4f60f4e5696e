//! Automatic bracket placement for fighter registrations.
//!
//! Placement runs as a detached task after a registration is
//! persisted. It is strictly best effort: any failure here is logged
//! and the registration stands; an administrator can always place the
//! fighter by editing a bracket directly.

use chrono::{NaiveDate, Utc};
use ringside_api::brackets::{Bracket, BracketStatus};
use ringside_api::id::BracketId;
use ringside_api::registrations::Registration;
use ringside_core::{
    bracket_criteria, division_title, find_target, next_bracket_number, sport_label, AgeClass,
    DivisionKey,
};

use crate::state::State;
use crate::Error;

/// How often a lost seed race is retried before giving up.
const MAX_ATTEMPTS: u32 = 3;

/// Spawns the placement task for a freshly created fighter
/// registration.
pub fn spawn(state: State, registration: Registration) {
    tokio::task::spawn(async move {
        if let Err(err) = assign(&state, &registration).await {
            log::error!(
                "Failed to place registration {} into a bracket: {}",
                registration.id,
                err
            );
        }
    });
}

async fn assign(state: &State, registration: &Registration) -> Result<(), Error> {
    let event = match state.store.events().get(registration.event).await? {
        Some(event) => event,
        None => return Err(Error::NotFound),
    };

    let key = division_key(
        registration,
        &event.sport_type,
        &state.config.matchmaking.rule_style,
        Utc::now().date_naive(),
    );

    for attempt in 0..MAX_ATTEMPTS {
        let brackets = state.store.brackets().list(Some(registration.event)).await?;

        match find_target(&brackets, &key) {
            Some(target) => {
                let id = target.id;
                let mut bracket = target.clone();

                let expected = bracket.fighters.len() as u32;
                let seed = match bracket.push_fighter(registration.id) {
                    Ok(seed) => seed,
                    // Raced to capacity since the read; look again.
                    Err(_) => continue,
                };

                if state
                    .store
                    .brackets()
                    .update_fighters_guarded(id, expected, &bracket)
                    .await?
                {
                    log::info!(
                        "Placed registration {} into bracket {} at seed {}",
                        registration.id,
                        bracket.bracket_number,
                        seed
                    );
                    return Ok(());
                }

                log::debug!(
                    "Lost seed race for bracket {} (attempt {}), retrying",
                    id,
                    attempt + 1
                );
            }
            None => {
                let number =
                    next_bracket_number(brackets.iter().map(|bracket| bracket.bracket_number));

                let mut bracket = new_bracket(
                    registration,
                    &key,
                    number,
                    state.config.matchmaking.default_max_competitors,
                );
                let seed = bracket
                    .push_fighter(registration.id)
                    .expect("empty bracket rejected its first fighter");

                let id = state.store.brackets().insert(&bracket).await?;

                log::info!(
                    "Created bracket {} ({}) for registration {} at seed {}",
                    id,
                    bracket.division_title,
                    registration.id,
                    seed
                );
                return Ok(());
            }
        }
    }

    log::warn!(
        "Giving up on placing registration {} after {} attempts",
        registration.id,
        MAX_ATTEMPTS
    );

    Ok(())
}

/// Builds the key the fighter's division is matched on.
fn division_key(
    registration: &Registration,
    sport_type: &str,
    rule_style: &str,
    today: NaiveDate,
) -> DivisionKey {
    DivisionKey {
        age_class: AgeClass::from_date_of_birth(registration.date_of_birth, today),
        sport: sport_label(sport_type, registration.gender.as_str()),
        rule_style: rule_style.to_owned(),
        criteria: bracket_criteria(registration.skill_level.as_deref()),
    }
}

/// Builds a fresh open bracket for a fighter no existing division can
/// take.
fn new_bracket(
    registration: &Registration,
    key: &DivisionKey,
    number: u32,
    max_competitors: u32,
) -> Bracket {
    Bracket {
        id: BracketId(0),
        event: registration.event,
        bracket_number: number,
        division_title: division_title(
            registration.gender.as_str(),
            &key.criteria,
            registration.weight_class.as_deref(),
        ),
        max_competitors,
        status: BracketStatus::Open,
        age_class: key.age_class,
        sport: key.sport.clone(),
        rule_style: key.rule_style.clone(),
        bracket_criteria: key.criteria.clone(),
        weight_class: registration.weight_class.clone(),
        fighters: Vec::new(),
        bouts: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ringside_api::registrations::{
        Gender, Registration, RegistrationStatus, RegistrationType,
    };
    use ringside_api::id::{EventId, RegistrationId};
    use ringside_core::AgeClass;

    use super::{division_key, new_bracket};

    fn registration() -> Registration {
        Registration {
            id: RegistrationId(7),
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
    fn test_division_key() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let key = division_key(
            &registration(),
            "Kickboxing",
            "Standard Single Elimination",
            today,
        );

        assert_eq!(key.age_class, AgeClass::Adult);
        assert_eq!(key.sport, "Kickboxing (Female)");
        assert_eq!(key.rule_style, "Standard Single Elimination");
        assert_eq!(key.criteria, "Novice");
    }

    #[test]
    fn test_new_bracket() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let registration = registration();

        let key = division_key(
            &registration,
            "Kickboxing",
            "Standard Single Elimination",
            today,
        );

        let mut bracket = new_bracket(&registration, &key, 3, 4);

        assert_eq!(bracket.bracket_number, 3);
        assert_eq!(bracket.division_title, "Women's Novice Bantamweight");
        assert_eq!(bracket.max_competitors, 4);

        let seed = bracket.push_fighter(registration.id).unwrap();
        assert_eq!(seed, 1);
        assert_eq!(bracket.fighters[0].fighter, registration.id);
    }
}
