pub mod id;

use futures::TryStreamExt;
use ringside_api::bouts::Bout;
use ringside_api::brackets::Bracket;
use ringside_api::events::{Event, TournamentSettings};
use ringside_api::fights::Fight;
use ringside_api::id::{BoutId, BracketId, EventId, FightId, RegistrationId, SuspensionId, UserId};
use ringside_api::registrations::Registration;
use ringside_api::suspensions::{Suspension, SuspensionStatus};
use ringside_api::users::{Role, User};
use sqlx::mysql::MySqlPool;
use sqlx::Row;

use crate::Error;

macro_rules! get_one {
    ($query:expr) => {
        match $query {
            Ok(v) => v,
            Err(sqlx::Error::RowNotFound) => return Ok(None),
            Err(err) => return Err(err.into()),
        }
    };
}

/// The document store. Every entity lives in its own table as a JSON
/// `data` column next to the columns it is queried by.
#[derive(Clone, Debug)]
pub struct Store {
    pub pool: MySqlPool,
    pub table_prefix: String,
}

impl Store {
    #[inline]
    pub fn events(&self) -> EventsClient<'_> {
        EventsClient { store: self }
    }

    #[inline]
    pub fn registrations(&self) -> RegistrationsClient<'_> {
        RegistrationsClient { store: self }
    }

    #[inline]
    pub fn brackets(&self) -> BracketsClient<'_> {
        BracketsClient { store: self }
    }

    #[inline]
    pub fn bouts(&self) -> BoutsClient<'_> {
        BoutsClient { store: self }
    }

    #[inline]
    pub fn fights(&self) -> FightsClient<'_> {
        FightsClient { store: self }
    }

    #[inline]
    pub fn suspensions(&self) -> SuspensionsClient<'_> {
        SuspensionsClient { store: self }
    }

    #[inline]
    pub fn users(&self) -> UsersClient<'_> {
        UsersClient { store: self }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct EventsClient<'a> {
    store: &'a Store,
}

impl<'a> EventsClient<'a> {
    pub async fn list(&self) -> Result<Vec<Event>, Error> {
        let sql = format!("SELECT id, data FROM {}events", self.store.table_prefix);

        let mut rows = sqlx::query(&sql).fetch(&self.store.pool);

        let mut events = Vec::new();
        while let Some(row) = rows.try_next().await? {
            let id = row.try_get("id")?;
            let data: Vec<u8> = row.try_get("data")?;

            let mut event: Event = serde_json::from_slice(&data)?;
            event.id = EventId(id);

            events.push(event);
        }

        Ok(events)
    }

    /// Returns the [`Event`] with the given `id`, or `None` if no such
    /// event exists.
    ///
    /// # Errors
    ///
    /// Returns an [`enum@Error`] if a database error occured.
    pub async fn get(&self, id: EventId) -> Result<Option<Event>, Error> {
        let row = get_one!(
            sqlx::query(&format!(
                "SELECT data FROM {}events WHERE id = ?",
                self.store.table_prefix
            ))
            .bind(id.0)
            .fetch_one(&self.store.pool)
            .await
        );

        let data: Vec<u8> = row.try_get("data")?;

        let mut event: Event = serde_json::from_slice(&data)?;
        event.id = id;

        Ok(Some(event))
    }

    pub async fn name_taken(&self, name: &str) -> Result<bool, Error> {
        let row = sqlx::query(&format!(
            "SELECT COUNT(*) AS count FROM {}events WHERE name = ?",
            self.store.table_prefix
        ))
        .bind(name)
        .fetch_one(&self.store.pool)
        .await?;

        let count: i64 = row.try_get("count")?;

        Ok(count > 0)
    }

    pub async fn insert(&self, event: &Event) -> Result<EventId, Error> {
        let id: u64 = id::EVENT.generate();

        sqlx::query(&format!(
            "INSERT INTO {}events (id, name, data) VALUES (?, ?, ?)",
            self.store.table_prefix
        ))
        .bind(id)
        .bind(&event.name)
        .bind(serde_json::to_vec(event)?)
        .execute(&self.store.pool)
        .await?;

        Ok(EventId(id))
    }

    pub async fn update(&self, id: EventId, event: &Event) -> Result<(), Error> {
        sqlx::query(&format!(
            "UPDATE {}events SET name = ?, data = ? WHERE id = ?",
            self.store.table_prefix
        ))
        .bind(&event.name)
        .bind(serde_json::to_vec(event)?)
        .bind(id.0)
        .execute(&self.store.pool)
        .await?;

        Ok(())
    }

    /// Deletes the event row only. The bracket/bout/fight cascade is
    /// orchestrated by the caller, leaf first.
    pub async fn delete(&self, id: EventId) -> Result<(), Error> {
        sqlx::query(&format!(
            "DELETE FROM {}events WHERE id = ?",
            self.store.table_prefix
        ))
        .bind(id.0)
        .execute(&self.store.pool)
        .await?;

        Ok(())
    }

    pub async fn settings(&self, id: EventId) -> Result<Option<TournamentSettings>, Error> {
        let row = get_one!(
            sqlx::query(&format!(
                "SELECT data FROM {}event_settings WHERE event_id = ?",
                self.store.table_prefix
            ))
            .bind(id.0)
            .fetch_one(&self.store.pool)
            .await
        );

        let data: Vec<u8> = row.try_get("data")?;

        let mut settings: TournamentSettings = serde_json::from_slice(&data)?;
        settings.event_id = id;

        Ok(Some(settings))
    }

    pub async fn put_settings(&self, settings: &TournamentSettings) -> Result<(), Error> {
        sqlx::query(&format!(
            "INSERT INTO {}event_settings (event_id, data) VALUES (?, ?) ON DUPLICATE KEY UPDATE data = VALUES(data)",
            self.store.table_prefix
        ))
        .bind(settings.event_id.0)
        .bind(serde_json::to_vec(settings)?)
        .execute(&self.store.pool)
        .await?;

        Ok(())
    }

    pub async fn delete_settings(&self, id: EventId) -> Result<(), Error> {
        sqlx::query(&format!(
            "DELETE FROM {}event_settings WHERE event_id = ?",
            self.store.table_prefix
        ))
        .bind(id.0)
        .execute(&self.store.pool)
        .await?;

        Ok(())
    }
}

#[derive(Copy, Clone, Debug)]
pub struct RegistrationsClient<'a> {
    store: &'a Store,
}

impl<'a> RegistrationsClient<'a> {
    pub async fn list(&self, event: Option<EventId>) -> Result<Vec<Registration>, Error> {
        let sql = match event {
            Some(_) => format!(
                "SELECT id, data FROM {}registrations WHERE event_id = ?",
                self.store.table_prefix
            ),
            None => format!("SELECT id, data FROM {}registrations", self.store.table_prefix),
        };

        let mut query = sqlx::query(&sql);
        if let Some(event) = event {
            query = query.bind(event.0);
        }

        let mut rows = query.fetch(&self.store.pool);

        let mut registrations = Vec::new();
        while let Some(row) = rows.try_next().await? {
            let id = row.try_get("id")?;
            let data: Vec<u8> = row.try_get("data")?;

            let mut registration: Registration = serde_json::from_slice(&data)?;
            registration.id = RegistrationId(id);

            registrations.push(registration);
        }

        Ok(registrations)
    }

    pub async fn get(&self, id: RegistrationId) -> Result<Option<Registration>, Error> {
        let row = get_one!(
            sqlx::query(&format!(
                "SELECT data FROM {}registrations WHERE id = ?",
                self.store.table_prefix
            ))
            .bind(id.0)
            .fetch_one(&self.store.pool)
            .await
        );

        let data: Vec<u8> = row.try_get("data")?;

        let mut registration: Registration = serde_json::from_slice(&data)?;
        registration.id = id;

        Ok(Some(registration))
    }

    /// Whether a registration for the (event, email) pair already
    /// exists. A person registers once per event.
    pub async fn exists(&self, event: EventId, email: &str) -> Result<bool, Error> {
        let row = sqlx::query(&format!(
            "SELECT COUNT(*) AS count FROM {}registrations WHERE event_id = ? AND email = ?",
            self.store.table_prefix
        ))
        .bind(event.0)
        .bind(email)
        .fetch_one(&self.store.pool)
        .await?;

        let count: i64 = row.try_get("count")?;

        Ok(count > 0)
    }

    pub async fn insert(&self, registration: &Registration) -> Result<RegistrationId, Error> {
        let id: u64 = id::REGISTRATION.generate();

        sqlx::query(&format!(
            "INSERT INTO {}registrations (id, event_id, email, data) VALUES (?, ?, ?, ?)",
            self.store.table_prefix
        ))
        .bind(id)
        .bind(registration.event.0)
        .bind(&registration.email)
        .bind(serde_json::to_vec(registration)?)
        .execute(&self.store.pool)
        .await?;

        Ok(RegistrationId(id))
    }
}

#[derive(Copy, Clone, Debug)]
pub struct BracketsClient<'a> {
    store: &'a Store,
}

impl<'a> BracketsClient<'a> {
    pub async fn list(&self, event: Option<EventId>) -> Result<Vec<Bracket>, Error> {
        let sql = match event {
            Some(_) => format!(
                "SELECT id, data FROM {}brackets WHERE event_id = ?",
                self.store.table_prefix
            ),
            None => format!("SELECT id, data FROM {}brackets", self.store.table_prefix),
        };

        let mut query = sqlx::query(&sql);
        if let Some(event) = event {
            query = query.bind(event.0);
        }

        let mut rows = query.fetch(&self.store.pool);

        let mut brackets = Vec::new();
        while let Some(row) = rows.try_next().await? {
            let id = row.try_get("id")?;
            let data: Vec<u8> = row.try_get("data")?;

            let mut bracket: Bracket = serde_json::from_slice(&data)?;
            bracket.id = BracketId(id);

            brackets.push(bracket);
        }

        Ok(brackets)
    }

    pub async fn get(&self, id: BracketId) -> Result<Option<Bracket>, Error> {
        let row = get_one!(
            sqlx::query(&format!(
                "SELECT data FROM {}brackets WHERE id = ?",
                self.store.table_prefix
            ))
            .bind(id.0)
            .fetch_one(&self.store.pool)
            .await
        );

        let data: Vec<u8> = row.try_get("data")?;

        let mut bracket: Bracket = serde_json::from_slice(&data)?;
        bracket.id = id;

        Ok(Some(bracket))
    }

    pub async fn number_taken(
        &self,
        event: EventId,
        number: u32,
        exclude: Option<BracketId>,
    ) -> Result<bool, Error> {
        let row = match exclude {
            Some(exclude) => {
                sqlx::query(&format!(
                    "SELECT COUNT(*) AS count FROM {}brackets WHERE event_id = ? AND bracket_number = ? AND id != ?",
                    self.store.table_prefix
                ))
                .bind(event.0)
                .bind(number)
                .bind(exclude.0)
                .fetch_one(&self.store.pool)
                .await?
            }
            None => {
                sqlx::query(&format!(
                    "SELECT COUNT(*) AS count FROM {}brackets WHERE event_id = ? AND bracket_number = ?",
                    self.store.table_prefix
                ))
                .bind(event.0)
                .bind(number)
                .fetch_one(&self.store.pool)
                .await?
            }
        };

        let count: i64 = row.try_get("count")?;

        Ok(count > 0)
    }

    pub async fn insert(&self, bracket: &Bracket) -> Result<BracketId, Error> {
        let id: u64 = id::BRACKET.generate();

        sqlx::query(&format!(
            "INSERT INTO {}brackets (id, event_id, bracket_number, status, fighters, data) VALUES (?, ?, ?, ?, ?, ?)",
            self.store.table_prefix
        ))
        .bind(id)
        .bind(bracket.event.0)
        .bind(bracket.bracket_number)
        .bind(bracket.status.to_u8())
        .bind(bracket.fighters.len() as u32)
        .bind(serde_json::to_vec(bracket)?)
        .execute(&self.store.pool)
        .await?;

        Ok(BracketId(id))
    }

    pub async fn update(&self, id: BracketId, bracket: &Bracket) -> Result<(), Error> {
        sqlx::query(&format!(
            "UPDATE {}brackets SET bracket_number = ?, status = ?, fighters = ?, data = ? WHERE id = ?",
            self.store.table_prefix
        ))
        .bind(bracket.bracket_number)
        .bind(bracket.status.to_u8())
        .bind(bracket.fighters.len() as u32)
        .bind(serde_json::to_vec(bracket)?)
        .bind(id.0)
        .execute(&self.store.pool)
        .await?;

        Ok(())
    }

    /// Writes `bracket` only if the stored fighter count still equals
    /// `expected`. Returns `false` when a concurrent writer got there
    /// first; the caller re-reads and retries.
    ///
    /// This is the compare-and-swap that keeps seeds contiguous and
    /// rosters within capacity under concurrent registrations.
    pub async fn update_fighters_guarded(
        &self,
        id: BracketId,
        expected: u32,
        bracket: &Bracket,
    ) -> Result<bool, Error> {
        let res = sqlx::query(&format!(
            "UPDATE {}brackets SET status = ?, fighters = ?, data = ? WHERE id = ? AND fighters = ?",
            self.store.table_prefix
        ))
        .bind(bracket.status.to_u8())
        .bind(bracket.fighters.len() as u32)
        .bind(serde_json::to_vec(bracket)?)
        .bind(id.0)
        .bind(expected)
        .execute(&self.store.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    pub async fn delete(&self, id: BracketId) -> Result<(), Error> {
        sqlx::query(&format!(
            "DELETE FROM {}brackets WHERE id = ?",
            self.store.table_prefix
        ))
        .bind(id.0)
        .execute(&self.store.pool)
        .await?;

        Ok(())
    }
}

#[derive(Copy, Clone, Debug)]
pub struct BoutsClient<'a> {
    store: &'a Store,
}

impl<'a> BoutsClient<'a> {
    pub async fn list(&self, bracket: Option<BracketId>) -> Result<Vec<Bout>, Error> {
        let sql = match bracket {
            Some(_) => format!(
                "SELECT id, data FROM {}bouts WHERE bracket_id = ?",
                self.store.table_prefix
            ),
            None => format!("SELECT id, data FROM {}bouts", self.store.table_prefix),
        };

        let mut query = sqlx::query(&sql);
        if let Some(bracket) = bracket {
            query = query.bind(bracket.0);
        }

        let mut rows = query.fetch(&self.store.pool);

        let mut bouts = Vec::new();
        while let Some(row) = rows.try_next().await? {
            let id = row.try_get("id")?;
            let data: Vec<u8> = row.try_get("data")?;

            let mut bout: Bout = serde_json::from_slice(&data)?;
            bout.id = BoutId(id);

            bouts.push(bout);
        }

        Ok(bouts)
    }

    pub async fn get(&self, id: BoutId) -> Result<Option<Bout>, Error> {
        let row = get_one!(
            sqlx::query(&format!(
                "SELECT data FROM {}bouts WHERE id = ?",
                self.store.table_prefix
            ))
            .bind(id.0)
            .fetch_one(&self.store.pool)
            .await
        );

        let data: Vec<u8> = row.try_get("data")?;

        let mut bout: Bout = serde_json::from_slice(&data)?;
        bout.id = id;

        Ok(Some(bout))
    }

    pub async fn number_taken(
        &self,
        bracket: BracketId,
        number: u32,
        exclude: Option<BoutId>,
    ) -> Result<bool, Error> {
        let row = match exclude {
            Some(exclude) => {
                sqlx::query(&format!(
                    "SELECT COUNT(*) AS count FROM {}bouts WHERE bracket_id = ? AND bout_number = ? AND id != ?",
                    self.store.table_prefix
                ))
                .bind(bracket.0)
                .bind(number)
                .bind(exclude.0)
                .fetch_one(&self.store.pool)
                .await?
            }
            None => {
                sqlx::query(&format!(
                    "SELECT COUNT(*) AS count FROM {}bouts WHERE bracket_id = ? AND bout_number = ?",
                    self.store.table_prefix
                ))
                .bind(bracket.0)
                .bind(number)
                .fetch_one(&self.store.pool)
                .await?
            }
        };

        let count: i64 = row.try_get("count")?;

        Ok(count > 0)
    }

    pub async fn insert(&self, bout: &Bout) -> Result<BoutId, Error> {
        let id: u64 = id::BOUT.generate();

        sqlx::query(&format!(
            "INSERT INTO {}bouts (id, bracket_id, bout_number, data) VALUES (?, ?, ?, ?)",
            self.store.table_prefix
        ))
        .bind(id)
        .bind(bout.bracket.0)
        .bind(bout.bout_number)
        .bind(serde_json::to_vec(bout)?)
        .execute(&self.store.pool)
        .await?;

        Ok(BoutId(id))
    }

    pub async fn update(&self, id: BoutId, bout: &Bout) -> Result<(), Error> {
        sqlx::query(&format!(
            "UPDATE {}bouts SET bout_number = ?, data = ? WHERE id = ?",
            self.store.table_prefix
        ))
        .bind(bout.bout_number)
        .bind(serde_json::to_vec(bout)?)
        .bind(id.0)
        .execute(&self.store.pool)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, id: BoutId) -> Result<(), Error> {
        sqlx::query(&format!(
            "DELETE FROM {}bouts WHERE id = ?",
            self.store.table_prefix
        ))
        .bind(id.0)
        .execute(&self.store.pool)
        .await?;

        Ok(())
    }

    pub async fn delete_by_bracket(&self, bracket: BracketId) -> Result<(), Error> {
        sqlx::query(&format!(
            "DELETE FROM {}bouts WHERE bracket_id = ?",
            self.store.table_prefix
        ))
        .bind(bracket.0)
        .execute(&self.store.pool)
        .await?;

        Ok(())
    }
}

#[derive(Copy, Clone, Debug)]
pub struct FightsClient<'a> {
    store: &'a Store,
}

impl<'a> FightsClient<'a> {
    pub async fn list(
        &self,
        bracket: Option<BracketId>,
        bout: Option<BoutId>,
    ) -> Result<Vec<Fight>, Error> {
        let mut sql = format!("SELECT id, data FROM {}fights", self.store.table_prefix);

        let mut clauses = Vec::new();
        if bracket.is_some() {
            clauses.push("bracket_id = ?");
        }
        if bout.is_some() {
            clauses.push("bout_id = ?");
        }

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        let mut query = sqlx::query(&sql);
        if let Some(bracket) = bracket {
            query = query.bind(bracket.0);
        }
        if let Some(bout) = bout {
            query = query.bind(bout.0);
        }

        let mut rows = query.fetch(&self.store.pool);

        let mut fights = Vec::new();
        while let Some(row) = rows.try_next().await? {
            let id = row.try_get("id")?;
            let data: Vec<u8> = row.try_get("data")?;

            let mut fight: Fight = serde_json::from_slice(&data)?;
            fight.id = FightId(id);

            fights.push(fight);
        }

        Ok(fights)
    }

    pub async fn get(&self, id: FightId) -> Result<Option<Fight>, Error> {
        let row = get_one!(
            sqlx::query(&format!(
                "SELECT data FROM {}fights WHERE id = ?",
                self.store.table_prefix
            ))
            .bind(id.0)
            .fetch_one(&self.store.pool)
            .await
        );

        let data: Vec<u8> = row.try_get("data")?;

        let mut fight: Fight = serde_json::from_slice(&data)?;
        fight.id = id;

        Ok(Some(fight))
    }

    pub async fn insert(&self, fight: &Fight) -> Result<FightId, Error> {
        let id: u64 = id::FIGHT.generate();

        sqlx::query(&format!(
            "INSERT INTO {}fights (id, bracket_id, bout_id, data) VALUES (?, ?, ?, ?)",
            self.store.table_prefix
        ))
        .bind(id)
        .bind(fight.bracket.0)
        .bind(fight.bout.0)
        .bind(serde_json::to_vec(fight)?)
        .execute(&self.store.pool)
        .await?;

        Ok(FightId(id))
    }

    pub async fn update(&self, id: FightId, fight: &Fight) -> Result<(), Error> {
        sqlx::query(&format!(
            "UPDATE {}fights SET data = ? WHERE id = ?",
            self.store.table_prefix
        ))
        .bind(serde_json::to_vec(fight)?)
        .bind(id.0)
        .execute(&self.store.pool)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, id: FightId) -> Result<(), Error> {
        sqlx::query(&format!(
            "DELETE FROM {}fights WHERE id = ?",
            self.store.table_prefix
        ))
        .bind(id.0)
        .execute(&self.store.pool)
        .await?;

        Ok(())
    }

    pub async fn delete_by_bout(&self, bout: BoutId) -> Result<(), Error> {
        sqlx::query(&format!(
            "DELETE FROM {}fights WHERE bout_id = ?",
            self.store.table_prefix
        ))
        .bind(bout.0)
        .execute(&self.store.pool)
        .await?;

        Ok(())
    }

    pub async fn delete_by_bracket(&self, bracket: BracketId) -> Result<(), Error> {
        sqlx::query(&format!(
            "DELETE FROM {}fights WHERE bracket_id = ?",
            self.store.table_prefix
        ))
        .bind(bracket.0)
        .execute(&self.store.pool)
        .await?;

        Ok(())
    }
}

#[derive(Copy, Clone, Debug)]
pub struct SuspensionsClient<'a> {
    store: &'a Store,
}

impl<'a> SuspensionsClient<'a> {
    pub async fn list(&self, status: Option<SuspensionStatus>) -> Result<Vec<Suspension>, Error> {
        let sql = match status {
            Some(_) => format!(
                "SELECT id, data FROM {}suspensions WHERE status = ?",
                self.store.table_prefix
            ),
            None => format!("SELECT id, data FROM {}suspensions", self.store.table_prefix),
        };

        let mut query = sqlx::query(&sql);
        if let Some(status) = status {
            query = query.bind(status.to_u8());
        }

        let mut rows = query.fetch(&self.store.pool);

        let mut suspensions = Vec::new();
        while let Some(row) = rows.try_next().await? {
            let id = row.try_get("id")?;
            let data: Vec<u8> = row.try_get("data")?;

            let mut suspension: Suspension = serde_json::from_slice(&data)?;
            suspension.id = SuspensionId(id);

            suspensions.push(suspension);
        }

        Ok(suspensions)
    }

    pub async fn get(&self, id: SuspensionId) -> Result<Option<Suspension>, Error> {
        let row = get_one!(
            sqlx::query(&format!(
                "SELECT data FROM {}suspensions WHERE id = ?",
                self.store.table_prefix
            ))
            .bind(id.0)
            .fetch_one(&self.store.pool)
            .await
        );

        let data: Vec<u8> = row.try_get("data")?;

        let mut suspension: Suspension = serde_json::from_slice(&data)?;
        suspension.id = id;

        Ok(Some(suspension))
    }

    pub async fn insert(&self, suspension: &Suspension) -> Result<SuspensionId, Error> {
        let id: u64 = id::SUSPENSION.generate();

        sqlx::query(&format!(
            "INSERT INTO {}suspensions (id, status, data) VALUES (?, ?, ?)",
            self.store.table_prefix
        ))
        .bind(id)
        .bind(suspension.status.to_u8())
        .bind(serde_json::to_vec(suspension)?)
        .execute(&self.store.pool)
        .await?;

        Ok(SuspensionId(id))
    }

    pub async fn update(&self, id: SuspensionId, suspension: &Suspension) -> Result<(), Error> {
        sqlx::query(&format!(
            "UPDATE {}suspensions SET status = ?, data = ? WHERE id = ?",
            self.store.table_prefix
        ))
        .bind(suspension.status.to_u8())
        .bind(serde_json::to_vec(suspension)?)
        .bind(id.0)
        .execute(&self.store.pool)
        .await?;

        Ok(())
    }
}

#[derive(Copy, Clone, Debug)]
pub struct UsersClient<'a> {
    store: &'a Store,
}

impl<'a> UsersClient<'a> {
    pub async fn get(&self, username: &str) -> Result<Option<User>, Error> {
        let row = get_one!(
            sqlx::query(&format!(
                "SELECT id, password, role FROM {}users WHERE name = ?",
                self.store.table_prefix
            ))
            .bind(username)
            .fetch_one(&self.store.pool)
            .await
        );

        let id = row.try_get("id")?;
        let password = row.try_get("password")?;
        let role: u8 = row.try_get("role")?;

        Ok(Some(User {
            id: UserId(id),
            username: username.to_string(),
            password,
            role: Role::from_u8(role).unwrap(),
        }))
    }

    pub async fn insert(&self, user: &User) -> Result<(), Error> {
        sqlx::query(&format!(
            "INSERT INTO {}users (id, name, password, role) VALUES (?, ?, ?, ?)",
            self.store.table_prefix
        ))
        .bind(user.id.0)
        .bind(&user.username)
        .bind(&user.password)
        .bind(user.role.to_u8())
        .execute(&self.store.pool)
        .await?;

        Ok(())
    }
}
