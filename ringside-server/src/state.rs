use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

use sqlx::mysql::MySqlPool;
use sqlx::pool::PoolOptions;

use crate::auth::Authorization;
use crate::config::Config;
use crate::signal::Shutdown;
use crate::store::Store;
use crate::Error;

#[derive(Clone, Debug)]
pub struct State(Arc<StateInner>);

impl State {
    pub fn new(config: Config) -> Result<Self, Error> {
        let pool: MySqlPool = PoolOptions::new()
            .max_connections(8)
            .max_lifetime(Duration::new(3600, 0))
            .idle_timeout(Duration::new(60, 0))
            .connect_lazy(&config.database.connect_string())?;

        let store = Store {
            pool,
            table_prefix: config.database.prefix.clone(),
        };

        let auth = Authorization::new(config.authorization.alg);

        Ok(Self(Arc::new(StateInner {
            store,
            config,
            auth,
            shutdown: Shutdown::new(),
        })))
    }
}

impl Deref for State {
    type Target = StateInner;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug)]
pub struct StateInner {
    pub store: Store,
    pub config: Config,
    pub auth: Authorization,
    pub shutdown: Shutdown,
}
