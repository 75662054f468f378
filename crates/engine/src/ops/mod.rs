use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use sea_orm::DatabaseConnection;

use crate::{Partners, ResultEngine, dates};

mod categories;
mod expenses;
mod sales;
mod transfers;
mod views;

/// Record store and read views backed by the database.
///
/// Writes are validated against the configured [`Partners`]; reads feed the
/// pure settlement, dashboard and timeline code.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    partners: Partners,
    timezone: Tz,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn partners(&self) -> &Partners {
        &self.partners
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Parses a record date in the engine timezone.
    pub fn parse_occurred_at(&self, input: &str) -> ResultEngine<DateTime<Utc>> {
        dates::parse_occurred_at(input, self.timezone)
    }
}

/// The builder for `Engine`
pub struct EngineBuilder {
    database: DatabaseConnection,
    partners: Partners,
    timezone: Tz,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            database: DatabaseConnection::default(),
            partners: Partners::default(),
            timezone: dates::DEFAULT_TIMEZONE,
        }
    }
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    pub fn partners(mut self, partners: Partners) -> EngineBuilder {
        self.partners = partners;
        self
    }

    pub fn timezone(mut self, timezone: Tz) -> EngineBuilder {
        self.timezone = timezone;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        let [first, second] = self.partners.ids();
        tracing::debug!(%first, %second, timezone = %self.timezone, "engine ready");
        Ok(Engine {
            database: self.database,
            partners: self.partners,
            timezone: self.timezone,
        })
    }
}
