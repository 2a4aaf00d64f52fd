//! Server-side command table
//!
//! Every reply is plain text. Domain misses (unknown country, duplicate
//! insert) and unknown command codes are ordinary replies; there is no
//! status code on the wire.

use rand::Rng;

use crate::directory::{normalize_name, Directory};
use crate::error::Result;
use crate::protocol::ServerCommand;

/// Reply to `c` when the country is unknown
pub const CITY_NOT_FOUND: &str = "No country found.";

/// Reply to `p` when the country is unknown (no trailing period)
pub const POPULATION_NOT_FOUND: &str = "No country found";

/// Reply to `a` when the country is already present
pub const COUNTRY_EXISTS: &str = "Country already exists";

/// Reply to `a` when the payload is not `country,city`
pub const INVALID_ENTRY: &str = "Invalid entry, expected country,city";

/// Reply to an unknown command code
pub const INVALID_COMMAND: &str = "Invalid command received by server";

/// Reply to `h`
pub const HEARTBEAT_REPLY: &str = "beat";

/// Maps server command codes to directory-backed handlers
#[derive(Debug)]
pub struct ServerDispatcher<D> {
    /// Record store consulted by the handlers
    directory: D,

    /// Population replies are `[1, 10] * population_seed`, saturating at `u64::MAX`
    population_seed: u64,
}

impl<D: Directory> ServerDispatcher<D> {
    /// Create a dispatcher over `directory`
    pub fn new(directory: D, population_seed: u64) -> Self {
        Self {
            directory,
            population_seed,
        }
    }

    /// The directory behind this dispatcher
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Produce the reply for one request
    ///
    /// Directory failures are reported to the peer as text, the same way
    /// domain misses are.
    pub fn dispatch(&self, code: &str, payload: &str) -> String {
        let Some(command) = ServerCommand::from_code(code) else {
            tracing::debug!(code, "Unknown command code");
            return INVALID_COMMAND.to_string();
        };

        match self.execute(command, payload) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(?command, "Handler failed: {}", e);
                format!("Server error: {}", e)
            }
        }
    }

    /// Run the handler for a resolved command
    pub fn execute(&self, command: ServerCommand, payload: &str) -> Result<String> {
        match command {
            ServerCommand::GetCity => self.get_city(payload),
            ServerCommand::GetPopulation => self.get_population(payload),
            ServerCommand::AddCountry => self.add_country(payload),
            ServerCommand::Heartbeat => Ok(self.heartbeat()),
        }
    }

    fn get_city(&self, country: &str) -> Result<String> {
        let country = normalize_name(country);
        tracing::info!(%country, "Retrieving capital city");

        match self.directory.lookup(&country)? {
            Some(capital) => {
                tracing::info!(%capital, "Found capital city");
                Ok(capital)
            }
            None => Ok(CITY_NOT_FOUND.to_string()),
        }
    }

    fn get_population(&self, country: &str) -> Result<String> {
        let country = normalize_name(country);
        tracing::info!(%country, "Retrieving estimated population");

        match self.directory.lookup(&country)? {
            Some(_) => {
                let factor: u64 = rand::thread_rng().gen_range(1..=10);
                Ok(factor.saturating_mul(self.population_seed).to_string())
            }
            None => Ok(POPULATION_NOT_FOUND.to_string()),
        }
    }

    fn add_country(&self, pair: &str) -> Result<String> {
        let Some((country, city)) = pair.split_once(',') else {
            return Ok(INVALID_ENTRY.to_string());
        };

        let country = normalize_name(country);
        let city = normalize_name(city);
        if country.is_empty() || city.is_empty() {
            return Ok(INVALID_ENTRY.to_string());
        }

        tracing::info!(%country, %city, "Adding new entry");
        if self.directory.insert(&country, &city)? {
            let message = format!("{} and {} successfully added to database", country, city);
            tracing::info!("{}", message);
            Ok(message)
        } else {
            Ok(COUNTRY_EXISTS.to_string())
        }
    }

    fn heartbeat(&self) -> String {
        tracing::info!("Heart -> beat");
        HEARTBEAT_REPLY.to_string()
    }
}
