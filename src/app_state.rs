//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    pagination::PaginationConfig,
    store::{SQLiteExpenseStore, SharedExpenseStore},
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Where expenses are kept.
    pub store: SharedExpenseStore,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] around an existing expense store.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    pub fn new(
        store: SharedExpenseStore,
        local_timezone: &str,
        pagination_config: PaginationConfig,
    ) -> Self {
        Self {
            store,
            local_timezone: local_timezone.to_owned(),
            pagination_config,
        }
    }

    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the expense table.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn from_connection(
        db_connection: Connection,
        local_timezone: &str,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let store = SQLiteExpenseStore::new(Arc::new(Mutex::new(db_connection)));

        Ok(Self::new(Arc::new(store), local_timezone, pagination_config))
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        AppState, amount::Amount, expense::NewExpense, pagination::PaginationConfig,
    };

    #[test]
    fn from_connection_creates_usable_store() {
        let connection = Connection::open_in_memory().unwrap();

        let state =
            AppState::from_connection(connection, "Etc/UTC", PaginationConfig::default()).unwrap();

        let expense =
            NewExpense::new("Tea", Amount::new(dec!(2.5)), date!(2024 - 04 - 01), "Drinks")
                .unwrap();
        let created = state.store.create(expense).unwrap();
        assert_eq!(state.store.get(created.id), Ok(created));
    }
}
