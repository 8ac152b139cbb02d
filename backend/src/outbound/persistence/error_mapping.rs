//! Shared mapping from pool and Diesel failures onto port error enums.

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use super::pool::PoolError;

/// Map a pool failure through a connection-error constructor.
pub fn map_pool_error<E>(error: PoolError, connection: impl Fn(String) -> E) -> E {
    connection(error.to_string())
}

/// Map a Diesel failure onto connection or query constructors.
///
/// Connection loss is the only failure surfaced as a connection error; the
/// rest are query failures so callers can tell outages from bad statements
/// in logs.
pub fn map_diesel_error<E>(
    error: DieselError,
    query: impl Fn(String) -> E,
    connection: impl Fn(String) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection(error.to_string())
        }
        _ => query(error.to_string()),
    }
}
