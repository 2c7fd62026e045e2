// sqlx::Error -> StoreError mapping

use time_tracker_core::port::StoreError;

/// Convert sqlx::Error to StoreError with structured information
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) => {
            // Extract database-specific error code and message
            let Some(code) = db_err.code() else {
                return StoreError::Database(format!("database error: {}", db_err.message()));
            };

            // SQLite extended result codes: https://www.sqlite.org/rescode.html
            match code.as_ref() {
                // UNIQUE / PRIMARY KEY constraint failed
                "2067" | "1555" => StoreError::UniqueViolation(db_err.message().to_string()),
                // FOREIGN KEY constraint failed
                "787" => StoreError::ForeignKeyViolation(db_err.message().to_string()),
                // SQLITE_BUSY - database is locked
                "5" => StoreError::Database(format!(
                    "database locked (SQLITE_BUSY): {}",
                    db_err.message()
                )),
                // SQLITE_FULL - database or disk is full
                "13" => StoreError::Database(format!("database full: {}", db_err.message())),
                other => StoreError::Database(format!(
                    "database error [{}]: {}",
                    other,
                    db_err.message()
                )),
            }
        }
        sqlx::Error::ColumnNotFound(col) => StoreError::Database(format!("column not found: {}", col)),
        // Connection, pool, protocol errors
        _ => StoreError::Database(err.to_string()),
    }
}
