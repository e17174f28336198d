use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::{error::LarderError, LarderResult};

/// A handle to the registry database.
///
/// The connection is shared behind `Arc<Mutex<_>>` so the query builders can
/// borrow it one statement at a time. Dropping the last handle closes the
/// connection; rusqlite finalizes outstanding statements first, so the close
/// cannot be left half-done.
pub struct Database {
    pub conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens the SQLite database at `path`, creating the file if it does not
    /// exist yet.
    pub fn new<P: AsRef<Path>>(path: P) -> LarderResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|err| LarderError::OpenFailed {
            path: path.display().to_string(),
            source: err,
        })?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}
