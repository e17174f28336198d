use std::{
    fs::File,
    sync::{Arc, Mutex},
};

use larder_core::{
    config::{get_config, Config},
    database::{connection::Database, store::PackageStore},
    error::ErrorContext,
    LarderResult,
};
use once_cell::sync::OnceCell;
use rusqlite::Connection;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    db: OnceCell<Database>,
}

impl AppState {
    pub fn new() -> Self {
        let config = get_config();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                db: OnceCell::new(),
            }),
        }
    }

    fn create_db(&self) -> LarderResult<Database> {
        let db_file = self.inner.config.get_db_path()?;
        if !db_file.exists() {
            File::create(&db_file)
                .with_context(|| format!("creating database file {}", db_file.display()))?;
        }

        let db = Database::new(&db_file)?;
        PackageStore::new(db.conn.clone()).create_schema()?;

        Ok(db)
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn db(&self) -> LarderResult<&Arc<Mutex<Connection>>> {
        self.inner
            .db
            .get_or_try_init(|| self.create_db())
            .map(|db| &db.conn)
    }

    pub fn store(&self) -> LarderResult<PackageStore> {
        Ok(PackageStore::new(self.db()?.clone()))
    }
}
