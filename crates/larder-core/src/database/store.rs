//! High-level operations on the package registry.

use std::sync::{Arc, Mutex};

use larder_db::{traits::Expression as _, DeleteQuery, InsertQuery, SelectQuery, UpdateQuery};
use rusqlite::Connection;
use tracing::trace;

use crate::{
    database::{
        models::{packages, PackageRecord},
        schema::CREATE_SCHEMA,
    },
    error::LarderError,
    LarderResult,
};

/// The record store over the `packages` table.
///
/// Composes the typed query builders into the operations the CLI verbs
/// need. All methods are synchronous; the shared connection serializes
/// concurrent callers.
pub struct PackageStore {
    db: Arc<Mutex<Connection>>,
}

impl PackageStore {
    pub fn new(db: Arc<Mutex<Connection>>) -> Self {
        Self { db }
    }

    /// Creates the registry tables if they do not exist yet. Safe to call on
    /// every startup.
    pub fn create_schema(&self) -> LarderResult<()> {
        trace!("{}", CREATE_SCHEMA.trim());
        let conn = self.db.lock()?;
        conn.execute_batch(CREATE_SCHEMA)?;
        Ok(())
    }

    /// Inserts `package` as a new row and returns the engine-assigned id.
    ///
    /// The id column is never written; leaving it out of the statement lets
    /// the engine pick the next key.
    pub fn insert(&self, package: &PackageRecord) -> LarderResult<i64> {
        require_name_version(package)?;

        let id = InsertQuery::into(self.db.clone(), packages::TABLE)
            .set(packages::NAME, package.name.clone())
            .set(packages::VERSION, package.version.clone())
            .set(packages::HOMEPAGE, package.homepage.clone())
            .set(packages::MAINTAINER, package.maintainer.clone())
            .set(packages::EMAIL, package.email.clone())
            .set(packages::AS_DEPENDENCY, package.as_dependency)
            .set(packages::IS_INSTALLED, package.is_installed)
            .execute()?;

        Ok(id)
    }

    /// Rewrites every non-key field of the row `package.package_id` names.
    ///
    /// The id is only ever used to locate the row; it is not part of the SET
    /// list, so a record's identity cannot change through here.
    pub fn update(&self, package: &PackageRecord) -> LarderResult<()> {
        if package.package_id == 0 {
            return Err(LarderError::InvalidArgument(
                "cannot update a package that has no assigned id".into(),
            ));
        }
        require_name_version(package)?;

        let affected = UpdateQuery::table(self.db.clone(), packages::TABLE)
            .set(packages::NAME, package.name.clone())
            .set(packages::VERSION, package.version.clone())
            .set(packages::HOMEPAGE, package.homepage.clone())
            .set(packages::MAINTAINER, package.maintainer.clone())
            .set(packages::EMAIL, package.email.clone())
            .set(packages::AS_DEPENDENCY, package.as_dependency)
            .set(packages::IS_INSTALLED, package.is_installed)
            .filter(packages::PACKAGE_ID.eq(package.package_id))
            .execute()?;

        if affected == 0 {
            return Err(LarderError::PackageNotFound(format!(
                "#{}",
                package.package_id
            )));
        }

        Ok(())
    }

    pub fn find_by_id(&self, id: i64) -> LarderResult<Option<PackageRecord>> {
        let record = SelectQuery::<PackageRecord>::from(self.db.clone(), packages::TABLE)
            .filter(packages::PACKAGE_ID.eq(id))
            .fetch_one()?;

        Ok(record)
    }

    /// Finds packages whose name and version match the given LIKE patterns.
    ///
    /// Patterns are bound verbatim, so callers place their own wildcards. An
    /// absent version matches any version. `limit` of `None` returns the
    /// whole match set, ordered by id so results are stable across runs.
    pub fn find_by_name_version(
        &self,
        name: &str,
        version: Option<&str>,
        limit: Option<u32>,
    ) -> LarderResult<Vec<PackageRecord>> {
        let version = version.unwrap_or("%");

        let mut query = SelectQuery::<PackageRecord>::from(self.db.clone(), packages::TABLE)
            .filter(
                packages::NAME
                    .like(name)
                    .and(packages::VERSION.like(version)),
            )
            .order_by(packages::PACKAGE_ID, false);

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        Ok(query.fetch()?)
    }

    /// Counts the rows [`Self::find_by_name_version`] would match with no
    /// limit applied.
    pub fn count_by_name_version(&self, name: &str, version: Option<&str>) -> LarderResult<u64> {
        let version = version.unwrap_or("%");

        let count = SelectQuery::<PackageRecord>::from(self.db.clone(), packages::TABLE)
            .filter(
                packages::NAME
                    .like(name)
                    .and(packages::VERSION.like(version)),
            )
            .count()?;

        Ok(count)
    }

    /// Whether a row with exactly this name and version already exists.
    pub fn exists(&self, name: &str, version: &str) -> LarderResult<bool> {
        let count = SelectQuery::<PackageRecord>::from(self.db.clone(), packages::TABLE)
            .filter(
                packages::NAME
                    .eq(name.to_string())
                    .and(packages::VERSION.eq(version.to_string())),
            )
            .count()?;

        Ok(count > 0)
    }

    /// Deletes the row with the given id and returns how many rows went
    /// away. Dependency and filelog rows pointing at the id stay behind.
    pub fn remove_by_id(&self, id: i64) -> LarderResult<usize> {
        let affected = DeleteQuery::from(self.db.clone(), packages::TABLE)
            .filter(packages::PACKAGE_ID.eq(id))
            .execute()?;

        Ok(affected)
    }
}

fn require_name_version(package: &PackageRecord) -> LarderResult<()> {
    if package.name.trim().is_empty() {
        return Err(LarderError::InvalidArgument(
            "package name must not be empty".into(),
        ));
    }
    if package.version.trim().is_empty() {
        return Err(LarderError::InvalidArgument(
            "package version must not be empty".into(),
        ));
    }

    Ok(())
}
