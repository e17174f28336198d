pub mod escape;
pub mod expr;
pub mod macros;
pub mod query;
pub mod traits;

pub use escape::*;
pub use query::*;
pub use traits::FromRow;

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::{Connection, Row};

    use super::*;
    use crate::traits::Expression as _;

    #[derive(Debug, Clone)]
    struct Package {
        pub id: i64,
        pub name: String,
        pub version: String,
        pub homepage: Option<String>,
        pub installed: bool,
    }

    impl FromRow for Package {
        fn from_row(row: &Row) -> rusqlite::Result<Self> {
            Ok(Self {
                id: row.get("id")?,
                name: row.get("name")?,
                version: row.get("version")?,
                homepage: row.get("homepage")?,
                installed: row.get("installed")?,
            })
        }
    }

    #[derive(Debug, Clone)]
    struct PackageName {
        pub name: String,
    }

    impl FromRow for PackageName {
        fn from_row(row: &Row) -> rusqlite::Result<Self> {
            Ok(Self {
                name: row.get("name")?,
            })
        }
    }

    define_entity!(
        packages {
            table: "packages",
            columns: {
                ID: i64 => "id",
                NAME: String => "name",
                VERSION: String => "version",
                HOMEPAGE: Option<String> => "homepage",
                INSTALLED: bool => "installed"
            }
        }
    );

    fn setup_db() -> Arc<Mutex<Connection>> {
        let conn = Connection::open_in_memory().unwrap();

        conn.execute(
            "CREATE TABLE packages (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                version TEXT NOT NULL,
                homepage TEXT,
                installed INTEGER NOT NULL DEFAULT 1
            )",
            [],
        )
        .unwrap();

        Arc::new(Mutex::new(conn))
    }

    fn seed(db: &Arc<Mutex<Connection>>, name: &str, version: &str, homepage: Option<&str>) -> i64 {
        InsertQuery::into(db.clone(), packages::TABLE)
            .set(packages::NAME, name.to_string())
            .set(packages::VERSION, version.to_string())
            .set(packages::HOMEPAGE, homepage.map(str::to_string))
            .set(packages::INSTALLED, true)
            .execute()
            .unwrap()
    }

    #[test]
    fn test_insert() {
        let db = setup_db();

        let id = seed(&db, "feh", "3.61.2", Some("https://feh.finalrewind.org"));
        assert!(id > 0);

        let pkg = SelectQuery::<Package>::from(db, packages::TABLE)
            .filter(packages::ID.eq(id))
            .fetch_one()
            .unwrap()
            .unwrap();

        assert_eq!(pkg.id, id);
        assert_eq!(pkg.name, "feh");
        assert_eq!(pkg.version, "3.61.2");
        assert_eq!(pkg.homepage, Some("https://feh.finalrewind.org".into()));
        assert!(pkg.installed);
    }

    #[test]
    fn test_select_with_like() {
        let db = setup_db();

        seed(&db, "zls", "0.15.1", None);
        seed(&db, "rust-analyzer", "1.92.0-nightly", None);

        let pkgs = SelectQuery::<PackageName>::from(db, packages::TABLE)
            .select(&[packages::NAME])
            .filter(packages::NAME.like("rust%"))
            .fetch()
            .unwrap();

        assert_eq!(pkgs.len(), 1);
        assert_eq!(pkgs[0].name, "rust-analyzer");
    }

    #[test]
    fn test_ilike_ignores_case() {
        let db = setup_db();

        seed(&db, "RipGrep", "14.1.1", None);

        let pkgs = SelectQuery::<Package>::from(db, packages::TABLE)
            .filter(packages::NAME.ilike("ripgrep"))
            .fetch()
            .unwrap();
        assert_eq!(pkgs.len(), 1);
        assert_eq!(pkgs[0].name, "RipGrep");
    }

    #[test]
    fn test_like_binds_pattern_verbatim() {
        let db = setup_db();

        seed(&db, "rust-analyzer", "1.92.0-nightly", None);

        // Without explicit wildcards the pattern only matches the full text.
        let pkgs = SelectQuery::<Package>::from(db.clone(), packages::TABLE)
            .filter(packages::NAME.like("rust"))
            .fetch()
            .unwrap();
        assert!(pkgs.is_empty());

        let pkgs = SelectQuery::<Package>::from(db, packages::TABLE)
            .filter(packages::NAME.like("rust-analyzer"))
            .fetch()
            .unwrap();
        assert_eq!(pkgs.len(), 1);
    }

    #[test]
    fn test_update() {
        let db = setup_db();

        let id = seed(&db, "feh", "3.61.2", None);

        let affected = UpdateQuery::table(db.clone(), packages::TABLE)
            .set(packages::VERSION, "3.62".to_string())
            .set(packages::HOMEPAGE, Some("https://feh.finalrewind.org".to_string()))
            .filter(packages::ID.eq(id))
            .execute()
            .unwrap();
        assert_eq!(affected, 1);

        let pkg = SelectQuery::<Package>::from(db, packages::TABLE)
            .filter(packages::ID.eq(id))
            .fetch_one()
            .unwrap()
            .unwrap();
        assert_eq!(pkg.version, "3.62");
        assert_eq!(pkg.homepage, Some("https://feh.finalrewind.org".into()));
    }

    #[test]
    fn test_delete_with_in() {
        let db = setup_db();

        let first = seed(&db, "feh", "3.61.2", None);
        seed(&db, "zls", "0.15.1", None);
        let third = seed(&db, "jq", "1.8.1", None);

        let affected = DeleteQuery::from(db.clone(), packages::TABLE)
            .filter(packages::ID.in_(vec![first, third]))
            .execute()
            .unwrap();
        assert_eq!(affected, 2);

        let remaining = SelectQuery::<Package>::from(db, packages::TABLE)
            .fetch()
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "zls");
    }

    #[test]
    fn test_null_filters() {
        let db = setup_db();

        seed(&db, "feh", "3.61.2", Some("https://feh.finalrewind.org"));
        seed(&db, "zls", "0.15.1", None);

        let without_homepage = SelectQuery::<Package>::from(db.clone(), packages::TABLE)
            .filter(packages::HOMEPAGE.null())
            .fetch()
            .unwrap();
        assert_eq!(without_homepage.len(), 1);
        assert_eq!(without_homepage[0].name, "zls");

        let with_homepage = SelectQuery::<Package>::from(db, packages::TABLE)
            .filter(packages::HOMEPAGE.not_null())
            .fetch()
            .unwrap();
        assert_eq!(with_homepage.len(), 1);
        assert_eq!(with_homepage[0].name, "feh");
    }

    #[test]
    fn test_logical_ops() {
        let db = setup_db();

        seed(&db, "feh", "3.61.2", None);
        seed(&db, "zls", "0.15.1", None);
        seed(&db, "jq", "1.8.1", None);

        let pkgs = SelectQuery::<Package>::from(db.clone(), packages::TABLE)
            .filter(packages::NAME.eq("feh".to_string()).or(packages::NAME.eq("jq".to_string())))
            .fetch()
            .unwrap();
        assert_eq!(pkgs.len(), 2);

        let pkgs = SelectQuery::<Package>::from(db, packages::TABLE)
            .filter(
                packages::INSTALLED
                    .eq(true)
                    .and(packages::NAME.not_in(vec!["zls".to_string()])),
            )
            .fetch()
            .unwrap();
        assert_eq!(pkgs.len(), 2);
    }

    #[test]
    fn test_order_limit_count() {
        let db = setup_db();

        seed(&db, "zls", "0.15.1", None);
        seed(&db, "feh", "3.61.2", None);
        seed(&db, "jq", "1.8.1", None);

        let count = SelectQuery::<Package>::from(db.clone(), packages::TABLE)
            .count()
            .unwrap();
        assert_eq!(count, 3);

        let pkgs = SelectQuery::<Package>::from(db, packages::TABLE)
            .order_by(packages::NAME, false)
            .limit(1)
            .fetch()
            .unwrap();
        assert_eq!(pkgs.len(), 1);
        assert_eq!(pkgs[0].name, "feh");
    }

    #[test]
    fn test_comparisons() {
        let db = setup_db();

        let first = seed(&db, "feh", "3.61.2", None);
        seed(&db, "zls", "0.15.1", None);
        seed(&db, "jq", "1.8.1", None);

        let after_first = SelectQuery::<Package>::from(db.clone(), packages::TABLE)
            .filter(packages::ID.gt(first))
            .fetch()
            .unwrap();
        assert_eq!(after_first.len(), 2);

        let not_feh = SelectQuery::<Package>::from(db, packages::TABLE)
            .filter(packages::NAME.ne("feh".to_string()))
            .fetch()
            .unwrap();
        assert_eq!(not_feh.len(), 2);
    }

    #[test]
    fn test_fetch_one_missing() {
        let db = setup_db();

        seed(&db, "feh", "3.61.2", None);

        let pkg = SelectQuery::<Package>::from(db, packages::TABLE)
            .filter(packages::NAME.eq("ghost".to_string()))
            .fetch_one()
            .unwrap();
        assert!(pkg.is_none());
    }
}
