//! The registry schema.
//!
//! Three tables: `packages` holds the records themselves, `dependencies`
//! links a dependant package to the package it depends on, and `filelogs`
//! records the files a package owns. The foreign keys are declarative;
//! enforcement stays at SQLite's default, so removing a package leaves any
//! referencing rows in place.

/// Creation script for the registry tables. Every statement uses
/// `IF NOT EXISTS`, so running the script against an existing registry is a
/// no-op.
pub const CREATE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS packages (
    package_id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    version TEXT NOT NULL,
    homepage TEXT,
    maintainer TEXT,
    email TEXT,
    as_dependency BOOLEAN,
    is_installed BOOLEAN
);

CREATE TABLE IF NOT EXISTS dependencies (
    dependency_id INTEGER PRIMARY KEY,
    dependant_id INTEGER NOT NULL,
    package_id INTEGER NOT NULL,
    FOREIGN KEY (dependant_id) REFERENCES packages (package_id),
    FOREIGN KEY (package_id) REFERENCES packages (package_id)
);

CREATE TABLE IF NOT EXISTS filelogs (
    filelog_id INTEGER PRIMARY KEY,
    path TEXT NOT NULL,
    package_id INTEGER NOT NULL,
    FOREIGN KEY (package_id) REFERENCES packages (package_id)
);
"#;
