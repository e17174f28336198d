//! The query builder.
//!
//! This module provides a strongly-typed interface for constructing SQL queries
//! without manually concatenating strings. Each query type (SELECT, INSERT, UPDATE, DELETE)
//! has its own builder with chainable methods for composing clauses safely and ergonomically.
//!
//! # Overview
//!
//! The query builder is organized into four main types:
//!
//! - [`SelectQuery`] — Builds `SELECT` statements with support for columns, filters,
//!   ordering, and limits.
//! - [`InsertQuery`] — Builds `INSERT INTO` statements with column-value pairs.
//! - [`UpdateQuery`] — Builds `UPDATE` statements with `SET` and `WHERE` clauses.
//! - [`DeleteQuery`] — Builds `DELETE FROM` statements with filtering conditions.
//!
//! Each builder supports method chaining and produces a final SQL string and bound
//! parameter list that it executes through `rusqlite`. The finished statement is
//! echoed to the trace log with its parameters rendered as literals, so running
//! with tracing at TRACE level shows exactly what was sent to the engine.
//!
//! # Submodules
//!
//! - [`clause`] — Common clause helpers shared between different query types.
//! - [`select`] — Implementation of [`SelectQuery`].
//! - [`insert`] — Implementation of [`InsertQuery`].
//! - [`update`] — Implementation of [`UpdateQuery`].
//! - [`delete`] — Implementation of [`DeleteQuery`].

pub mod clause;
pub mod delete;
pub mod insert;
pub mod select;
pub mod update;

pub use delete::DeleteQuery;
pub use insert::InsertQuery;
pub use select::SelectQuery;
pub use update::UpdateQuery;
