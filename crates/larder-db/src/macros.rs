//! Macros for defining entity schemas.
//!
//! The [`define_entity!`] macro generates column constants for a table,
//! tying database column names to Rust types.

/// Defines a module with typed column constants for a database table.
///
/// This macro generates a public module containing `const` declarations
/// for each column, making it easy to reference columns in queries.
///
/// # Syntax
///
/// ```ignore
/// define_entity!(
///     packages {
///         table: "packages",
///         columns: {
///             PACKAGE_ID: i64 => "package_id",
///             NAME: String => "name"
///         }
///     }
/// );
/// ```
///
/// This expands to:
///
/// ```ignore
/// pub mod packages {
///     pub const TABLE: &str = "packages";
///     pub const PACKAGE_ID: larder_db::Col<i64> = larder_db::Col::new("package_id");
///     pub const NAME: larder_db::Col<String> = larder_db::Col::new("name");
/// }
/// ```
#[macro_export]
macro_rules! define_entity {
    (
        $entity:ident {
            table: $table:literal,
            columns: {
                $($col_name:ident: $col_type:ty => $db_col:literal),* $(,)?
            }
        }
    ) => {
        pub mod $entity {
            use $crate::expr::column::Col;

            pub const TABLE: &str = $table;

            $(
                $crate::define_column!($col_name, $col_type, $db_col);
            )*
        }
    };
}

#[macro_export]
macro_rules! define_column {
    // Optional types
    ($name:ident, Option<$inner:ty>, $db_col:literal) => {
        pub const $name: Col<Option<$inner>> = Col::new($db_col);
    };

    // Regular types (fallback)
    ($name:ident, $type:ty, $db_col:literal) => {
        pub const $name: Col<$type> = Col::new($db_col);
    };
}
