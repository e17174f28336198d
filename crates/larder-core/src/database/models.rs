//! Record types stored in the registry.

use larder_db::{define_entity, FromRow};
use rusqlite::{types::ValueRef, Row};
use serde::Serialize;
use tracing::warn;

define_entity!(
    packages {
        table: "packages",
        columns: {
            PACKAGE_ID: i64 => "package_id",
            NAME: String => "name",
            VERSION: String => "version",
            HOMEPAGE: Option<String> => "homepage",
            MAINTAINER: Option<String> => "maintainer",
            EMAIL: Option<String> => "email",
            AS_DEPENDENCY: bool => "as_dependency",
            IS_INSTALLED: bool => "is_installed"
        }
    }
);

/// One field of a [`PackageRecord`], used by [`FieldSet`] to track which
/// columns a result row actually filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PackageField {
    Name,
    Version,
    Homepage,
    Maintainer,
    Email,
    PackageId,
    AsDependency,
    IsInstalled,
}

impl PackageField {
    pub const ALL: [PackageField; 8] = [
        PackageField::Name,
        PackageField::Version,
        PackageField::Homepage,
        PackageField::Maintainer,
        PackageField::Email,
        PackageField::PackageId,
        PackageField::AsDependency,
        PackageField::IsInstalled,
    ];

    const fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// The set of fields a query result populated on a [`PackageRecord`].
///
/// Only meaningful on records coming back from a read: a field is in the set
/// iff its column appeared in the result row with a recognized type. Records
/// built for writing carry the empty set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FieldSet(u8);

impl FieldSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        let mut set = Self::empty();
        for field in PackageField::ALL {
            set.insert(field);
        }
        set
    }

    pub fn insert(&mut self, field: PackageField) {
        self.0 |= field.mask();
    }

    pub fn contains(&self, field: PackageField) -> bool {
        self.0 & field.mask() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }
}

/// One row of the `packages` table.
///
/// `package_id` is the engine-assigned key; `0` marks a record that has not
/// been stored yet.
#[derive(Debug, Default, Clone, Serialize)]
pub struct PackageRecord {
    pub package_id: i64,
    pub name: String,
    pub version: String,
    pub homepage: Option<String>,
    pub maintainer: Option<String>,
    pub email: Option<String>,
    pub as_dependency: bool,
    pub is_installed: bool,

    #[serde(skip_serializing)]
    pub populated: FieldSet,
}

/// Materializes a [`PackageRecord`] from whatever columns the row carries.
///
/// Columns are matched by name, so the same implementation serves full-row
/// and projected selects. A column with an unexpected storage type is logged
/// and skipped rather than failing the whole row; its field simply stays out
/// of `populated`. `NULL` is a legal value for the optional text columns and
/// still marks them populated.
impl FromRow for PackageRecord {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let mut record = PackageRecord::default();
        let stmt = row.as_ref();

        for idx in 0..stmt.column_count() {
            let column = stmt.column_name(idx)?;
            let value = row.get_ref(idx)?;

            match column {
                "package_id" => match value {
                    ValueRef::Integer(id) => {
                        record.package_id = id;
                        record.populated.insert(PackageField::PackageId);
                    }
                    other => skip_column(column, other),
                },
                "name" => match value {
                    ValueRef::Text(text) => {
                        record.name = String::from_utf8_lossy(text).into_owned();
                        record.populated.insert(PackageField::Name);
                    }
                    other => skip_column(column, other),
                },
                "version" => match value {
                    ValueRef::Text(text) => {
                        record.version = String::from_utf8_lossy(text).into_owned();
                        record.populated.insert(PackageField::Version);
                    }
                    other => skip_column(column, other),
                },
                "homepage" => match value {
                    ValueRef::Text(text) => {
                        record.homepage = Some(String::from_utf8_lossy(text).into_owned());
                        record.populated.insert(PackageField::Homepage);
                    }
                    ValueRef::Null => {
                        record.populated.insert(PackageField::Homepage);
                    }
                    other => skip_column(column, other),
                },
                "maintainer" => match value {
                    ValueRef::Text(text) => {
                        record.maintainer = Some(String::from_utf8_lossy(text).into_owned());
                        record.populated.insert(PackageField::Maintainer);
                    }
                    ValueRef::Null => {
                        record.populated.insert(PackageField::Maintainer);
                    }
                    other => skip_column(column, other),
                },
                "email" => match value {
                    ValueRef::Text(text) => {
                        record.email = Some(String::from_utf8_lossy(text).into_owned());
                        record.populated.insert(PackageField::Email);
                    }
                    ValueRef::Null => {
                        record.populated.insert(PackageField::Email);
                    }
                    other => skip_column(column, other),
                },
                "as_dependency" => match value {
                    ValueRef::Integer(flag) => {
                        record.as_dependency = flag != 0;
                        record.populated.insert(PackageField::AsDependency);
                    }
                    other => skip_column(column, other),
                },
                "is_installed" => match value {
                    ValueRef::Integer(flag) => {
                        record.is_installed = flag != 0;
                        record.populated.insert(PackageField::IsInstalled);
                    }
                    other => skip_column(column, other),
                },
                other => {
                    warn!("ignoring unrecognized column '{other}' in result row");
                }
            }
        }

        Ok(record)
    }
}

fn skip_column(column: &str, value: ValueRef) {
    warn!(
        "column '{column}' holds a {} value, skipping field",
        value.data_type()
    );
}
