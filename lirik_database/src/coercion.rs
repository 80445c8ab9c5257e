//! Defensive decoding of SQLite columns.
//!
//! SQLite is dynamically typed, so any projected column can hold any storage class
//! regardless of its declared type (and expression columns have no declared type at all).
//! Every row model in this crate reads its columns through [`read_column`] and then
//! applies one of the coercion rules below, so that no unexpected value ever fails a query.

use sqlx::{sqlite::SqliteRow, Row, TypeInfo, ValueRef};


/// A column value, tagged by its runtime storage class.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ColumnValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob,
}

enum StorageClass {
    Null,
    Integer,
    Real,
    Text,
    Blob,
}


pub(crate) fn read_column(row: &SqliteRow, column: &str) -> Result<ColumnValue, sqlx::Error> {
    let storage_class = {
        let raw_value = row.try_get_raw(column)?;

        if raw_value.is_null() {
            StorageClass::Null
        } else {
            match raw_value.type_info().name() {
                "INTEGER" => StorageClass::Integer,
                "REAL" => StorageClass::Real,
                "TEXT" => StorageClass::Text,
                _ => StorageClass::Blob,
            }
        }
    };

    Ok(match storage_class {
        StorageClass::Null => ColumnValue::Null,
        StorageClass::Integer => ColumnValue::Integer(row.try_get_unchecked::<i64, _>(column)?),
        StorageClass::Real => ColumnValue::Real(row.try_get_unchecked::<f64, _>(column)?),
        StorageClass::Text => ColumnValue::Text(row.try_get_unchecked::<String, _>(column)?),
        StorageClass::Blob => ColumnValue::Blob,
    })
}


impl ColumnValue {
    /// Text stays text, anything else becomes an empty string.
    pub(crate) fn into_string_or_empty(self) -> String {
        match self {
            Self::Text(text) => text,
            _ => String::new(),
        }
    }

    /// Text stays text, anything else becomes `None`.
    pub(crate) fn into_optional_string(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Numbers are formatted as text, missing and binary values become an empty string.
    pub(crate) fn into_string_lossy(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Integer(integer) => integer.to_string(),
            Self::Real(real) => real.to_string(),
            Self::Null | Self::Blob => String::new(),
        }
    }

    /// Non-blank text stays text, anything else becomes `fallback`.
    pub(crate) fn into_non_blank_string_or(self, fallback: &str) -> String {
        match self {
            Self::Text(text) if !text.trim().is_empty() => text,
            _ => fallback.to_string(),
        }
    }

    /// Integers (and integral-looking reals or text) become `Some`, anything else `None`.
    pub(crate) fn into_optional_integer(self) -> Option<i64> {
        match self {
            Self::Integer(integer) => Some(integer),
            Self::Real(real) if real.is_finite() => Some(real.trunc() as i64),
            Self::Text(text) => text.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// Text containing valid JSON is parsed, anything else becomes `None`.
    pub(crate) fn into_optional_json(self) -> Option<serde_json::Value> {
        match self {
            Self::Text(text) => serde_json::from_str(&text).ok(),
            _ => None,
        }
    }
}
