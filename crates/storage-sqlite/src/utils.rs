//! Helpers shared by the SQLite repositories.
//!
//! Money is stored as decimal text and periods as `YYYY-MM` text; these
//! functions convert between the column values and domain types.

use std::str::FromStr;

use rust_decimal::Decimal;
use tirta_core::errors::{Error, Result, ValidationError};

/// Maximum number of parameters for SQLite IN (...) queries.
///
/// SQLite limits the number of bound parameters per statement (999 on older
/// builds). Lists of ids bound into `IN (...)` are split into chunks of this
/// size with [`chunk_for_sqlite`].
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Chunk a slice into smaller slices for batch SQLite queries.
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

/// Escape character paired with [`like_pattern`] in `LIKE ... ESCAPE`.
pub const LIKE_ESCAPE: char = '\\';

/// Substring pattern for `LIKE`, with `%`, `_` and the escape character
/// matched literally.
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_') || ch == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Parses a decimal column, naming the column on failure.
pub fn parse_decimal(column: &str, value: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| {
        Error::Validation(ValidationError::InvalidInput(format!(
            "Stored {} '{}' is not a decimal: {}",
            column, value, e
        )))
    })
}

pub fn parse_optional_decimal(column: &str, value: Option<&str>) -> Result<Option<Decimal>> {
    value.map(|v| parse_decimal(column, v)).transpose()
}

/// Parses a text-coded enum column through its `FromStr` implementation.
pub fn parse_enum<T>(value: &str) -> Result<T>
where
    T: FromStr<Err = Error>,
{
    T::from_str(value)
}
