//! Amount conversions between domain integers and `BIGINT` columns.

use std::num::TryFromIntError;

use sqlx::{Row, postgres::PgRow};

/// Read a non-negative `BIGINT` column as `u64`.
pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Read a positive `BIGINT` quantity column as `u32`.
pub(crate) fn try_get_quantity(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let quantity_i64: i64 = row.try_get(col)?;

    u32::try_from(quantity_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Convert an unsigned amount into its `BIGINT` representation.
pub(crate) fn to_db_amount(amount: u64) -> Result<i64, TryFromIntError> {
    i64::try_from(amount)
}
