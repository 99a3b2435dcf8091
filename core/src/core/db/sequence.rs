//! Monotonic id allocation. Ids are never reused, even after deletes.

use crate::core::db::error::DatabaseError;
use redb::{ReadableTable, TableDefinition, WriteTransaction};

const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");

pub const SERIES: &str = "series";
pub const PERMIT: &str = "permit";
pub const CACHE_ITEM: &str = "cache_item";

pub fn init(txn: &WriteTransaction) -> Result<(), DatabaseError> {
    txn.open_table(SEQUENCES)?;
    Ok(())
}

/// Allocates the next id of the named sequence. Ids start at 1.
pub fn next(txn: &WriteTransaction, name: &str) -> Result<u64, DatabaseError> {
    reserve(txn, name, 1)
}

/// Allocates `count` consecutive ids and returns the first one.
pub fn reserve(txn: &WriteTransaction, name: &str, count: u64) -> Result<u64, DatabaseError> {
    let mut table = txn.open_table(SEQUENCES)?;
    let last = table.get(name)?.map(|g| g.value()).unwrap_or(0);
    table.insert(name, last + count)?;
    Ok(last + 1)
}
