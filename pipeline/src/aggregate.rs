use crate::record::TransactionRecord;

/// Concatenates the records of each table, keeping table order and the order within each table.
pub fn concat<I>(record_sets: I) -> Vec<TransactionRecord>
where
    I: IntoIterator<Item = Vec<TransactionRecord>>,
{
    record_sets.into_iter().flatten().collect()
}
