//! Category filtering of dictionary records

use super::loader::Record;

/// Keep only the records satisfying `predicate`, preserving order.
pub fn filter_records<P>(records: &[Record], predicate: P) -> Vec<Record>
where
    P: Fn(&Record) -> bool,
{
    records.iter().filter(|&r| predicate(r)).cloned().collect()
}

/// Predicate matching records whose category equals `category` exactly.
pub fn category_equals(category: &str) -> impl Fn(&Record) -> bool + '_ {
    move |record: &Record| record.category == category
}

/// Keep only the records of the given category.
pub fn filter_by_category(records: &[Record], category: &str) -> Vec<Record> {
    filter_records(records, category_equals(category))
}
