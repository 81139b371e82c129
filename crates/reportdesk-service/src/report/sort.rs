//! Record ordering.

use std::cmp::Ordering;

use reportdesk_core::types::SortKey;
use reportdesk_entity::record::Record;

/// Reorder `records` by `key`.
///
/// `name` is ascending, every other key descending. Missing or malformed
/// timestamps and document dates compare lowest. The sort is stable, so
/// ties keep their previous relative order.
pub fn sort_records(records: &mut [Record], key: SortKey) {
    records.sort_by(|a, b| compare(a, b, key));
}

fn compare(a: &Record, b: &Record, key: SortKey) -> Ordering {
    let ascending = match key {
        SortKey::Latest => a.timestamp.cmp(&b.timestamp),
        SortKey::Date => a.document_day().cmp(&b.document_day()),
        SortKey::Name => a
            .name_surname
            .to_lowercase()
            .cmp(&b.name_surname.to_lowercase())
            .then_with(|| a.name_surname.cmp(&b.name_surname)),
        SortKey::Amount => a.amount.total_cmp(&b.amount),
    };
    if key.is_ascending() {
        ascending
    } else {
        ascending.reverse()
    }
}
