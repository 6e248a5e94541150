use std::collections::HashMap;

use crate::engine::record::NormalizedRecord;

pub const DEFAULT_LATEST_LIMIT: usize = 10;

/// Latest record per (commodity, district), newest first, at most `limit` of them.
///
/// On equal timestamps the record later in `records` wins within a group; across groups ties
/// are broken by the group key.
pub fn latest_per_group(records: &[NormalizedRecord], limit: usize) -> Vec<NormalizedRecord> {
    let mut latest: HashMap<(Option<&str>, Option<&str>), &NormalizedRecord> = HashMap::new();
    for record in records {
        let key = (record.dimension("commodity"), record.dimension("district"));
        latest
            .entry(key)
            .and_modify(|current| {
                if record.timestamp >= current.timestamp {
                    *current = record;
                }
            })
            .or_insert(record);
    }

    let mut rows: Vec<_> = latest.into_iter().collect();
    rows.sort_by(|(ka, a), (kb, b)| b.timestamp.cmp(&a.timestamp).then_with(|| ka.cmp(kb)));
    rows.into_iter()
        .take(limit)
        .map(|(_, record)| record.clone())
        .collect()
}
