//! Splits records into the five asset-class subsets.

use crate::domain::asset_class::Subset;
use crate::domain::record_table::TransactionRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub subset: Subset,
    pub records: Vec<TransactionRecord>,
}

/// One partition per subset, in [`Subset::ALL`] order, including empty ones.
/// Input order is preserved inside each partition.
pub fn partition(records: Vec<TransactionRecord>) -> Vec<Partition> {
    let mut partitions: Vec<Partition> = Subset::ALL
        .into_iter()
        .map(|subset| Partition {
            subset,
            records: Vec::new(),
        })
        .collect();

    for record in records {
        let subset = Subset::route(&record.asset_class);
        let slot = Subset::ALL
            .iter()
            .position(|s| *s == subset)
            .unwrap_or(Subset::ALL.len() - 1);
        partitions[slot].records.push(record);
    }

    partitions
}
