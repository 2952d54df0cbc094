//! Per-subset counts of a validation run.

use crate::domain::asset_class::Subset;
use crate::domain::pipeline::ResultTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubsetSummary {
    pub subset: Subset,
    pub rows: usize,
    pub flagged: usize,
    pub rejected: usize,
    /// Rows whose `CheckNegotiationCode` is false. Always 0 for Others.
    pub negotiation_code_failures: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub subsets: Vec<SubsetSummary>,
}

impl RunSummary {
    /// One entry per subset in emission order, empty subsets included.
    pub fn compute(table: &ResultTable) -> Self {
        let subsets = Subset::ALL
            .into_iter()
            .map(|subset| {
                let rows: Vec<_> = table
                    .records
                    .iter()
                    .filter(|r| r.subset == subset)
                    .collect();
                let flagged = rows.iter().filter(|r| r.flag).count();
                SubsetSummary {
                    subset,
                    rows: rows.len(),
                    flagged,
                    rejected: rows.len() - flagged,
                    negotiation_code_failures: rows
                        .iter()
                        .filter(|r| r.checks.check_negotiation_code == Some(false))
                        .count(),
                }
            })
            .collect();
        Self { subsets }
    }

    pub fn total_rows(&self) -> usize {
        self.subsets.iter().map(|s| s.rows).sum()
    }

    pub fn total_flagged(&self) -> usize {
        self.subsets.iter().map(|s| s.flagged).sum()
    }

    pub fn total_rejected(&self) -> usize {
        self.subsets.iter().map(|s| s.rejected).sum()
    }

    pub fn get(&self, subset: Subset) -> Option<&SubsetSummary> {
        self.subsets.iter().find(|s| s.subset == subset)
    }
}
