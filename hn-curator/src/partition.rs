use crate::types::{ClassificationResult, Item};
use serde::Serialize;

/// Accepted items and the backup list, both in classification order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Partition {
    accepted: Vec<Item>,
    rejected: Vec<ClassificationResult>,
}

impl Partition {
    pub fn from_results(results: Vec<ClassificationResult>) -> Self {
        let mut partition = Self::default();
        for result in results {
            if result.is_accepted() {
                partition.accepted.push(result.item);
            } else {
                partition.rejected.push(result);
            }
        }
        partition
    }

    pub fn accepted(&self) -> &[Item] {
        &self.accepted
    }

    /// Rejected items with their causes.
    pub fn rejected(&self) -> &[ClassificationResult] {
        &self.rejected
    }

    pub fn rejected_items(&self) -> impl Iterator<Item = &Item> {
        self.rejected.iter().map(|result| &result.item)
    }

    /// False when nothing was rejected; renderers omit the backup section then.
    pub fn has_backup(&self) -> bool {
        !self.rejected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
