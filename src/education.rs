use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ChoroplethError, Result};

/// One county's attainment figures, as published in the education dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttainmentRecord {
    /// County FIPS code, the join key against the topology.
    pub fips: u32,
    /// Two-letter state abbreviation.
    pub state: String,
    /// County name, e.g. "Autauga County".
    pub area_name: String,
    /// Percentage of adults 25 and older holding at least a bachelor's degree.
    #[serde(rename = "bachelorsOrHigher")]
    pub bachelors_or_higher: f64,
}

/// Read-only FIPS lookup over the education dataset.
#[derive(Debug, Clone, Default)]
pub struct AttainmentIndex {
    by_fips: HashMap<u32, AttainmentRecord>,
}

impl AttainmentIndex {
    /// Index records by FIPS code. A duplicate identifier keeps the later
    /// record.
    pub fn from_records(records: Vec<AttainmentRecord>) -> Self {
        let mut by_fips = HashMap::with_capacity(records.len());
        for record in records {
            by_fips.insert(record.fips, record);
        }
        Self { by_fips }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_fips.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_fips.is_empty()
    }

    /// Look up a county, if present.
    #[inline]
    pub fn get(&self, fips: u32) -> Option<&AttainmentRecord> {
        self.by_fips.get(&fips)
    }

    /// Look up a county that must exist; a miss is the join failure.
    pub fn require(&self, fips: u32) -> Result<&AttainmentRecord> {
        self.by_fips
            .get(&fips)
            .ok_or(ChoroplethError::UnknownCounty(fips))
    }

    /// Observed `(min, max)` of the attainment percentages.
    pub fn extent(&self) -> Result<(f64, f64)> {
        if self.by_fips.is_empty() {
            return Err(ChoroplethError::EmptyDataset);
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for record in self.by_fips.values() {
            min = min.min(record.bachelors_or_higher);
            max = max.max(record.bachelors_or_higher);
        }
        Ok((min, max))
    }
}
