//! Age segmentation — fixed-boundary binning of the joined profile's age.

use crate::merge::MergedRow;
use serde::{Deserialize, Serialize};

/// Categorical age segment. Bins are half-open:
/// [18, 35) Young, [35, 60) Middle-aged, [60, 100) Senior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeGroup {
    Young,
    #[serde(rename = "Middle-aged")]
    MiddleAged,
    Senior,
}

impl AgeGroup {
    /// The label used in serialized output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Young => "Young",
            Self::MiddleAged => "Middle-aged",
            Self::Senior => "Senior",
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Bin an age into its segment. Ages outside [18, 100) have no segment —
/// a valid state, not an error.
pub fn age_group_for(age: u32) -> Option<AgeGroup> {
    match age {
        18..=34 => Some(AgeGroup::Young),
        35..=59 => Some(AgeGroup::MiddleAged),
        60..=99 => Some(AgeGroup::Senior),
        _ => None,
    }
}

/// Assign `age_group` on every merged row from its joined profile's age.
/// Assignment overwrites whatever was there: running segment twice over
/// the same table yields identical values.
pub fn segment(mut merged: Vec<MergedRow>) -> Vec<MergedRow> {
    for row in &mut merged {
        row.age_group = age_group_for(row.profile.age);
    }
    merged
}
