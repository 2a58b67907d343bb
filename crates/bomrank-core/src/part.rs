use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::line::PartRecord;

/// Identity of a part. The same MPN can be made by several manufacturers, so
/// both fields are needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartKey {
    pub manufacturer: String,
    pub part_number: String,
}

impl PartKey {
    pub fn new(manufacturer: impl Into<String>, part_number: impl Into<String>) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            part_number: part_number.into(),
        }
    }
}

impl fmt::Display for PartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.manufacturer, self.part_number)
    }
}

/// A part merged from every BOM line sharing its [`PartKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedPart {
    pub manufacturer: String,
    pub part_number: String,
    pub reference_designators: BTreeSet<String>,
    /// Number of BOM lines that contributed to this part.
    pub occurrences: usize,
}

impl AggregatedPart {
    pub(crate) fn from_record(record: PartRecord) -> Self {
        Self {
            manufacturer: record.manufacturer,
            part_number: record.part_number,
            reference_designators: record.reference_designators,
            occurrences: 1,
        }
    }

    /// Fold another line for the same part into this one.
    pub(crate) fn merge(&mut self, record: PartRecord) {
        debug_assert_eq!(self.manufacturer, record.manufacturer);
        debug_assert_eq!(self.part_number, record.part_number);
        self.reference_designators
            .extend(record.reference_designators);
        self.occurrences += 1;
    }

    pub fn key(&self) -> PartKey {
        PartKey::new(&self.manufacturer, &self.part_number)
    }

    pub fn to_ranked(&self) -> RankedPart {
        RankedPart {
            manufacturer: self.manufacturer.clone(),
            mpn: self.part_number.clone(),
            // BTreeSet iterates in ascending lexical order
            reference_designators: self.reference_designators.iter().cloned().collect(),
            num_occurrences: self.occurrences,
        }
    }
}

/// One row of a top-N ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedPart {
    #[serde(rename = "Manufacturer")]
    pub manufacturer: String,
    #[serde(rename = "MPN")]
    pub mpn: String,
    #[serde(rename = "ReferenceDesignators")]
    pub reference_designators: Vec<String>,
    #[serde(rename = "NumOccurrences")]
    pub num_occurrences: usize,
}
