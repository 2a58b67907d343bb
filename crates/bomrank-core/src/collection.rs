use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{BomError, FormatError};
use crate::line::{ParseLineError, PartRecord, parse_line};
use crate::part::{AggregatedPart, PartKey, RankedPart};

/// Parts read from a BOM file, merged by [`PartKey`].
///
/// The first line of a BOM file holds `n`, the number of top occurring parts
/// to report. Every other line is a part in one of the formats accepted by
/// [`parse_line`].
#[derive(Debug, Clone, Default)]
pub struct BomCollection {
    parts: HashMap<PartKey, AggregatedPart>,
    /// `None` until a BOM has been read successfully
    top_count: Option<usize>,
}

impl BomCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection populated from the BOM file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BomError> {
        let mut bom = Self::new();
        bom.read(path)?;
        Ok(bom)
    }

    /// Drop all parts and forget the top-N count.
    pub fn reset(&mut self) {
        self.parts.clear();
        self.top_count = None;
    }

    /// Number of unique parts
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The top-N count from the last successful read.
    pub fn top_count(&self) -> Option<usize> {
        self.top_count
    }

    pub fn get(&self, key: &PartKey) -> Option<&AggregatedPart> {
        self.parts.get(key)
    }

    /// Iterate over the merged parts in no particular order.
    pub fn parts(&self) -> impl Iterator<Item = &AggregatedPart> {
        self.parts.values()
    }

    /// Merge one parsed line into the collection.
    ///
    /// This does not populate the collection: the top-N count only comes from
    /// [`read`](Self::read), so [`top_n`](Self::top_n) keeps returning
    /// [`BomError::NotPopulated`] until a read succeeds.
    pub fn ingest(&mut self, record: PartRecord) {
        match self.parts.entry(record.key()) {
            Entry::Occupied(mut entry) => {
                log::debug!(
                    "Merging {:?} into {}",
                    record.reference_designators,
                    entry.key()
                );
                entry.get_mut().merge(record);
            }
            Entry::Vacant(entry) => {
                entry.insert(AggregatedPart::from_record(record));
            }
        }
    }

    /// Read the BOM file at `path`, replacing any previously read content.
    pub fn read(&mut self, path: impl AsRef<Path>) -> Result<(), BomError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| {
            self.reset();
            BomError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;
        self.read_from(BufReader::new(file))
    }

    /// Read BOM content from `reader`, replacing any previously read content.
    ///
    /// On error the collection is left empty and unpopulated.
    pub fn read_from<R: BufRead>(&mut self, reader: R) -> Result<(), BomError> {
        self.reset();
        let result = self.populate(reader);
        if result.is_err() {
            self.reset();
        }
        result
    }

    fn populate<R: BufRead>(&mut self, reader: R) -> Result<(), BomError> {
        let mut lines = reader.lines();

        let first = lines.next().ok_or(FormatError::MissingCount)??;
        let first = first.trim();
        let top_count = first
            .parse::<usize>()
            .map_err(|source| FormatError::InvalidCount {
                value: first.to_string(),
                source,
            })?;

        let mut ingested = 0;
        // First line of the current run of blank lines
        let mut blank_run: Option<usize> = None;
        for (index, line) in lines.enumerate() {
            let line = line?;
            // Line 1 holds the count
            let line_number = index + 2;
            if line.trim().is_empty() {
                blank_run.get_or_insert(line_number);
                continue;
            }
            // Blank lines are only tolerated at the end of the file
            if let Some(blank_line) = blank_run {
                return Err(FormatError::Line {
                    line_number: blank_line,
                    source: ParseLineError::Unrecognized {
                        line: String::new(),
                    },
                }
                .into());
            }
            let record =
                parse_line(&line).map_err(|source| FormatError::Line { line_number, source })?;
            self.ingest(record);
            ingested += 1;
        }
        if let Some(blank_line) = blank_run {
            log::debug!("Ignoring trailing blank BOM lines from line {blank_line}");
        }

        if self.parts.len() < top_count {
            return Err(BomError::Validation {
                requested: top_count,
                available: self.parts.len(),
            });
        }

        log::info!(
            "Read {ingested} BOM lines into {} unique parts (top {top_count})",
            self.parts.len()
        );
        self.top_count = Some(top_count);
        Ok(())
    }

    /// The top-N parts, most frequently occurring first.
    ///
    /// Parts are ordered by number of occurrences, then by number of
    /// reference designators, both descending. Remaining ties are broken by
    /// manufacturer and then part number, ascending.
    ///
    /// Returns [`BomError::NotPopulated`] unless a read has succeeded since
    /// construction or the last [`reset`](Self::reset). Parts added with
    /// [`ingest`](Self::ingest) alone do not count as a read.
    pub fn top_n(&self) -> Result<Vec<RankedPart>, BomError> {
        let top_count = self.top_count.ok_or(BomError::NotPopulated)?;

        let mut ranked = self.parts.values().collect::<Vec<_>>();
        ranked.sort_by(|a, b| rank_order(a, b));

        Ok(ranked
            .into_iter()
            .take(top_count)
            .map(AggregatedPart::to_ranked)
            .collect())
    }
}

fn rank_order(a: &AggregatedPart, b: &AggregatedPart) -> Ordering {
    b.occurrences
        .cmp(&a.occurrences)
        .then_with(|| {
            b.reference_designators
                .len()
                .cmp(&a.reference_designators.len())
        })
        .then_with(|| a.manufacturer.cmp(&b.manufacturer))
        .then_with(|| a.part_number.cmp(&b.part_number))
}
