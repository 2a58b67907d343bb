//! Parsing of individual BOM lines.
//!
//! A BOM line describes one part and the reference designators it is placed
//! at. Three encodings are accepted:
//!
//! ```text
//! AXXX-1000:Panasonic:D1,D8,D9               (colon)
//! Wintermute Systems -- CASE-19201:A2,A3      (dashed)
//! Z1,Z3;40001;Keystone                        (semicolon)
//! ```

use std::collections::BTreeSet;
use std::fmt;

use crate::part::PartKey;

/// Separator between manufacturer and part number in the dashed format.
const DASHED_SEPARATOR: &str = " -- ";

/// The encoding a BOM line was written in.
///
/// Variants are declared in detection precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineFormat {
    /// `PARTNUMBER:MANUFACTURER:REFDES,...`
    Colon,
    /// `MANUFACTURER -- PARTNUMBER:REFDES,...`
    Dashed,
    /// `REFDES,...;PARTNUMBER;MANUFACTURER`
    Semicolon,
}

impl LineFormat {
    /// Detect which format a line is structurally written in, if any.
    ///
    /// Only delimiters are inspected; field contents are validated by
    /// [`parse_line`]. A line with more colon or semicolon fields than its
    /// format allows is rejected rather than having the extra fields dropped.
    pub fn detect(line: &str) -> Option<Self> {
        let line = line.trim();
        match line.matches(':').count() {
            2 => return Some(LineFormat::Colon),
            1 => {
                let (head, _) = line.split_once(':')?;
                if head.contains(DASHED_SEPARATOR) {
                    return Some(LineFormat::Dashed);
                }
            }
            _ => {}
        }
        (line.matches(';').count() == 2).then_some(LineFormat::Semicolon)
    }
}

impl fmt::Display for LineFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineFormat::Colon => write!(f, "colon"),
            LineFormat::Dashed => write!(f, "dashed"),
            LineFormat::Semicolon => write!(f, "semicolon"),
        }
    }
}

/// Which identity field of a line was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Manufacturer,
    PartNumber,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Manufacturer => write!(f, "manufacturer"),
            Field::PartNumber => write!(f, "part number"),
        }
    }
}

/// Errors produced while parsing a single BOM line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseLineError {
    #[error("unrecognized BOM line format: {line:?}")]
    Unrecognized { line: String },

    #[error("empty {field} in {format} BOM line: {line:?}")]
    EmptyField {
        field: Field,
        format: LineFormat,
        line: String,
    },
}

impl ParseLineError {
    /// The offending line text.
    pub fn line(&self) -> &str {
        match self {
            ParseLineError::Unrecognized { line } | ParseLineError::EmptyField { line, .. } => line,
        }
    }
}

/// One parsed BOM line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartRecord {
    pub manufacturer: String,
    pub part_number: String,
    pub reference_designators: BTreeSet<String>,
    pub format: LineFormat,
}

impl PartRecord {
    pub fn key(&self) -> PartKey {
        PartKey::new(&self.manufacturer, &self.part_number)
    }

    /// The (manufacturer, part number, designators) tuple, ignoring the
    /// format the line was written in.
    pub fn as_tuple(&self) -> (&str, &str, &BTreeSet<String>) {
        (
            &self.manufacturer,
            &self.part_number,
            &self.reference_designators,
        )
    }
}

/// Parse one BOM line into a [`PartRecord`].
pub fn parse_line(line: &str) -> Result<PartRecord, ParseLineError> {
    let line = line.trim();
    let unrecognized = || ParseLineError::Unrecognized {
        line: line.to_string(),
    };

    let format = LineFormat::detect(line).ok_or_else(unrecognized)?;
    let (manufacturer, part_number, designators) = match format {
        LineFormat::Colon => {
            let mut fields = line.split(':');
            let (Some(mpn), Some(mfr), Some(refs)) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(unrecognized());
            };
            (mfr, mpn, refs)
        }
        LineFormat::Dashed => {
            let (head, refs) = line.split_once(':').ok_or_else(unrecognized)?;
            let (mfr, mpn) = head.split_once(DASHED_SEPARATOR).ok_or_else(unrecognized)?;
            (mfr, mpn, refs)
        }
        LineFormat::Semicolon => {
            let mut fields = line.split(';');
            let (Some(refs), Some(mpn), Some(mfr)) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(unrecognized());
            };
            (mfr, mpn, refs)
        }
    };

    let manufacturer = manufacturer.trim();
    let part_number = part_number.trim();
    for (field, value) in [
        (Field::Manufacturer, manufacturer),
        (Field::PartNumber, part_number),
    ] {
        if value.is_empty() {
            return Err(ParseLineError::EmptyField {
                field,
                format,
                line: line.to_string(),
            });
        }
    }

    log::debug!("Parsed {format} BOM line: {line}");
    Ok(PartRecord {
        manufacturer: manufacturer.to_string(),
        part_number: part_number.to_string(),
        reference_designators: split_designators(designators),
        format,
    })
}

/// Split a comma separated designator list into a set, dropping blanks.
fn split_designators(s: &str) -> BTreeSet<String> {
    s.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn designators(refs: &[&str]) -> BTreeSet<String> {
        refs.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_parse_colon_format() {
        let record = parse_line("AXXX-1000:Panasonic:D1,D8,D9").unwrap();
        assert_eq!(record.format, LineFormat::Colon);
        assert_eq!(record.manufacturer, "Panasonic");
        assert_eq!(record.part_number, "AXXX-1000");
        assert_eq!(record.reference_designators, designators(&["D1", "D8", "D9"]));
    }

    #[test]
    fn test_parse_dashed_format() {
        let record = parse_line("Wintermute Systems -- CASE-19201:A2,A3").unwrap();
        assert_eq!(record.format, LineFormat::Dashed);
        assert_eq!(record.manufacturer, "Wintermute Systems");
        assert_eq!(record.part_number, "CASE-19201");
        assert_eq!(record.reference_designators, designators(&["A2", "A3"]));
    }

    #[test]
    fn test_parse_semicolon_format() {
        let record = parse_line("Z1,Z3;40001;Keystone").unwrap();
        assert_eq!(record.format, LineFormat::Semicolon);
        assert_eq!(record.manufacturer, "Keystone");
        assert_eq!(record.part_number, "40001");
        assert_eq!(record.reference_designators, designators(&["Z1", "Z3"]));
    }

    #[test]
    fn test_formats_agree_on_same_part() {
        let colon = parse_line("CRCW0603:Vishay:R2,R1").unwrap();
        let dashed = parse_line("Vishay -- CRCW0603:R1,R2").unwrap();
        let semicolon = parse_line("R1,R2;CRCW0603;Vishay").unwrap();

        assert_eq!(colon.as_tuple(), dashed.as_tuple());
        assert_eq!(dashed.as_tuple(), semicolon.as_tuple());
        assert_eq!(colon.key(), semicolon.key());
    }

    #[test]
    fn test_duplicate_designators_collapse() {
        let record = parse_line("Z1,Z3,Z1;40001;Keystone").unwrap();
        assert_eq!(record.reference_designators, designators(&["Z1", "Z3"]));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let record = parse_line("  Wintermute Systems   --   CASE-19201 : A2 , A3  \n").unwrap();
        assert_eq!(record.manufacturer, "Wintermute Systems");
        assert_eq!(record.part_number, "CASE-19201");
        assert_eq!(record.reference_designators, designators(&["A2", "A3"]));
    }

    #[test]
    fn test_identity_fields_trimmed_in_every_format() {
        let colon = parse_line(" AXXX-1000 : Panasonic :D1").unwrap();
        let semicolon = parse_line("D1; AXXX-1000 ; Panasonic ").unwrap();
        assert_eq!(colon.key(), PartKey::new("Panasonic", "AXXX-1000"));
        assert_eq!(colon.as_tuple(), semicolon.as_tuple());
    }

    #[test]
    fn test_empty_designator_list() {
        let record = parse_line("AXXX-1000:Panasonic:").unwrap();
        assert!(record.reference_designators.is_empty());
    }

    #[test]
    fn test_unrecognized_line() {
        let err = parse_line("this is not a bom line").unwrap_err();
        assert_eq!(
            err,
            ParseLineError::Unrecognized {
                line: "this is not a bom line".to_string()
            }
        );
        assert_eq!(err.line(), "this is not a bom line");
    }

    #[test]
    fn test_single_colon_without_dashes_is_unrecognized() {
        assert!(matches!(
            parse_line("Panasonic AXXX-1000:D1"),
            Err(ParseLineError::Unrecognized { .. })
        ));
    }

    #[test]
    fn test_too_many_fields_is_unrecognized() {
        for line in ["A:B:C:D", "R;M;F;X"] {
            assert_eq!(LineFormat::detect(line), None);
            assert_eq!(
                parse_line(line),
                Err(ParseLineError::Unrecognized {
                    line: line.to_string()
                })
            );
        }
    }

    #[test]
    fn test_empty_identity_field() {
        let err = parse_line(":Panasonic:D1").unwrap_err();
        assert!(matches!(
            err,
            ParseLineError::EmptyField {
                field: Field::PartNumber,
                format: LineFormat::Colon,
                ..
            }
        ));

        let err = parse_line("D1;40001;  ").unwrap_err();
        assert!(matches!(
            err,
            ParseLineError::EmptyField {
                field: Field::Manufacturer,
                ..
            }
        ));
    }

    #[test]
    fn test_detection_precedence() {
        // Two colons win over the dashed separator and semicolons.
        assert_eq!(LineFormat::detect("A -- B:C:D"), Some(LineFormat::Colon));
        assert_eq!(LineFormat::detect("A:B:C;D;E"), Some(LineFormat::Colon));
        // One colon with a dashed head wins over semicolons.
        assert_eq!(
            LineFormat::detect("X;Y -- Z:R1;R2"),
            Some(LineFormat::Dashed)
        );
        // A single colon without the separator falls through to semicolons.
        assert_eq!(LineFormat::detect("R1:R2;MPN;MFR"), Some(LineFormat::Semicolon));
        assert_eq!(LineFormat::detect("garbage"), None);
    }

    #[test]
    fn test_dashed_precedence_parses_fields() {
        let record = parse_line("A -- B:C:D").unwrap();
        assert_eq!(record.part_number, "A -- B");
        assert_eq!(record.manufacturer, "C");
        assert_eq!(record.reference_designators, designators(&["D"]));
    }
}
