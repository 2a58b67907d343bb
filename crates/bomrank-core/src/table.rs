use std::io::{self, Write};

use comfy_table::{Cell, CellAlignment, Color, Table};

use crate::part::RankedPart;

/// Write a top-N ranking as a formatted table.
///
/// Parts that appear on more than one BOM line are highlighted.
pub fn write_table<W: Write>(parts: &[RankedPart], mut writer: W) -> io::Result<()> {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(comfy_table::ContentArrangement::DynamicFullWidth);

    for (rank, part) in parts.iter().enumerate() {
        let repeated = part.num_occurrences > 1;
        let occurrences_cell = Cell::new(part.num_occurrences).set_alignment(CellAlignment::Right);
        let occurrences_cell = if repeated {
            occurrences_cell.fg(Color::Green)
        } else {
            occurrences_cell
        };

        table.add_row(vec![
            Cell::new(rank + 1).set_alignment(CellAlignment::Right),
            Cell::new(&part.manufacturer),
            Cell::new(&part.mpn),
            Cell::new(part.reference_designators.join(",")),
            occurrences_cell,
        ]);
    }

    table.set_header(vec![
        "#",
        "Manufacturer",
        "MPN",
        "Reference Designators",
        "Occurrences",
    ]);

    writeln!(writer, "{table}")?;
    Ok(())
}
