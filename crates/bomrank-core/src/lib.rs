//! Bill of materials parsing and top-N part ranking.
//!
//! ```no_run
//! use bomrank_core::BomCollection;
//!
//! let bom = BomCollection::from_path("board.bom")?;
//! for part in bom.top_n()? {
//!     println!("{} {} x{}", part.manufacturer, part.mpn, part.num_occurrences);
//! }
//! # Ok::<(), bomrank_core::BomError>(())
//! ```

pub mod collection;
pub mod error;
pub mod line;
pub mod part;
#[cfg(feature = "table")]
mod table;

pub use collection::BomCollection;
pub use error::{BomError, ErrorKind, FormatError};
pub use line::{LineFormat, ParseLineError, PartRecord, parse_line};
pub use part::{AggregatedPart, PartKey, RankedPart};
#[cfg(feature = "table")]
pub use table::write_table;
