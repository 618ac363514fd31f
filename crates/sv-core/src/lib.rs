//! sv-core: stable foundation for sheetviz.
//!
//! Contains:
//! - value (cell values as loaded from a delimited file)
//! - table (column-addressed rows + de-duplication)
//! - time (timestamp parsing and duration helpers)
//! - measure (numeric policy for measure columns)
//! - error (shared error types)

pub mod error;
pub mod measure;
pub mod table;
pub mod time;
pub mod value;

// Re-exports: nice ergonomics for downstream crates
pub use error::{SvError, SvResult};
pub use measure::*;
pub use table::Table;
pub use time::*;
pub use value::{CellKind, CellValue};
