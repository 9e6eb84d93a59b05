//! Layout reconstruction: positioned tokens, rows and column mapping.

pub mod columns;
pub mod rows;
pub mod token;

pub use columns::{map_row, FieldRange, MappedRow};
pub use rows::{extract_lines, extract_rows, group_rows, rows_to_lines, try_extract_rows};
pub use token::{PositionedToken, Row};
