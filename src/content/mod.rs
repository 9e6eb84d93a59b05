//! PDF content stream parsing.
//!
//! Only the operators that move or show text are modelled; everything else
//! is kept as [`Operator::Other`] so that operand counts stay aligned.

pub mod graphics_state;
pub mod operators;
pub mod parser;

pub use graphics_state::{GraphicsState, GraphicsStateStack, Matrix};
pub use operators::{Operator, TextElement};
pub use parser::parse_content_stream;
