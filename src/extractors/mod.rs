//! Text extraction from page content streams.

pub mod text;

pub use text::{extract_page_tokens, MAX_FORM_DEPTH, TJ_SPLIT_GAP};
