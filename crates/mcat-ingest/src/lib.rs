//! Delimited text ingestion.
//!
//! This crate provides the I/O edges of a cleaning job:
//!
//! - **Tokenizer**: split one line into fields, honouring quoted spans
//! - **Reader**: input checks (existence, size, encoding) and line loading
//! - **Writer**: field escaping, line output and serde-driven CSV output
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use mcat_ingest::{read_lines, tokenize};
//!
//! let lines = read_lines(Path::new("spotify.csv"))?;
//! let record = tokenize(&lines[1], ',', 19);
//! assert_eq!(record.fields.len(), 19);
//! ```

mod error;
mod reader;
mod tokenizer;
mod writer;

// === Error Types ===
pub use error::{IngestError, Result};

// === Tokenizer ===
pub use tokenizer::{Tokenized, is_header_line, strip_enclosing_quotes, tokenize, unescape_quotes};

// === Reading ===
pub use reader::{
    MAX_INPUT_FILE_SIZE, check_file_size, check_file_size_with_limit, read_lines, validate_encoding,
};

// === Writing ===
pub use writer::{escape_field, join_fields, write_lines, write_serialized};
