//! Value parsers used by the sanitizer.

mod numeric;

pub use numeric::{parse_binary, parse_float, parse_integer};
