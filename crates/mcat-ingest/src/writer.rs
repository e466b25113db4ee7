//! Output writers.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{IngestError, Result};

/// Quote a field if it contains the delimiter, a quote or a line break.
///
/// Embedded quotes are doubled.
pub fn escape_field(field: &str, delimiter: char) -> Cow<'_, str> {
    let needs_quotes = field
        .chars()
        .any(|c| c == delimiter || matches!(c, '"' | '\n' | '\r'));
    if needs_quotes {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Join fields into one output line, escaping as needed.
pub fn join_fields<S: AsRef<str>>(fields: &[S], delimiter: char) -> String {
    let mut line = String::new();
    for (idx, field) in fields.iter().enumerate() {
        if idx > 0 {
            line.push(delimiter);
        }
        line.push_str(&escape_field(field.as_ref(), delimiter));
    }
    line
}

/// Write pre-formatted lines, each terminated by `\n`.
pub fn write_lines<I, S>(path: &Path, lines: I) -> Result<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let write_err = |source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    let mut count = 0usize;
    for line in lines {
        writer.write_all(line.as_ref().as_bytes()).map_err(write_err)?;
        writer.write_all(b"\n").map_err(write_err)?;
        count += 1;
    }
    writer.flush().map_err(write_err)?;
    tracing::debug!(path = %path.display(), lines = count, "wrote output");
    Ok(count)
}

/// Write serializable rows as CSV under an explicit header.
///
/// The header is written even when `rows` is empty. Each row must
/// serialize to `header.len()` fields in header order.
pub fn write_serialized<T: Serialize>(
    path: &Path,
    header: &[&str],
    rows: &[T],
    delimiter: u8,
) -> Result<usize> {
    let csv_err = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)
        .map_err(csv_err)?;
    writer.write_record(header).map_err(csv_err)?;
    for row in rows {
        writer.serialize(row).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "wrote CSV output");
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain", ','), "plain");
        assert_eq!(escape_field("a,b", ','), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\"", ','), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines", ','), "\"two\nlines\"");
        assert_eq!(escape_field("a,b", ';'), "a,b");
    }

    #[test]
    fn test_join_fields() {
        let line = join_fields(&["2020-01-04", "Hello, World", "Artist"], ',');
        assert_eq!(line, "2020-01-04,\"Hello, World\",Artist");
        let empty: [&str; 0] = [];
        assert_eq!(join_fields(&empty, ','), "");
    }

    #[test]
    fn test_write_lines_and_serialized() {
        #[derive(Serialize)]
        struct Row {
            year: i32,
            avg: f64,
        }

        let dir = tempfile::tempdir().unwrap();
        let lines_path = dir.path().join("lines.csv");
        let written = write_lines(&lines_path, ["a,b", "c,d"]).unwrap();
        assert_eq!(written, 2);
        assert_eq!(std::fs::read_to_string(&lines_path).unwrap(), "a,b\nc,d\n");

        let rows_path = dir.path().join("rows.csv");
        let rows = vec![Row { year: 1970, avg: 0.5 }, Row { year: 1971, avg: 120.0 }];
        let written = write_serialized(&rows_path, &["year", "avg"], &rows, b',').unwrap();
        assert_eq!(written, 2);
        assert_eq!(
            std::fs::read_to_string(&rows_path).unwrap(),
            "year,avg\n1970,0.5\n1971,120.0\n"
        );
    }

    #[test]
    fn test_write_serialized_without_rows_keeps_header() {
        #[derive(Serialize)]
        struct Row {
            year: i32,
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        let rows: Vec<Row> = Vec::new();
        let written = write_serialized(&path, &["year", "song_count"], &rows, b';').unwrap();
        assert_eq!(written, 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "year;song_count\n");
    }
}
