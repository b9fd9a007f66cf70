//! Line-delimited JSON input.
//!
//! [`JsonlReader`] walks a buffered stream one physical line at a time and
//! yields each non-empty line decoded as a JSON object. Line numbers are
//! 1-based and count empty lines too, so they match what an editor shows.

use serde_json::{Map, Value};
use std::fmt;
use std::io::{self, BufRead, Lines};

/// Error produced while reading a JSONL stream
#[derive(Debug)]
pub enum JsonlError {
    /// The line could not be read (I/O failure or invalid UTF-8)
    Io { line: usize, source: io::Error },
    /// The line is not valid JSON
    Malformed {
        line: usize,
        source: serde_json::Error,
    },
    /// The line is valid JSON but not an object
    NotAnObject { line: usize, found: &'static str },
}

impl JsonlError {
    /// The 1-based line the error was raised on
    pub fn line(&self) -> usize {
        match self {
            JsonlError::Io { line, .. }
            | JsonlError::Malformed { line, .. }
            | JsonlError::NotAnObject { line, .. } => *line,
        }
    }
}

impl fmt::Display for JsonlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonlError::Io { line, source } => {
                write!(f, "Failed to read line {}: {}", line, source)
            }
            JsonlError::Malformed { line, source } => {
                write!(f, "Malformed JSON on line {}: {}", line, source)
            }
            JsonlError::NotAnObject { line, found } => {
                write!(f, "Expected a JSON object on line {}, found {}", line, found)
            }
        }
    }
}

impl std::error::Error for JsonlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JsonlError::Io { source, .. } => Some(source),
            JsonlError::Malformed { source, .. } => Some(source),
            JsonlError::NotAnObject { .. } => None,
        }
    }
}

/// One decoded input line
#[derive(Debug, Clone, PartialEq)]
pub struct JsonlRecord {
    /// 1-based physical line number
    pub line: usize,
    pub fields: Map<String, Value>,
}

/// Iterator over the JSON objects of a line-delimited stream.
///
/// Empty lines are skipped and counted. A line holding only whitespace is
/// not empty and fails to parse. Both `\n` and `\r\n` line endings are
/// accepted.
pub struct JsonlReader<R> {
    lines: Lines<R>,
    line: usize,
    skipped_empty: usize,
}

impl<R: BufRead> JsonlReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
            skipped_empty: 0,
        }
    }

    /// Number of empty lines skipped so far
    pub fn skipped_empty(&self) -> usize {
        self.skipped_empty
    }
}

impl<R: BufRead> Iterator for JsonlReader<R> {
    type Item = Result<JsonlRecord, JsonlError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = self.lines.next()?;
            self.line += 1;

            let text = match next {
                Ok(text) => text,
                Err(source) => {
                    return Some(Err(JsonlError::Io {
                        line: self.line,
                        source,
                    }))
                }
            };

            if text.is_empty() {
                self.skipped_empty += 1;
                tracing::debug!("Skipping empty line {}", self.line);
                continue;
            }

            return Some(parse_line(self.line, &text));
        }
    }
}

/// Decode a single line as a JSON object
pub fn parse_line(line: usize, text: &str) -> Result<JsonlRecord, JsonlError> {
    let value: Value =
        serde_json::from_str(text).map_err(|source| JsonlError::Malformed { line, source })?;

    match value {
        Value::Object(fields) => Ok(JsonlRecord { line, fields }),
        other => Err(JsonlError::NotAnObject {
            line,
            found: kind_of(&other),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_all(input: &[u8]) -> Vec<Result<JsonlRecord, JsonlError>> {
        JsonlReader::new(Cursor::new(input.to_vec())).collect()
    }

    #[test]
    fn test_reads_objects_in_order() {
        let records = read_all(b"{\"code\":\"A00\"}\n{\"code\":\"A01\"}\n");

        assert_eq!(records.len(), 2);
        let first = records[0].as_ref().unwrap();
        let second = records[1].as_ref().unwrap();
        assert_eq!(first.line, 1);
        assert_eq!(first.fields["code"], "A00");
        assert_eq!(second.line, 2);
        assert_eq!(second.fields["code"], "A01");
    }

    #[test]
    fn test_missing_trailing_newline() {
        let records = read_all(b"{\"code\":\"A00\"}");
        assert_eq!(records.len(), 1);
        assert!(records[0].is_ok());
    }

    #[test]
    fn test_crlf_line_endings() {
        let records = read_all(b"{\"code\":\"A00\"}\r\n{\"code\":\"A01\"}\r\n");
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.is_ok()));
    }

    #[test]
    fn test_empty_lines_are_skipped_but_counted() {
        let mut reader = JsonlReader::new(Cursor::new(b"\n{\"a\":1}\r\n\r\n{\"a\":2}\n".to_vec()));

        let lines: Vec<usize> = reader.by_ref().map(|r| r.unwrap().line).collect();
        assert_eq!(lines, vec![2, 4]);
        assert_eq!(reader.skipped_empty(), 2);
    }

    #[test]
    fn test_whitespace_only_line_is_malformed() {
        let records = read_all(b"{\"a\":1}\n\n   \n{\"a\":2}\n");

        assert_eq!(records.len(), 3);
        assert!(records[0].is_ok());
        let err = records[1].as_ref().unwrap_err();
        assert!(matches!(err, JsonlError::Malformed { line: 3, .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(read_all(b"").is_empty());
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let records = read_all(b"{\"a\":1}\n{not json}\n");

        let err = records[1].as_ref().unwrap_err();
        assert!(matches!(err, JsonlError::Malformed { line: 2, .. }));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_out_of_range_number_is_malformed() {
        let records = read_all(b"{\"code\": \"A00\", \"detailed_context\": 1e400}\n");

        let err = records[0].as_ref().unwrap_err();
        assert!(matches!(err, JsonlError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_non_object_line_is_rejected() {
        let records = read_all(b"[1, 2]\n");

        let err = records[0].as_ref().unwrap_err();
        assert!(matches!(
            err,
            JsonlError::NotAnObject {
                line: 1,
                found: "an array"
            }
        ));
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let records = read_all(b"{\"a\":1}\n\xff\xfe\n");

        let err = records[1].as_ref().unwrap_err();
        assert!(matches!(err, JsonlError::Io { line: 2, .. }));
        assert_eq!(err.line(), 2);
    }
}
