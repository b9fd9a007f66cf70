//! Serialization of entities to CSV and JSON arrays.

use crate::entity::Entity;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use std::io::Write;

/// Error type for serialization operations
#[derive(Debug)]
pub enum SerializationError {
    JsonError(serde_json::Error),
    IoError(std::io::Error),
    CsvError(csv::Error),
}

impl From<serde_json::Error> for SerializationError {
    fn from(err: serde_json::Error) -> Self {
        SerializationError::JsonError(err)
    }
}

impl From<std::io::Error> for SerializationError {
    fn from(err: std::io::Error) -> Self {
        SerializationError::IoError(err)
    }
}

impl From<csv::Error> for SerializationError {
    fn from(err: csv::Error) -> Self {
        SerializationError::CsvError(err)
    }
}

impl std::fmt::Display for SerializationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerializationError::JsonError(e) => write!(f, "JSON error: {}", e),
            SerializationError::IoError(e) => write!(f, "IO error: {}", e),
            SerializationError::CsvError(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl std::error::Error for SerializationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SerializationError::JsonError(e) => Some(e),
            SerializationError::IoError(e) => Some(e),
            SerializationError::CsvError(e) => Some(e),
        }
    }
}

/// CSV writer for a single entity type.
///
/// The header row is written as soon as the writer is created, so an empty
/// run still produces a header-only file. Records end in `\r\n` and fields
/// are quoted only when they contain a delimiter, quote, or line break.
pub struct CsvWriter<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl<W: Write> CsvWriter<W> {
    /// Create a CSV writer and write the header for entity type `E`
    pub fn for_entity<E: Entity>(writer: W) -> Result<Self, SerializationError> {
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::CRLF)
            .quote_style(QuoteStyle::Necessary)
            .from_writer(writer);
        tracing::debug!("Writing CSV header for {}", E::NAME);
        writer.write_record(E::FIELDS)?;

        Ok(Self { writer, rows: 0 })
    }

    /// Write one entity as a data row
    pub fn write<E: Entity>(&mut self, entity: &E) -> Result<(), SerializationError> {
        self.writer.write_record(entity.values())?;
        self.rows += 1;
        Ok(())
    }

    /// Number of data rows written, header excluded
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush buffered rows to the underlying writer
    pub fn flush(&mut self) -> Result<(), SerializationError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// JSON array writer
///
/// Collects entities in insertion order and writes them as one
/// pretty-printed array (2-space indent, non-ASCII left unescaped) when
/// [`JsonArrayWriter::finish`] is called. Nothing reaches the underlying
/// writer before then.
pub struct JsonArrayWriter<W: Write, T: Serialize> {
    writer: W,
    entities: Vec<T>,
}

impl<W: Write, T: Serialize> JsonArrayWriter<W, T> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            entities: Vec::new(),
        }
    }

    /// Queue an entity for the array
    pub fn push(&mut self, entity: T) {
        self.entities.push(entity);
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Write the array, flush, and return the number of entries written
    pub fn finish(mut self) -> Result<usize, SerializationError> {
        serde_json::to_writer_pretty(&mut self.writer, &self.entities)?;
        self.writer.flush()?;
        Ok(self.entities.len())
    }
}
