//! # jsonl-projector: JSONL to CSV and JSON array conversion
//!
//! Reads a line-delimited JSON file, projects every record onto its `code`
//! and `detailed_context` fields, and writes the projected records twice:
//! as a CSV table and as a pretty-printed JSON array.
//!
//! ## Example
//!
//! Input (`codes.jsonl`):
//!
//! ```text
//! {"code": "A00", "description": "x", "detailed_context": "Cholera"}
//! {"code": "B01"}
//! ```
//!
//! CSV output:
//!
//! ```text
//! code,detailed_context
//! A00,Cholera
//! B01,
//! ```
//!
//! JSON output:
//!
//! ```text
//! [
//!   {
//!     "code": "A00",
//!     "detailed_context": "Cholera"
//!   },
//!   {
//!     "code": "B01",
//!     "detailed_context": ""
//!   }
//! ]
//! ```

pub mod entity;
pub mod extraction;
pub mod jsonl;
pub mod projector;
pub mod serialization;

// Re-export key types
pub use entity::{CodeContext, Entity};
pub use extraction::Extractor;
pub use jsonl::{JsonlError, JsonlReader, JsonlRecord};
pub use projector::{convert, convert_streams, project, ConversionSummary, ConvertError};
pub use serialization::{CsvWriter, JsonArrayWriter, SerializationError};
