//! Record projection and the JSONL to CSV/JSON conversion.
//!
//! Each input line is decoded, projected onto `code` and `detailed_context`,
//! written to the CSV output as it is read, and queued for the JSON array
//! that is written once the input is exhausted. The first error aborts the
//! run; whatever was already written to the outputs stays there.

use crate::entity::CodeContext;
use crate::extraction::Extractor;
use crate::jsonl::{JsonlError, JsonlReader};
use crate::serialization::{CsvWriter, JsonArrayWriter, SerializationError};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Source key for [`CodeContext::code`]
pub const CODE_FIELD: &str = "code";
/// Source key for [`CodeContext::detailed_context`]
pub const DETAILED_CONTEXT_FIELD: &str = "detailed_context";

/// Error type for a conversion run
#[derive(Debug)]
pub enum ConvertError {
    OpenInput { path: PathBuf, source: io::Error },
    CreateOutput { path: PathBuf, source: io::Error },
    Input(JsonlError),
    Output(SerializationError),
}

impl From<JsonlError> for ConvertError {
    fn from(err: JsonlError) -> Self {
        ConvertError::Input(err)
    }
}

impl From<SerializationError> for ConvertError {
    fn from(err: SerializationError) -> Self {
        ConvertError::Output(err)
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::OpenInput { path, source } => {
                write!(f, "Failed to open input {}: {}", path.display(), source)
            }
            ConvertError::CreateOutput { path, source } => {
                write!(f, "Failed to create output {}: {}", path.display(), source)
            }
            ConvertError::Input(e) => write!(f, "{}", e),
            ConvertError::Output(e) => write!(f, "Failed to write output: {}", e),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::OpenInput { source, .. } => Some(source),
            ConvertError::CreateOutput { source, .. } => Some(source),
            ConvertError::Input(e) => Some(e),
            ConvertError::Output(e) => Some(e),
        }
    }
}

/// Outcome of a successful conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionSummary {
    /// Records written to each output
    pub records: usize,
    /// Empty input lines that produced no record
    pub skipped_empty_lines: usize,
}

/// Project an input record onto the fixed `code`/`detailed_context` pair.
///
/// Every other key is dropped. A missing key yields an empty string.
pub fn project<X: Extractor + ?Sized>(record: &X) -> CodeContext {
    CodeContext {
        code: record.extract_or_empty(CODE_FIELD),
        detailed_context: record.extract_or_empty(DETAILED_CONTEXT_FIELD),
    }
}

/// Convert a JSONL file into a CSV file and a JSON array file.
///
/// The input is opened first, then both outputs are created (truncating any
/// existing files). All three handles are closed on every return path.
///
/// # Example
///
/// ```ignore
/// use jsonl_projector::convert;
///
/// let summary = convert("codes.jsonl", "codes.csv", "codes.json")?;
/// println!("{} records", summary.records);
/// ```
pub fn convert(
    input_path: impl AsRef<Path>,
    csv_output_path: impl AsRef<Path>,
    json_output_path: impl AsRef<Path>,
) -> Result<ConversionSummary, ConvertError> {
    let input_path = input_path.as_ref();
    let csv_path = csv_output_path.as_ref();
    let json_path = json_output_path.as_ref();

    tracing::info!(
        "Converting {} -> {}, {}",
        input_path.display(),
        csv_path.display(),
        json_path.display()
    );

    let input = File::open(input_path).map_err(|source| ConvertError::OpenInput {
        path: input_path.to_path_buf(),
        source,
    })?;
    let csv_file = create_output(csv_path)?;
    let json_file = create_output(json_path)?;

    let summary = convert_streams(
        BufReader::new(input),
        BufWriter::new(csv_file),
        BufWriter::new(json_file),
    )?;

    tracing::info!(
        "Wrote {} records ({} empty lines skipped)",
        summary.records,
        summary.skipped_empty_lines
    );
    Ok(summary)
}

/// Run the conversion over already-open streams.
///
/// CSV rows are written as each line is read; the JSON array is written
/// after the last line. Both writers are flushed before returning `Ok`.
pub fn convert_streams<R, C, J>(
    input: R,
    csv_output: C,
    json_output: J,
) -> Result<ConversionSummary, ConvertError>
where
    R: BufRead,
    C: Write,
    J: Write,
{
    let mut csv = CsvWriter::for_entity::<CodeContext>(csv_output)?;
    let mut json = JsonArrayWriter::new(json_output);
    let mut reader = JsonlReader::new(input);

    for record in reader.by_ref() {
        let record = record?;
        let projected = project(&record.fields);
        csv.write(&projected)?;
        json.push(projected);
    }

    csv.flush()?;
    let records = json.finish()?;

    Ok(ConversionSummary {
        records,
        skipped_empty_lines: reader.skipped_empty(),
    })
}

fn create_output(path: &Path) -> Result<File, ConvertError> {
    tracing::debug!("Creating output {}", path.display());
    File::create(path).map_err(|source| ConvertError::CreateOutput {
        path: path.to_path_buf(),
        source,
    })
}
