//! Storage backend (Arrow CSV / Parquet)
//!
//! Reads the harness output tables into Arrow record batches, validates the
//! expected schema once, and materializes typed records. Row order is the file
//! order; nothing is sorted or deduplicated here.
//!
//! Format is chosen by extension:
//! - `.parquet` - Parquet via the Arrow reader
//! - `.tsv` - tab delimited text with a header row
//! - anything else - comma delimited text with a header row

use crate::records::{RunRecord, SummaryRecord};
use crate::{Error, Result};
use arrow::array::{Array, Float64Array};
use arrow::compute::kernels::cast::{cast_with_options, CastOptions};
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::{DataType, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use std::fs::File;
use std::io::Seek;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// On-disk layout of an input table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Comma separated values with header
    Csv,
    /// Tab separated values with header
    Tsv,
    /// Apache Parquet
    Parquet,
}

impl TableFormat {
    /// Pick the format from the file extension (case-insensitive)
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("parquet") => Self::Parquet,
            Some("tsv") => Self::Tsv,
            _ => Self::Csv,
        }
    }
}

/// An input table held as Arrow record batches
#[derive(Debug)]
pub struct Table {
    path: PathBuf,
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl Table {
    /// Create a table from existing batches
    ///
    /// Useful for testing; `path` is only used in error messages.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, schema: SchemaRef, batches: Vec<RecordBatch>) -> Self {
        Self {
            path: path.into(),
            schema,
            batches,
        }
    }

    /// Load a table from disk
    ///
    /// # Errors
    /// - [`Error::InputNotFound`] if the file cannot be opened
    /// - [`Error::Storage`] if the contents cannot be decoded
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::InputNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        let format = TableFormat::from_path(path);
        let (schema, batches) = match format {
            TableFormat::Parquet => read_parquet(file)?,
            TableFormat::Csv => read_delimited(file, b',')?,
            TableFormat::Tsv => read_delimited(file, b'\t')?,
        };

        let table = Self::new(path, schema, batches);
        debug!(
            path = %path.display(),
            ?format,
            rows = table.num_rows(),
            columns = table.schema.fields().len(),
            "loaded table"
        );
        Ok(table)
    }

    /// Get the table schema
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Total rows across all batches
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }

    /// Whether the header carries `name`
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.schema.index_of(name).is_ok()
    }

    /// Fail fast if any of `columns` is absent
    ///
    /// # Errors
    /// Returns [`Error::Schema`] naming the first missing column
    pub fn require_columns(&self, columns: &[&str]) -> Result<()> {
        match columns.iter().find(|name| !self.has_column(name)) {
            Some(missing) => Err(Error::schema(&self.path, *missing, "is missing")),
            None => Ok(()),
        }
    }

    /// Read a numeric column as `f64`, in row order
    ///
    /// Integer columns are widened. Null cells become `NaN`.
    ///
    /// # Errors
    /// Returns [`Error::Schema`] if the column is absent or holds non-numeric text
    pub fn column_f64(&self, name: &str) -> Result<Vec<f64>> {
        let index = self
            .schema
            .index_of(name)
            .map_err(|_| Error::schema(&self.path, name, "is missing"))?;

        let options = CastOptions {
            safe: false,
            ..CastOptions::default()
        };

        let mut values = Vec::with_capacity(self.num_rows());
        for batch in &self.batches {
            let cast = cast_with_options(batch.column(index), &DataType::Float64, &options)
                .map_err(|e| Error::schema(&self.path, name, format!("is not numeric: {e}")))?;
            let array = cast
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or_else(|| Error::schema(&self.path, name, "is not numeric"))?;
            values.extend(array.iter().map(|value| value.unwrap_or(f64::NAN)));
        }
        Ok(values)
    }
}

fn read_delimited(mut file: File, delimiter: u8) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let (schema, _) = Format::default()
        .with_header(true)
        .with_delimiter(delimiter)
        .infer_schema(&mut file, None)
        .map_err(|e| Error::Storage(format!("Failed to infer CSV schema: {e}")))?;
    file.rewind()?;

    let schema = Arc::new(schema);
    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_header(true)
        .with_delimiter(delimiter)
        .build(file)
        .map_err(|e| Error::Storage(format!("Failed to create CSV reader: {e}")))?;

    let mut batches = Vec::new();
    for batch in reader {
        let batch =
            batch.map_err(|e| Error::Storage(format!("Failed to read CSV record batch: {e}")))?;
        batches.push(batch);
    }

    Ok((schema, batches))
}

fn read_parquet(file: File) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| Error::Storage(format!("Failed to parse Parquet file: {e}")))?;
    let schema = Arc::clone(builder.schema());

    let reader = builder
        .build()
        .map_err(|e| Error::Storage(format!("Failed to create Parquet reader: {e}")))?;

    let mut batches = Vec::new();
    for batch in reader {
        let batch =
            batch.map_err(|e| Error::Storage(format!("Failed to read record batch: {e}")))?;
        batches.push(batch);
    }

    Ok((schema, batches))
}

/// Load a single run's trajectory
///
/// # Errors
/// [`Error::InputNotFound`], [`Error::Schema`] or [`Error::Storage`]
pub fn load_run<P: AsRef<Path>>(path: P) -> Result<Vec<RunRecord>> {
    let table = Table::load(path)?;
    table.require_columns(&RunRecord::REQUIRED_COLUMNS)?;

    let fraction = table.column_f64(RunRecord::PROCESSED_FRACTION)?;
    let true_f0 = table.column_f64(RunRecord::TRUE_F0)?;
    let estimate = table.column_f64(RunRecord::ESTIMATE_NT)?;

    Ok(fraction
        .into_iter()
        .zip(true_f0)
        .zip(estimate)
        .map(|((x, f0), nt)| RunRecord::new(x, f0, nt))
        .collect())
}

/// Load the across-run summary
///
/// `mean_true_F0` is picked up when present.
///
/// # Errors
/// [`Error::InputNotFound`], [`Error::Schema`] or [`Error::Storage`]
pub fn load_summary<P: AsRef<Path>>(path: P) -> Result<Vec<SummaryRecord>> {
    let table = Table::load(path)?;
    table.require_columns(&SummaryRecord::REQUIRED_COLUMNS)?;

    let fraction = table.column_f64(SummaryRecord::PROCESSED_FRACTION)?;
    let mean = table.column_f64(SummaryRecord::MEAN_ESTIMATE_NT)?;
    let sigma = table.column_f64(SummaryRecord::SIGMA_ESTIMATE_NT)?;

    let mut records: Vec<SummaryRecord> = fraction
        .into_iter()
        .zip(mean)
        .zip(sigma)
        .map(|((x, m), s)| SummaryRecord::new(x, m, s))
        .collect();

    if table.has_column(SummaryRecord::MEAN_TRUE_F0) {
        let true_mean = table.column_f64(SummaryRecord::MEAN_TRUE_F0)?;
        for (record, f0) in records.iter_mut().zip(true_mean) {
            *record = record.with_mean_true_f0(f0);
        }
    }

    Ok(records)
}
