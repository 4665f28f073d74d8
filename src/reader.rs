//! CSV loading for daily appointment lists.
//!
//! The upload is a comma-separated file with a header row. The column set
//! is arbitrary at this stage; required columns are only enforced later by
//! schema validation, and extra columns ride along untouched.

use crate::error::Result;
use arrow::compute::concat_batches;
use arrow::csv;
use arrow::record_batch::RecordBatch;
use log::debug;
use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;

/// Read a whole appointment CSV into one record batch, inferring column
/// types from the data
pub fn read_appointments_csv(path: &Path) -> Result<RecordBatch> {
    let mut file = File::open(path)?;

    let format = csv::reader::Format::default().with_header(true);
    let (schema, _) = format.infer_schema(&mut file, None)?;
    file.seek(SeekFrom::Start(0))?;

    let schema = Arc::new(schema);
    let reader = csv::ReaderBuilder::new(schema.clone())
        .with_header(true)
        .build(file)?;
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    let batch = concat_batches(&schema, &batches)?;

    debug!(
        "Read {} rows x {} columns from {}",
        batch.num_rows(),
        batch.num_columns(),
        path.display()
    );
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, Int64Array, StringArray};
    use std::io::Write;

    fn write_temp_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("noshow-{}-{name}", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_reads_rows_and_extra_columns() {
        let path = write_temp_csv(
            "reader.csv",
            "PatientId,Gender,SMS_received\np1,1,1\np2,0,0\n",
        );
        let batch = read_appointments_csv(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 3);

        let ids = batch
            .column_by_name("PatientId")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(ids.value(1), "p2");

        let gender = batch
            .column_by_name("Gender")
            .unwrap()
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap();
        assert_eq!(gender.value(0), 1);
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = read_appointments_csv(Path::new("/nonexistent/today.csv"));
        assert!(matches!(result, Err(crate::error::PredictorError::Io(_))));
    }
}
