// src/export/mod.rs

use anyhow::{Context, Result};
use arrow::{
    array::{ArrayRef, Date32Builder, Float64Builder, Int64Builder, StringBuilder},
    record_batch::RecordBatch,
};
use chrono::NaiveDate;
use parquet::{
    arrow::ArrowWriter,
    basic::{BrotliLevel, Compression},
    file::properties::WriterProperties,
};
use std::{fs, fs::File, path::Path, sync::Arc};
use tracing::debug;

use crate::frame::{ColumnData, Frame};
use crate::schema::build_arrow_schema;

/// Convert typed columns into Arrow arrays, nulls carried through.
pub fn to_record_batch(frame: &Frame) -> Result<RecordBatch> {
    let schema = build_arrow_schema(&frame.dtypes());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(frame.n_cols());

    for col in frame.columns() {
        let array: ArrayRef = match col.data() {
            ColumnData::Int64(v) => {
                let mut b = Int64Builder::new();
                for opt in v {
                    b.append_option(*opt);
                }
                Arc::new(b.finish())
            }
            ColumnData::Float64(v) => {
                let mut b = Float64Builder::new();
                for opt in v {
                    b.append_option(*opt);
                }
                Arc::new(b.finish())
            }
            ColumnData::Date(v) => {
                let mut b = Date32Builder::new();
                for opt in v {
                    b.append_option(opt.map(days_since_epoch));
                }
                Arc::new(b.finish())
            }
            ColumnData::Utf8(v) => {
                let mut b = StringBuilder::new();
                for opt in v {
                    b.append_option(opt.as_deref());
                }
                Arc::new(b.finish())
            }
        };
        arrays.push(array);
    }

    RecordBatch::try_new(schema, arrays).context("building record batch")
}

fn days_since_epoch(d: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    d.signed_duration_since(epoch).num_days() as i32
}

/// Write the frame as one brotli-compressed parquet file. Returns the
/// size of the written file in bytes.
pub fn write_parquet<P: AsRef<Path>>(frame: &Frame, path: P) -> Result<u64> {
    let batch = to_record_batch(frame)?;

    let file = File::create(path.as_ref())
        .with_context(|| format!("creating file {}", path.as_ref().display()))?;

    let props = WriterProperties::builder()
        .set_compression(Compression::BROTLI(BrotliLevel::try_new(5)?))
        .build();

    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), Some(props)).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch to parquet")?;
    writer.close().context("closing parquet writer")?;

    let metadata = fs::metadata(path.as_ref()).context("getting file metadata")?;
    debug!(bytes = metadata.len(), "wrote {}", path.as_ref().display());

    Ok(metadata.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Column, Frame};
    use arrow::array::Array;
    use tempfile::tempdir;

    fn frame() -> Frame {
        Frame::new(vec![
            Column::new(
                "make",
                ColumnData::Utf8(vec![Some("BMW".into()), Some("Audi".into()), None]),
            ),
            Column::new("year", ColumnData::Int64(vec![Some(2011), None, Some(2016)])),
            Column::new(
                "hp",
                ColumnData::Float64(vec![Some(335.0), Some(252.0), None]),
            ),
            Column::new(
                "listed",
                ColumnData::Date(vec![
                    NaiveDate::from_ymd_opt(2017, 1, 31),
                    None,
                    NaiveDate::from_ymd_opt(2017, 2, 28),
                ]),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn batch_mirrors_frame_shape_and_nulls() -> Result<()> {
        let batch = to_record_batch(&frame())?;
        assert_eq!(batch.num_columns(), 4);
        assert_eq!(batch.num_rows(), 3);
        // one null per column in the fixture
        for i in 0..4 {
            assert_eq!(batch.column(i).null_count(), 1);
        }
        Ok(())
    }

    #[test]
    fn date32_epoch_math() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(days_since_epoch(epoch), 0);
        assert_eq!(
            days_since_epoch(NaiveDate::from_ymd_opt(1970, 1, 31).unwrap()),
            30
        );
    }

    #[test]
    fn parquet_file_is_written() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("cars.parquet");
        let bytes = write_parquet(&frame(), &path)?;
        assert!(bytes > 0);
        assert_eq!(fs::metadata(&path)?.len(), bytes);
        Ok(())
    }
}
