// src/schema/write.rs

use anyhow::{Context, Result};
use std::{collections::HashMap, fs, io::Write, path::Path};

use super::FieldMeta;

/// Read, merge and write back the column list for `table_name`.
///
/// - `table_name`: logical name, used to form `<table_name>_columns.json`
/// - `dir`: directory containing that JSON file
/// - `fields`: incoming column descriptors to add or override
pub fn write_schema<P: AsRef<Path>>(table_name: &str, dir: P, fields: &[FieldMeta]) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let file_name = format!("{}_columns.json", table_name);
    let path = dir.join(&file_name);

    // Load existing fields, or start empty
    let existing: Vec<FieldMeta> = if path.exists() {
        let f = fs::File::open(&path).with_context(|| format!("opening {}", file_name))?;
        serde_json::from_reader(f).with_context(|| format!("parsing {}", file_name))?
    } else {
        Vec::new()
    };

    // Merge by name: existing → map, then insert/override with incoming
    let mut by_name: HashMap<String, FieldMeta> =
        existing.into_iter().map(|f| (f.name.clone(), f)).collect();
    for field in fields {
        by_name.insert(field.name.clone(), field.clone());
    }

    let mut merged: Vec<FieldMeta> = by_name.into_values().collect();
    merged.sort_by(|a, b| a.name.cmp(&b.name));

    // Write atomically: to tmp file, then rename over original
    let tmp_path = dir.join(format!(".{}.tmp", file_name));
    let mut tmp =
        fs::File::create(&tmp_path).with_context(|| format!("creating {}", tmp_path.display()))?;
    serde_json::to_writer_pretty(&mut tmp, &merged).context("serializing schema JSON")?;
    tmp.write_all(b"\n")?;
    fs::rename(&tmp_path, &path).with_context(|| {
        format!("renaming {} -> {}", tmp_path.display(), path.display())
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::DType;
    use tempfile::tempdir;

    fn meta(name: &str, dtype: DType) -> FieldMeta {
        FieldMeta {
            name: name.into(),
            dtype,
        }
    }

    #[test]
    fn writes_sorted_and_merges_on_rewrite() -> Result<()> {
        let dir = tempdir()?;

        write_schema(
            "cars",
            dir.path(),
            &[meta("year", DType::Int64), meta("make", DType::Utf8)],
        )?;

        let path = dir.path().join("cars_columns.json");
        let first: Vec<FieldMeta> = serde_json::from_reader(fs::File::open(&path)?)?;
        assert_eq!(
            first,
            vec![meta("make", DType::Utf8), meta("year", DType::Int64)]
        );

        // second write overrides one column and adds another
        write_schema(
            "cars",
            dir.path(),
            &[meta("year", DType::Float64), meta("msrp", DType::Int64)],
        )?;

        let merged: Vec<FieldMeta> = serde_json::from_reader(fs::File::open(&path)?)?;
        assert_eq!(
            merged,
            vec![
                meta("make", DType::Utf8),
                meta("msrp", DType::Int64),
                meta("year", DType::Float64),
            ]
        );

        // no tmp file left behind
        assert!(!dir.path().join(".cars_columns.json.tmp").exists());
        Ok(())
    }
}
