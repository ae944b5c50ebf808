//! CSV loading with per-row validation.
//! See ARCHITECTURE.md §6.2

use std::path::Path;

use tracing::info;

use toxtriage_common::error::{Result, ToxtriageError};

use crate::record::BenchmarkRecord;

/// Load and validate the whole benchmark file. Any malformed or
/// out-of-contract row fails the load with its row number; a benchmark
/// with silently skipped records would not be a benchmark.
pub fn load_dataset(path: &Path) -> Result<Vec<BenchmarkRecord>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        ToxtriageError::Dataset(format!("cannot open {}: {e}", path.display()))
    })?;

    let mut records = Vec::new();
    for (i, row) in reader.deserialize().enumerate() {
        // +2: one for the header line, one for zero-based enumeration
        let line = i + 2;
        let record: BenchmarkRecord = row.map_err(|e| {
            ToxtriageError::Dataset(format!("row {line}: {e}"))
        })?;
        record.validate(line)?;
        records.push(record);
    }

    info!(path = %path.display(), records = records.len(), "benchmark dataset loaded");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Lang;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    const HEADER: &str = "id,text,lang,expected_score,irony,profanity\n";

    #[test]
    fn test_load_valid_dataset() {
        let f = write_csv(&format!(
            "{HEADER}\
             c-001,You are a wonderful person,en,0.02,false,false\n\
             c-002,\"Świetnie, po prostu genialnie\",pl,0.55,true,false\n\
             c-003,You absolute idiot,en,0.85,false,true\n"
        ));
        let records = load_dataset(f.path()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].lang, Lang::Pl);
        assert!(records[1].irony);
        assert_eq!(records[2].expected_score, 0.85);
    }

    #[test]
    fn test_out_of_range_score_fails_with_row() {
        let f = write_csv(&format!(
            "{HEADER}\
             c-001,fine,en,0.1,false,false\n\
             c-002,broken,en,1.3,false,false\n"
        ));
        let err = load_dataset(f.path()).unwrap_err();
        assert!(err.to_string().contains("row 3"), "got: {err}");
    }

    #[test]
    fn test_unknown_language_tag_fails() {
        let f = write_csv(&format!("{HEADER}c-001,hallo,de,0.1,false,false\n"));
        let err = load_dataset(f.path()).unwrap_err();
        assert!(err.to_string().contains("row 2"), "got: {err}");
    }

    #[test]
    fn test_missing_column_fails() {
        let f = write_csv(&format!("{HEADER}c-001,no score or flags,en\n"));
        assert!(load_dataset(f.path()).is_err());
    }
}
