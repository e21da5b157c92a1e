//! CSV Data Loader Module
//! Handles CSV file loading and column extraction using Polars.

use crate::error::{ChartError, Result};
use polars::prelude::*;
use std::path::Path;
use tracing::info;

/// Loads CSV files into Polars DataFrames.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file using Polars. Rows keep their file order.
    pub fn load_csv(file_path: &Path) -> Result<DataFrame> {
        if !file_path.is_file() {
            return Err(ChartError::MissingFile {
                path: file_path.to_path_buf(),
            });
        }

        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_has_header(true)
            .finish()?
            .collect()?;

        info!(
            "Loaded {} ({} rows, {} columns)",
            file_path.display(),
            df.height(),
            df.width()
        );
        Ok(df)
    }

    /// Get list of column names in file order.
    pub fn get_columns(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Fail with a schema error unless every named column is present.
    /// Matching is case sensitive.
    pub fn require_columns(df: &DataFrame, table: &str, columns: &[&str]) -> Result<()> {
        let present = Self::get_columns(df);
        match columns.iter().find(|c| !present.iter().any(|p| p == *c)) {
            Some(missing) => Err(ChartError::missing_column(table, missing)),
            None => Ok(()),
        }
    }

    /// Read a column as display strings. Nulls stay `None`.
    pub fn string_values(
        df: &DataFrame,
        table: &str,
        column: &str,
    ) -> Result<Vec<Option<String>>> {
        let col = df
            .column(column)
            .map_err(|_| ChartError::missing_column(table, column))?;
        let as_str = col.cast(&DataType::String)?;
        let ca = as_str.str()?;

        Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
    }

    /// Read a column as floats. Nulls stay `None`; text that does not parse
    /// as a number is an error.
    pub fn numeric_values(df: &DataFrame, table: &str, column: &str) -> Result<Vec<Option<f64>>> {
        let col = df
            .column(column)
            .map_err(|_| ChartError::missing_column(table, column))?;
        let value_f64 = col.cast(&DataType::Float64)?;
        let value_ca = value_f64.f64()?;

        // A non-strict cast turns unparsable text into nulls; catch those.
        let was_null = col.is_null();
        if let Some(row) =
            (0..col.len()).find(|&i| was_null.get(i) == Some(false) && value_ca.get(i).is_none())
        {
            return Err(ChartError::InvalidValue {
                table: table.to_string(),
                column: column.to_string(),
                row,
            });
        }

        Ok(value_ca.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_missing_file() {
        let err = DataLoader::load_csv(Path::new("/nonexistent/bar_assignment.csv")).unwrap_err();
        assert!(matches!(err, ChartError::MissingFile { .. }));
    }

    #[test]
    fn test_load_preserves_row_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "t.csv", "LABEL,COUNT\nzeta,1\nalpha,0\nmid,1\n");
        let df = DataLoader::load_csv(&path).unwrap();

        assert_eq!(DataLoader::get_columns(&df), vec!["LABEL", "COUNT"]);
        assert_eq!(
            DataLoader::string_values(&df, "bar", "LABEL").unwrap(),
            vec![Some("zeta".into()), Some("alpha".into()), Some("mid".into())]
        );
        assert_eq!(
            DataLoader::numeric_values(&df, "bar", "COUNT").unwrap(),
            vec![Some(1.0), Some(0.0), Some(1.0)]
        );
    }

    #[test]
    fn test_column_names_are_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "t.csv", "label,count\na,1\n");
        let df = DataLoader::load_csv(&path).unwrap();

        let err = DataLoader::require_columns(&df, "bar", &["LABEL", "COUNT"]).unwrap_err();
        assert!(matches!(err, ChartError::MissingColumn { ref column, .. } if column == "LABEL"));
        assert!(DataLoader::string_values(&df, "bar", "LABEL").is_err());
    }

    #[test]
    fn test_empty_label_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "t.csv", "LABEL,COUNT\na,1\n,0\n");
        let df = DataLoader::load_csv(&path).unwrap();

        assert_eq!(
            DataLoader::string_values(&df, "bar", "LABEL").unwrap(),
            vec![Some("a".to_string()), None]
        );
    }

    #[test]
    fn test_text_in_numeric_column_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "t.csv", "LABEL,PS\na,1\nb,lots\n");
        let df = DataLoader::load_csv(&path).unwrap();

        let err = DataLoader::numeric_values(&df, "sankey", "PS").unwrap_err();
        assert!(matches!(err, ChartError::InvalidValue { row: 1, .. }));
    }
}
