//! Data Processor Module
//! Turns loaded DataFrames into the typed tables each chart consumes.

use super::loader::DataLoader;
use super::schema::*;
use crate::error::Result;
use polars::prelude::*;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Binary survey response stored in the bar table's `COUNT` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Response {
    No,
    Yes,
}

impl Response {
    /// 0 maps to No, 1 to Yes; anything else has no response.
    pub fn from_indicator(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(Response::No)
        } else if value == 1.0 {
            Some(Response::Yes)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Response::No => "No",
            Response::Yes => "Yes",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarRow {
    pub label: String,
    pub response: Option<Response>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarTable {
    pub rows: Vec<BarRow>,
}

impl BarTable {
    /// Build from `(label, indicator)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            rows: pairs
                .into_iter()
                .map(|(label, v)| BarRow {
                    label: label.to_string(),
                    response: Response::from_indicator(v),
                })
                .collect(),
        }
    }
}

/// Wide Sankey table: one row per intermediate label, one value column per
/// origin or destination code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SankeyTable {
    pub labels: Vec<String>,
    columns: HashMap<String, Vec<f64>>,
}

impl SankeyTable {
    pub fn new(labels: Vec<String>, columns: HashMap<String, Vec<f64>>) -> Self {
        Self { labels, columns }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Value in `code`'s column for `row`; absent cells read as zero.
    pub fn value(&self, code: &str, row: usize) -> f64 {
        self.columns
            .get(code)
            .and_then(|values| values.get(row))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Adjacency table: a label column plus one numeric column per candidate
/// neighbour, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyTable {
    pub row_labels: Vec<String>,
    pub columns: Vec<(String, Vec<f64>)>,
}

/// Handles transformation of raw frames into typed tables.
pub struct DataProcessor;

impl DataProcessor {
    pub fn bar_table(df: &DataFrame) -> Result<BarTable> {
        DataLoader::require_columns(df, BAR_TABLE, &[BAR_LABEL_COLUMN, BAR_COUNT_COLUMN])?;

        let labels = Self::labelled_rows(df, BAR_TABLE, BAR_LABEL_COLUMN)?;
        let counts = DataLoader::numeric_values(df, BAR_TABLE, BAR_COUNT_COLUMN)?;

        let rows: Vec<BarRow> = labels
            .into_iter()
            .map(|(i, label)| {
                let count = counts[i];
                let response = count.and_then(Response::from_indicator);
                if response.is_none() {
                    warn!("bar row {i} ({label}): COUNT {count:?} is neither 0 nor 1, skipped");
                }
                BarRow { label, response }
            })
            .collect();

        debug!("bar table: {} rows", rows.len());
        Ok(BarTable { rows })
    }

    pub fn sankey_table(df: &DataFrame) -> Result<SankeyTable> {
        let mut required = vec![SANKEY_LABEL_COLUMN];
        required.extend(ORIGIN_CODES);
        required.extend(DESTINATION_CODES);
        DataLoader::require_columns(df, SANKEY_TABLE, &required)?;

        let (rows, labels): (Vec<usize>, Vec<String>) =
            Self::labelled_rows(df, SANKEY_TABLE, SANKEY_LABEL_COLUMN)?
                .into_iter()
                .unzip();
        let mut columns = HashMap::new();
        for code in ORIGIN_CODES.iter().chain(DESTINATION_CODES.iter()) {
            let values = Self::zero_filled(df, SANKEY_TABLE, code)?;
            columns.insert(code.to_string(), rows.iter().map(|&i| values[i]).collect());
        }

        debug!("sankey table: {} intermediate labels", labels.len());
        Ok(SankeyTable::new(labels, columns))
    }

    pub fn adjacency_table(df: &DataFrame) -> Result<AdjacencyTable> {
        DataLoader::require_columns(df, NETWORK_TABLE, &[NETWORK_LABEL_COLUMN])?;

        let (rows, row_labels): (Vec<usize>, Vec<String>) =
            Self::labelled_rows(df, NETWORK_TABLE, NETWORK_LABEL_COLUMN)?
                .into_iter()
                .unzip();
        let mut columns = Vec::new();
        for name in DataLoader::get_columns(df) {
            if name == NETWORK_LABEL_COLUMN {
                continue;
            }
            let values = Self::zero_filled(df, NETWORK_TABLE, &name)?;
            columns.push((name, rows.iter().map(|&i| values[i]).collect()));
        }

        debug!(
            "adjacency table: {} rows x {} columns",
            row_labels.len(),
            columns.len()
        );
        Ok(AdjacencyTable {
            row_labels,
            columns,
        })
    }

    /// `(row, label)` for every row with a label. Unlabelled rows are left
    /// out of the table entirely.
    fn labelled_rows(df: &DataFrame, table: &str, column: &str) -> Result<Vec<(usize, String)>> {
        let labels = DataLoader::string_values(df, table, column)?;
        let unlabelled = labels.iter().filter(|l| l.is_none()).count();
        if unlabelled > 0 {
            warn!("{table}.{column}: {unlabelled} rows without a label skipped");
        }
        Ok(labels
            .into_iter()
            .enumerate()
            .filter_map(|(i, label)| Some((i, label?)))
            .collect())
    }

    /// Numeric column with empty cells read as zero.
    fn zero_filled(df: &DataFrame, table: &str, column: &str) -> Result<Vec<f64>> {
        let values = DataLoader::numeric_values(df, table, column)?;
        let empty = values.iter().filter(|v| v.is_none()).count();
        if empty > 0 {
            warn!("{table}.{column}: {empty} empty cells read as 0");
        }
        Ok(values.into_iter().map(|v| v.unwrap_or(0.0)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(columns: Vec<Column>) -> DataFrame {
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn test_response_mapping() {
        assert_eq!(Response::from_indicator(0.0), Some(Response::No));
        assert_eq!(Response::from_indicator(1.0), Some(Response::Yes));
        assert_eq!(Response::from_indicator(2.0), None);
        assert_eq!(Response::Yes.as_str(), "Yes");
    }

    #[test]
    fn test_bar_table_keeps_unknown_indicator_as_none() {
        let df = frame(vec![
            Column::new("LABEL".into(), ["a", "b", "c"]),
            Column::new("COUNT".into(), [1i64, 0, 7]),
        ]);
        let table = DataProcessor::bar_table(&df).unwrap();

        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0].response, Some(Response::Yes));
        assert_eq!(table.rows[1].response, Some(Response::No));
        assert_eq!(table.rows[2].response, None);
    }

    #[test]
    fn test_unlabelled_rows_are_skipped() {
        let df = frame(vec![
            Column::new("LABEL".into(), [Some("a"), None, Some("b")]),
            Column::new("COUNT".into(), [1i64, 1, 0]),
        ]);
        let table = DataProcessor::bar_table(&df).unwrap();
        assert_eq!(table, BarTable::from_pairs([("a", 1.0), ("b", 0.0)]));

        let df = frame(vec![
            Column::new("LABELS".into(), [Some("D"), None, Some("F")]),
            Column::new("USA".into(), [0.0, 5.0, 2.0]),
        ]);
        let table = DataProcessor::adjacency_table(&df).unwrap();
        assert_eq!(table.row_labels, vec!["D", "F"]);
        assert_eq!(table.columns[0], ("USA".to_string(), vec![0.0, 2.0]));
    }

    #[test]
    fn test_sankey_table_requires_every_code() {
        let df = frame(vec![
            Column::new("LABEL".into(), ["x"]),
            Column::new("PS".into(), [1.0]),
        ]);
        let err = DataProcessor::sankey_table(&df).unwrap_err();
        assert!(err.to_string().contains("OMP"));
    }

    #[test]
    fn test_adjacency_table_skips_label_column() {
        let df = frame(vec![
            Column::new("LABELS".into(), ["D", "F"]),
            Column::new("USA".into(), [1.0, 0.0]),
            Column::new("FRA".into(), [Some(0.0), None]),
        ]);
        let table = DataProcessor::adjacency_table(&df).unwrap();

        assert_eq!(table.row_labels, vec!["D", "F"]);
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.columns[0], ("USA".to_string(), vec![1.0, 0.0]));
        assert_eq!(table.columns[1], ("FRA".to_string(), vec![0.0, 0.0]));
    }
}
