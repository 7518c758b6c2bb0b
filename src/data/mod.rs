//! Dataset loading from delimited text.
//!
//! Reads a CSV file with a header row, splits off the target column, and
//! turns every column into numbers: numeric columns are parsed as `f64`,
//! text columns are replaced by category codes (the index of each value in
//! the sorted set of distinct values).

use crate::error::{Result, TreeError};
use crate::primitives::Matrix;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// A fully numeric training set ready for [`C45Classifier::fit`].
///
/// [`C45Classifier::fit`]: crate::tree::C45Classifier::fit
///
/// # Examples
///
/// ```
/// use c45tree::data::Dataset;
///
/// let csv = "Outlook,Humidity,Play\nSunny,85,No\nRain,80,Yes\nOvercast,70,Yes\n";
/// let ds = Dataset::from_reader(csv.as_bytes(), "Play").expect("valid csv");
/// assert_eq!(ds.n_samples(), 3);
/// assert_eq!(ds.feature_names(), &["Outlook", "Humidity"]);
/// assert_eq!(ds.labels(), &[0, 1, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Matrix<f64>,
    labels: Vec<usize>,
    feature_names: Vec<String>,
    class_names: Option<Vec<String>>,
}

/// One column after numeric conversion.
struct EncodedColumn {
    values: Vec<f64>,
    categories: Option<Vec<String>>,
}

/// Parses every cell as a finite `f64`, or `None` if any cell is not one.
fn parse_numeric(cells: &[String]) -> Option<Vec<f64>> {
    cells
        .iter()
        .map(|c| c.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect()
}

/// Encodes text cells as indices into their sorted distinct values.
fn encode_categories(cells: &[String]) -> (Vec<usize>, Vec<String>) {
    let mut categories: Vec<String> = cells.to_vec();
    categories.sort();
    categories.dedup();
    let codes = cells
        .iter()
        .map(|c| categories.binary_search(c).unwrap_or_default())
        .collect();
    (codes, categories)
}

fn encode_feature(name: &str, cells: &[String]) -> EncodedColumn {
    if let Some(values) = parse_numeric(cells) {
        return EncodedColumn {
            values,
            categories: None,
        };
    }
    let (codes, categories) = encode_categories(cells);
    debug!(
        column = name,
        n_categories = categories.len(),
        "converting column from text to numbers"
    );
    EncodedColumn {
        values: codes.into_iter().map(|c| c as f64).collect(),
        categories: Some(categories),
    }
}

/// Numeric targets must already be class labels; text targets are encoded.
fn encode_target(cells: &[String]) -> Result<(Vec<usize>, Option<Vec<String>>)> {
    let Some(values) = parse_numeric(cells) else {
        let (codes, categories) = encode_categories(cells);
        return Ok((codes, Some(categories)));
    };

    let labels = values
        .iter()
        .enumerate()
        .map(|(row, &v)| {
            if v >= 0.0 && v.fract() == 0.0 && v < usize::MAX as f64 {
                Ok(v as usize)
            } else {
                Err(TreeError::InvalidLabel {
                    value: cells[row].clone(),
                    row,
                })
            }
        })
        .collect::<Result<Vec<usize>>>()?;
    Ok((labels, None))
}

impl Dataset {
    /// Builds a dataset from already numeric parts.
    ///
    /// # Errors
    ///
    /// Returns an error if the label count or the name count does not match
    /// the matrix shape.
    pub fn new(
        features: Matrix<f64>,
        labels: Vec<usize>,
        feature_names: Vec<String>,
    ) -> Result<Self> {
        if labels.len() != features.n_rows() {
            return Err(TreeError::dimension_mismatch(
                "labels",
                features.n_rows(),
                labels.len(),
            ));
        }
        if feature_names.len() != features.n_cols() {
            return Err(TreeError::dimension_mismatch(
                "feature_names",
                features.n_cols(),
                feature_names.len(),
            ));
        }
        Ok(Self {
            features,
            labels,
            feature_names,
            class_names: None,
        })
    }

    /// Loads a dataset from a CSV file with a header row.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the CSV file
    /// * `target` - Name of the label column
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed, the target
    /// column is missing, there are no data rows, or a numeric target value
    /// is not a nonnegative integer.
    pub fn from_csv<P: AsRef<Path>>(path: P, target: &str) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), target, "loading dataset");
        let file = File::open(path)?;
        Self::from_reader(file, target)
    }

    /// Loads a dataset from any reader producing CSV text.
    ///
    /// # Errors
    ///
    /// See [`Dataset::from_csv`].
    pub fn from_reader<R: Read>(reader: R, target: &str) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let target_idx = headers
            .iter()
            .position(|h| h == target)
            .ok_or_else(|| TreeError::MissingColumn {
                name: target.to_string(),
                available: headers.clone(),
            })?;

        let mut columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for record in rdr.records() {
            let record = record?;
            for (column, cell) in columns.iter_mut().zip(record.iter()) {
                column.push(cell.to_string());
            }
        }

        let n_rows = columns[target_idx].len();
        if n_rows == 0 {
            return Err(TreeError::invalid_input("dataset has no data rows"));
        }

        let (labels, class_names) = encode_target(&columns[target_idx])?;

        let mut feature_names = Vec::with_capacity(headers.len() - 1);
        let mut encoded = Vec::with_capacity(headers.len() - 1);
        for (idx, (name, cells)) in headers.iter().zip(&columns).enumerate() {
            if idx == target_idx {
                continue;
            }
            encoded.push(encode_feature(name, cells));
            feature_names.push(name.clone());
        }

        let n_features = encoded.len();
        let mut data = Vec::with_capacity(n_rows * n_features);
        for row in 0..n_rows {
            data.extend(encoded.iter().map(|col| col.values[row]));
        }
        let features = Matrix::from_vec(n_rows, n_features, data)?;

        info!(
            n_samples = n_rows,
            n_features,
            n_categorical = encoded.iter().filter(|c| c.categories.is_some()).count(),
            "dataset loaded"
        );

        Ok(Self {
            features,
            labels,
            feature_names,
            class_names,
        })
    }

    /// Feature matrix (n_samples × n_features).
    #[must_use]
    pub fn features(&self) -> &Matrix<f64> {
        &self.features
    }

    /// One class label per row.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Column names of the feature matrix, in column order.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Original text of each class code, when the target column was text.
    #[must_use]
    pub fn class_names(&self) -> Option<&[String]> {
        self.class_names.as_deref()
    }

    /// Number of rows.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.features.n_rows()
    }

    /// Number of feature columns (target excluded).
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.features.n_cols()
    }

    /// The first `n` rows (or all rows, if fewer) and their labels.
    #[must_use]
    pub fn head(&self, n: usize) -> (Matrix<f64>, &[usize]) {
        let n = n.min(self.n_samples());
        let indices: Vec<usize> = (0..n).collect();
        (self.features.select_rows(&indices), &self.labels[..n])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TENNIS: &str = "\
Outlook,Temperature,Humidity,Wind,PlayTennis
Sunny,Hot,High,Weak,No
Sunny,Hot,High,Strong,No
Overcast,Hot,High,Weak,Yes
Rain,Mild,High,Weak,Yes
Rain,Cool,Normal,Weak,Yes
Rain,Cool,Normal,Strong,No
";

    #[test]
    fn test_categorical_columns_are_encoded() {
        let ds = Dataset::from_reader(TENNIS.as_bytes(), "PlayTennis").expect("load");
        assert_eq!(ds.n_samples(), 6);
        assert_eq!(ds.n_features(), 4);
        assert_eq!(
            ds.feature_names(),
            &["Outlook", "Temperature", "Humidity", "Wind"]
        );
        // Overcast=0, Rain=1, Sunny=2
        let outlook: Vec<f64> = ds.features().rows().map(|r| r[0]).collect();
        assert_eq!(outlook, vec![2.0, 2.0, 0.0, 1.0, 1.0, 1.0]);
        // No=0, Yes=1
        assert_eq!(ds.labels(), &[0, 0, 1, 1, 1, 0]);
        assert_eq!(
            ds.class_names(),
            Some(&["No".to_string(), "Yes".to_string()][..])
        );
    }

    #[test]
    fn test_numeric_columns_are_parsed() {
        let csv = "a,label,b\n1.5,0,10\n-2,1,20\n3,1,30\n";
        let ds = Dataset::from_reader(csv.as_bytes(), "label").expect("load");
        assert_eq!(ds.feature_names(), &["a", "b"]);
        assert_eq!(ds.features().row(1), &[-2.0, 20.0]);
        assert_eq!(ds.labels(), &[0, 1, 1]);
        assert!(ds.class_names().is_none());
    }

    #[test]
    fn test_mixed_column_becomes_categorical() {
        let csv = "x,y\n1,0\nfoo,1\n2,0\n";
        let ds = Dataset::from_reader(csv.as_bytes(), "y").expect("load");
        // sorted as strings: "1" < "2" < "foo"
        let x: Vec<f64> = ds.features().rows().map(|r| r[0]).collect();
        assert_eq!(x, vec![0.0, 2.0, 1.0]);
    }

    #[test]
    fn test_negative_label_rejected() {
        let csv = "x,y\n1,0\n2,-1\n";
        let err = Dataset::from_reader(csv.as_bytes(), "y").expect_err("negative label");
        match err {
            TreeError::InvalidLabel { value, row } => {
                assert_eq!(value, "-1");
                assert_eq!(row, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fractional_label_rejected() {
        let csv = "x,y\n1,0.5\n";
        assert!(matches!(
            Dataset::from_reader(csv.as_bytes(), "y"),
            Err(TreeError::InvalidLabel { .. })
        ));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_label_beyond_usize_rejected() {
        // 2^64 rounds to usize::MAX as f64 and must not saturate
        let csv = "x,y\n1,3\n2,18446744073709551616\n";
        let err = Dataset::from_reader(csv.as_bytes(), "y").expect_err("out of range");
        match err {
            TreeError::InvalidLabel { value, row } => {
                assert_eq!(value, "18446744073709551616");
                assert_eq!(row, 1);
            }
            other => panic!("expected InvalidLabel, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_target_column() {
        let err = Dataset::from_reader(TENNIS.as_bytes(), "Play").expect_err("missing");
        assert!(matches!(err, TreeError::MissingColumn { .. }));
        assert!(err.to_string().contains("PlayTennis"));
    }

    #[test]
    fn test_header_only_is_rejected() {
        let csv = "x,y\n";
        assert!(matches!(
            Dataset::from_reader(csv.as_bytes(), "y"),
            Err(TreeError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_ragged_record_is_csv_error() {
        let csv = "x,y\n1,0\n2\n";
        assert!(matches!(
            Dataset::from_reader(csv.as_bytes(), "y"),
            Err(TreeError::Csv(_))
        ));
    }

    #[test]
    fn test_from_csv_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, "{TENNIS}").expect("write csv");
        let ds = Dataset::from_csv(file.path(), "PlayTennis").expect("load");
        assert_eq!(ds.n_samples(), 6);
    }

    #[test]
    fn test_from_csv_missing_file() {
        let err = Dataset::from_csv("/nonexistent/data.csv", "y").expect_err("no file");
        assert!(matches!(err, TreeError::Io(_)));
    }

    #[test]
    fn test_head() {
        let ds = Dataset::from_reader(TENNIS.as_bytes(), "PlayTennis").expect("load");
        let (x, y) = ds.head(2);
        assert_eq!(x.n_rows(), 2);
        assert_eq!(y, &[0, 0]);
        let (all, _) = ds.head(100);
        assert_eq!(all.n_rows(), 6);
    }

    #[test]
    fn test_new_validates_shapes() {
        let x = Matrix::from_vec(2, 1, vec![0.0, 1.0]).expect("2x1");
        assert!(Dataset::new(x.clone(), vec![0], vec!["a".into()]).is_err());
        assert!(Dataset::new(x.clone(), vec![0, 1], vec![]).is_err());
        let ds = Dataset::new(x, vec![0, 1], vec!["a".into()]).expect("valid");
        assert_eq!(ds.n_features(), 1);
    }
}
