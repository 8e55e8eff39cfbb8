use crate::dataset::{DatasetError, TableSchema};
use crate::utils::file_parsing::{split_fields, strip_surrounding_quotes};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// In-memory numeric table with named columns.
///
/// The on-disk form is a delimited text file: one header row naming the
/// columns, then one data row per jet. Fields are separated by commas or by
/// whitespace (detected per line), blank lines and `#` comments are skipped,
/// and surrounding quotes on header tokens are stripped. All data values are
/// parsed as `f64`.
#[derive(Debug)]
pub struct Table {
    schema: TableSchema,
    rows: Vec<Vec<f64>>,
}

impl Table {
    /// Builds a table directly from parts. Callers guarantee every row has
    /// exactly `schema.len()` values.
    pub fn new(schema: TableSchema, rows: Vec<Vec<f64>>) -> Table {
        debug_assert!(rows.iter().all(|r| r.len() == schema.len()));
        Table { schema, rows }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Table, DatasetError> {
        let file = File::open(path)?;
        Table::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Table, DatasetError> {
        let mut schema: Option<TableSchema> = None;
        let mut rows: Vec<Vec<f64>> = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let number = idx + 1;
            let fields = split_fields(trimmed);

            let header = match &schema {
                Some(header) => header,
                None => {
                    schema = Some(TableSchema::new(
                        fields
                            .iter()
                            .map(|f| strip_surrounding_quotes(f).to_string())
                            .collect(),
                    ));
                    continue;
                }
            };

            if fields.len() != header.len() {
                return Err(DatasetError::RaggedRow {
                    line: number,
                    expected: header.len(),
                    found: fields.len(),
                });
            }

            let mut row = Vec::with_capacity(fields.len());
            for field in fields {
                let value = field.parse::<f64>().map_err(|_| DatasetError::MalformedNumber {
                    line: number,
                    token: field.to_string(),
                })?;
                row.push(value);
            }
            rows.push(row);
        }

        let Some(schema) = schema else {
            return Err(DatasetError::EmptyTable);
        };
        if rows.is_empty() {
            return Err(DatasetError::EmptyTable);
        }
        Ok(Table { schema, rows })
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.schema.len()
    }

    /// Copies out one column by name.
    pub fn column(&self, name: &str) -> Result<Vec<f64>, DatasetError> {
        let index = self.schema.require(name)?;
        Ok(self.rows.iter().map(|r| r[index]).collect())
    }

    /// Copies out one column as binary labels, rejecting any value that is
    /// not exactly 0 or 1.
    pub fn labels(&self, name: &str) -> Result<Vec<u8>, DatasetError> {
        let index = self.schema.require(name)?;
        let mut labels = Vec::with_capacity(self.rows.len());
        for (row, values) in self.rows.iter().enumerate() {
            let value = values[index];
            if value == 0.0 {
                labels.push(0);
            } else if value == 1.0 {
                labels.push(1);
            } else {
                return Err(DatasetError::NonBinaryLabel {
                    name: name.to_string(),
                    row,
                    value,
                });
            }
        }
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const COMMA_TABLE: &str = "\
prob_b,nnbjet,isb
0.92,0.88,1
0.41,0.35,0
0.33,0.81,0
";

    fn parse(text: &str) -> Result<Table, DatasetError> {
        Table::from_reader(Cursor::new(text))
    }

    #[test]
    fn parses_a_comma_table() {
        let t = parse(COMMA_TABLE).unwrap();
        assert_eq!(t.num_rows(), 3);
        assert_eq!(t.num_columns(), 3);
        assert_eq!(t.schema().names(), ["prob_b", "nnbjet", "isb"]);
        assert_eq!(t.column("prob_b").unwrap(), vec![0.92, 0.41, 0.33]);
    }

    #[test]
    fn parses_a_whitespace_table() {
        let t = parse("energy  cTheta\n45.2  0.12\n38.9\t-0.73\n").unwrap();
        assert_eq!(t.column("cTheta").unwrap(), vec![0.12, -0.73]);
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let t = parse("# jets from run 4\n\nprob_b isb\n0.9 1\n\n# trailer\n0.1 0\n").unwrap();
        assert_eq!(t.num_rows(), 2);
    }

    #[test]
    fn strips_quoted_header_tokens() {
        let t = parse("'prob_b',\"isb\"\n0.5,1\n").unwrap();
        assert_eq!(t.schema().names(), ["prob_b", "isb"]);
    }

    #[test]
    fn from_path_round_trips() {
        let mut tf = NamedTempFile::new().unwrap();
        tf.write_all(COMMA_TABLE.as_bytes()).unwrap();
        let t = Table::from_path(tf.path()).unwrap();
        assert_eq!(t.num_rows(), 3);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let t = parse(COMMA_TABLE).unwrap();
        let err = t.column("spheri").unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn { name } if name == "spheri"));
    }

    #[test]
    fn ragged_row_carries_line_and_widths() {
        let err = parse("a,b\n1,2\n3\n").unwrap_err();
        assert!(matches!(
            err,
            DatasetError::RaggedRow {
                line: 3,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn malformed_number_carries_the_token() {
        let err = parse("a,b\n1,x\n").unwrap_err();
        assert!(matches!(
            err,
            DatasetError::MalformedNumber { line: 2, token } if token == "x"
        ));
    }

    #[test]
    fn header_only_and_empty_inputs_fail() {
        assert!(matches!(parse("a,b\n"), Err(DatasetError::EmptyTable)));
        assert!(matches!(parse(""), Err(DatasetError::EmptyTable)));
        assert!(matches!(parse("# nothing\n\n"), Err(DatasetError::EmptyTable)));
    }

    #[test]
    fn labels_accept_exact_zero_and_one() {
        let t = parse(COMMA_TABLE).unwrap();
        assert_eq!(t.labels("isb").unwrap(), vec![1, 0, 0]);
    }

    #[test]
    fn labels_reject_fractional_truth() {
        let t = parse("score,isb\n0.4,0.5\n").unwrap();
        let err = t.labels("isb").unwrap_err();
        assert!(matches!(
            err,
            DatasetError::NonBinaryLabel { name, row: 0, value } if name == "isb" && value == 0.5
        ));
    }
}
