use std::collections::HashMap;
use std::io;

use thiserror::Error;

use crate::language::LanguageRecord;
use crate::names::NameAliases;

/// Rows at the top of the table that carry titles, not data.
pub const HEADER_ROWS: usize = 2;
/// County name plus four percentage columns.
pub const MIN_COLUMNS: usize = 5;
const NOTE_COLUMN: usize = 5;

/// A table row that was skipped. Row numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("row {row}: unreadable record: {message}")]
    Unreadable { row: u64, message: String },
    #[error("row {row} ({county}): column {column} value {value:?} is not a percentage")]
    InvalidPercentage {
        row: u64,
        county: String,
        column: usize,
        value: String,
    },
}

/// Language records and notes keyed by county label.
///
/// Every entry is reachable under both its spelling in the source table and
/// its normalized spelling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageDataset {
    records: HashMap<String, LanguageRecord>,
    notes: HashMap<String, String>,
}

impl LanguageDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store under `county` and under its normalized form.
    pub fn insert(
        &mut self,
        county: &str,
        record: LanguageRecord,
        note: Option<&str>,
        aliases: &NameAliases,
    ) {
        let normalized = aliases.normalize(county);
        for key in [county, normalized.as_str()] {
            self.records.insert(key.to_owned(), record);
            if let Some(note) = note {
                self.notes.insert(key.to_owned(), note.to_owned());
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&LanguageRecord> {
        self.records.get(key)
    }

    pub fn get_key_value(&self, key: &str) -> Option<(&str, &LanguageRecord)> {
        self.records
            .get_key_value(key)
            .map(|(key, record)| (key.as_str(), record))
    }

    pub fn note(&self, key: &str) -> Option<&str> {
        self.notes.get(key).map(String::as_str)
    }

    pub fn records(&self) -> &HashMap<String, LanguageRecord> {
        &self.records
    }

    pub fn notes(&self) -> &HashMap<String, String> {
        &self.notes
    }

    /// Number of keys, counting raw and normalized spellings separately.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct ParsedDataset {
    pub dataset: LanguageDataset,
    pub row_errors: Vec<RowError>,
}

/// Parse the census table: `[county, mandarin, hokkien, hakka, indigenous, note?]`.
///
/// The first [`HEADER_ROWS`] rows are ignored. Rows with an empty county or
/// fewer than [`MIN_COLUMNS`] columns are ignored silently. Rows with a bad
/// percentage are skipped and reported in `row_errors`; the rest still load.
/// An I/O error from `reader` is reported and ends the parse.
pub fn parse_language_table<R: io::Read>(reader: R, aliases: &NameAliases) -> ParsedDataset {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut parsed = ParsedDataset::default();
    for (index, result) in csv_reader.records().enumerate() {
        let row = index as u64 + 1;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let fatal = e.is_io_error();
                parsed.row_errors.push(RowError::Unreadable {
                    row,
                    message: e.to_string(),
                });
                // The reader does not advance past an I/O error.
                if fatal {
                    break;
                }
                continue;
            }
        };
        if index < HEADER_ROWS {
            continue;
        }

        let county = record.get(0).map(str::trim).unwrap_or_default();
        if county.is_empty() || record.len() < MIN_COLUMNS {
            continue;
        }

        let mut values = [0.0; 4];
        let mut bad_cell = None;
        for (slot, column) in values.iter_mut().zip(1..MIN_COLUMNS) {
            let cell = record.get(column).unwrap_or_default();
            match parse_percentage(cell) {
                Some(value) => *slot = value,
                None => {
                    bad_cell = Some((column, cell.trim().to_owned()));
                    break;
                }
            }
        }
        if let Some((column, value)) = bad_cell {
            parsed.row_errors.push(RowError::InvalidPercentage {
                row,
                county: county.to_owned(),
                column: column + 1,
                value,
            });
            continue;
        }

        let [mandarin, hokkien, hakka, indigenous] = values;
        let note = record
            .get(NOTE_COLUMN)
            .map(str::trim)
            .filter(|note| !note.is_empty());
        parsed.dataset.insert(
            county,
            LanguageRecord::new(mandarin, hokkien, hakka, indigenous),
            note,
            aliases,
        );
    }

    parsed
}

/// Empty cells count as zero; anything else must be a finite number.
fn parse_percentage(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Some(0.0);
    }
    cell.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use std::io::{self, Read};

    use super::{LanguageDataset, RowError, parse_language_table, parse_percentage};
    use crate::language::LanguageRecord;
    use crate::names::{NameAliases, normalize};

    const TABLE: &str = "\
臺灣各縣市語言使用比例,,,,,
縣市,華語,閩南語,客家話,原住民語,備註
臺北市,96.4,62.6,6.8,0.6,
台北縣,97.0,70.9,5.5,1.2,今新北市
桃園縣,96.7,57.1,35.6,1.4,
苗慄縣,92.8,45.0,65.2,1.3,客家人口比例高
";

    fn parse(table: &str) -> super::ParsedDataset {
        parse_language_table(table.as_bytes(), NameAliases::builtin())
    }

    #[test]
    fn skips_header_rows() {
        let parsed = parse(TABLE);
        assert!(parsed.row_errors.is_empty());
        assert!(parsed.dataset.get("縣市").is_none());
        assert!(parsed.dataset.get("臺灣各縣市語言使用比例").is_none());
    }

    #[test]
    fn stores_records_under_raw_and_normalized_keys() {
        let parsed = parse(TABLE);
        let dataset = &parsed.dataset;

        assert_eq!(
            dataset.get("台北縣"),
            Some(&LanguageRecord::new(97.0, 70.9, 5.5, 1.2))
        );
        assert_eq!(dataset.get("新北市"), dataset.get("台北縣"));
        assert_eq!(dataset.get("苗栗縣"), dataset.get("苗慄縣"));
        assert_eq!(dataset.note("新北市"), Some("今新北市"));
        assert_eq!(dataset.note("苗栗縣"), Some("客家人口比例高"));
        assert_eq!(dataset.note("臺北市"), None);
    }

    #[test]
    fn every_key_agrees_with_its_normalized_form() {
        let parsed = parse(TABLE);
        let dataset = &parsed.dataset;
        for (key, record) in dataset.records() {
            assert_eq!(dataset.get(&normalize(key)), Some(record), "key {key}");
        }
    }

    #[test]
    fn empty_cells_default_to_zero() {
        let parsed = parse("h\nh\n連江縣,95.1,,,\n");
        assert_eq!(
            parsed.dataset.get("連江縣"),
            Some(&LanguageRecord::new(95.1, 0.0, 0.0, 0.0))
        );
    }

    #[test]
    fn malformed_row_is_skipped_and_later_rows_still_load() {
        let parsed = parse("h\nh\n基隆市,95.0,abc,3.0,1.0,\n宜蘭縣,94.2,80.5,3.1,3.6,\n");

        assert_eq!(
            parsed.row_errors,
            vec![RowError::InvalidPercentage {
                row: 3,
                county: "基隆市".to_owned(),
                column: 3,
                value: "abc".to_owned(),
            }]
        );
        assert!(parsed.dataset.get("基隆市").is_none());
        assert!(parsed.dataset.get("宜蘭縣").is_some());
    }

    #[test]
    fn short_rows_and_blank_counties_are_ignored_silently() {
        let parsed = parse("h\nh\n花蓮縣,90.0,50.0\n,1,2,3,4\n澎湖縣,95.0,88.0,0.5,0.3\n");
        assert!(parsed.row_errors.is_empty());
        assert!(parsed.dataset.get("花蓮縣").is_none());
        assert!(parsed.dataset.get("澎湖縣").is_some());
    }

    #[test]
    fn empty_input_yields_empty_dataset() {
        let parsed = parse("");
        assert_eq!(parsed.dataset, LanguageDataset::new());
        assert!(parsed.dataset.notes().is_empty());
        assert!(parsed.row_errors.is_empty());
    }

    #[test]
    fn merged_counties_keep_their_own_records() {
        let parsed = parse("h\nh\n臺中市,96.0,80.0,3.0,0.5,\n臺中縣,94.0,70.0,20.0,1.5,\n");
        let dataset = &parsed.dataset;

        assert_eq!(
            dataset.get("臺中市"),
            Some(&LanguageRecord::new(96.0, 80.0, 3.0, 0.5))
        );
        assert_eq!(
            dataset.get("臺中縣"),
            Some(&LanguageRecord::new(94.0, 70.0, 20.0, 1.5))
        );
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::IsADirectory, "is a directory"))
        }
    }

    #[test]
    fn read_failure_in_header_rows_is_reported() {
        let parsed = parse_language_table(FailingReader, NameAliases::builtin());
        assert!(parsed.dataset.is_empty());
        assert_eq!(parsed.row_errors.len(), 1);
        match &parsed.row_errors[0] {
            RowError::Unreadable { row, message } => {
                assert_eq!(*row, 1);
                assert!(message.contains("is a directory"), "{message}");
            }
            other => panic!("unexpected row error {other:?}"),
        }
    }

    #[test]
    fn parse_percentage_rejects_non_finite_values() {
        assert_eq!(parse_percentage(" 12.5 "), Some(12.5));
        assert_eq!(parse_percentage(""), Some(0.0));
        assert_eq!(parse_percentage("NaN"), None);
        assert_eq!(parse_percentage("inf"), None);
        assert_eq!(parse_percentage("12%"), None);
    }
}
