use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use thiserror::Error;

use crate::allocation::PreferenceRecord;

/// Errors from reading or decoding a preference spreadsheet.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read spreadsheet data: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to open file: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds the priority-ordered preference list from raw spreadsheet rows.
///
/// Column 0 is a submission timestamp (ignored), column 1 the worker's
/// email, columns 2+ free-form unavailable-date tokens. Rows with an empty
/// email or no date tokens are skipped. Repeated emails merge into one
/// record (union of dates); record order is first-seen email order.
pub fn collect_preferences(rows: &[Vec<String>]) -> Vec<PreferenceRecord> {
    let mut order: Vec<String> = Vec::new();
    let mut merged: HashMap<String, HashSet<String>> = HashMap::new();

    for row in rows {
        let email = match row.get(1) {
            Some(cell) => cell.trim(),
            None => continue,
        };
        if email.is_empty() {
            continue;
        }

        let dates: Vec<String> = row
            .iter()
            .skip(2)
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
            .map(|cell| cell.to_string())
            .collect();
        if dates.is_empty() {
            continue;
        }

        let unavailable = merged.entry(email.to_string()).or_insert_with(|| {
            order.push(email.to_string());
            HashSet::new()
        });
        unavailable.extend(dates);
    }

    order
        .into_iter()
        .map(|email| {
            let unavailable = merged.remove(&email).unwrap_or_default();
            PreferenceRecord { email, unavailable }
        })
        .collect()
}

/// Reads preference rows from CSV data.
///
/// The first row is a header and is skipped; rows may carry differing cell
/// counts since each submitter lists a different number of dates.
pub fn read_preferences<R: Read>(reader: R) -> Result<Vec<PreferenceRecord>, ParseError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(collect_preferences(&rows))
}

/// Loads preferences from a CSV file on disk.
pub fn load_preferences<P: AsRef<Path>>(path: P) -> Result<Vec<PreferenceRecord>, ParseError> {
    let file = File::open(path)?;
    read_preferences(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn collects_one_record_per_email_in_first_seen_order() {
        let rows = vec![
            row(&["2024-01-01 10:00", "b@x", "2024-02-01"]),
            row(&["2024-01-01 11:00", "a@x", "2024-02-02"]),
        ];

        let preferences = collect_preferences(&rows);

        assert_eq!(preferences.len(), 2);
        assert_eq!(preferences[0].email, "b@x");
        assert_eq!(preferences[1].email, "a@x");
    }

    #[test]
    fn repeated_emails_merge_into_a_union() {
        let rows = vec![
            row(&["ts", "a@x", "2024-02-01", "2024-02-02"]),
            row(&["ts", "a@x", "2024-02-02", "2024-02-03"]),
        ];

        let preferences = collect_preferences(&rows);

        assert_eq!(preferences.len(), 1);
        let unavailable = &preferences[0].unavailable;
        assert_eq!(unavailable.len(), 3);
        assert!(unavailable.contains("2024-02-01"));
        assert!(unavailable.contains("2024-02-02"));
        assert!(unavailable.contains("2024-02-03"));
    }

    #[test]
    fn skips_rows_with_empty_email() {
        let rows = vec![
            row(&["ts", "   ", "2024-02-01"]),
            row(&["ts", "a@x", "2024-02-01"]),
        ];

        let preferences = collect_preferences(&rows);

        assert_eq!(preferences.len(), 1);
        assert_eq!(preferences[0].email, "a@x");
    }

    #[test]
    fn skips_rows_with_no_date_tokens() {
        let rows = vec![
            row(&["ts", "a@x"]),
            row(&["ts", "b@x", "", "  "]),
            row(&["ts", "c@x", "2024-02-01"]),
        ];

        let preferences = collect_preferences(&rows);

        assert_eq!(preferences.len(), 1);
        assert_eq!(preferences[0].email, "c@x");
    }

    #[test]
    fn trims_email_and_date_cells() {
        let rows = vec![row(&["ts", "  a@x ", " 2024-02-01 ", "2024-02-02"])];

        let preferences = collect_preferences(&rows);

        assert_eq!(preferences[0].email, "a@x");
        assert!(preferences[0].unavailable.contains("2024-02-01"));
        assert!(preferences[0].unavailable.contains("2024-02-02"));
    }

    #[test]
    fn short_rows_are_skipped() {
        let rows = vec![row(&["only-a-timestamp"]), row(&[])];

        assert!(collect_preferences(&rows).is_empty());
    }

    #[test]
    fn csv_header_row_is_not_treated_as_data() {
        let data = "\
Timestamp,Email,Unavailable 1,Unavailable 2
2024-01-01 10:00,a@x,2024-02-01,2024-02-02
2024-01-01 11:00,b@x,2024-02-03,
";

        let preferences = read_preferences(data.as_bytes()).unwrap();

        assert_eq!(preferences.len(), 2);
        assert_eq!(preferences[0].email, "a@x");
        assert_eq!(preferences[0].unavailable.len(), 2);
        assert_eq!(preferences[1].email, "b@x");
        assert_eq!(preferences[1].unavailable.len(), 1);
    }

    #[test]
    fn ragged_csv_rows_are_accepted() {
        let data = "\
Timestamp,Email,Unavailable 1
ts,a@x,2024-02-01,2024-02-02,2024-02-03
ts,b@x,2024-02-04
";

        let preferences = read_preferences(data.as_bytes()).unwrap();

        assert_eq!(preferences.len(), 2);
        assert_eq!(preferences[0].unavailable.len(), 3);
    }
}
