//! Row mapping: raw grid to header-keyed records.

use crate::error::{Result, SheetError};
use crate::types::{Record, Row, SheetData};

/// Converts a raw grid into one record per data row.
///
/// The first row supplies the field names, trimmed as by [`trim_header`].
/// Cell `i` of a data row is stored under header `i`. Short rows simply lack
/// the trailing fields. Cells past the end of the header have no name and
/// are dropped.
///
/// Fails with [`SheetError::MalformedData`] when the grid has no header row.
pub fn rows_to_records(grid: &[Row]) -> Result<Vec<Record>> {
    let (header, rows) = grid
        .split_first()
        .ok_or_else(|| SheetError::MalformedData("grid has no header row".into()))?;

    let header: Vec<&str> = header.iter().map(|name| trim_header(name)).collect();

    let records: Vec<Record> = rows
        .iter()
        .map(|row| {
            header
                .iter()
                .zip(row)
                .map(|(name, cell)| ((*name).to_string(), cell.clone()))
                .collect()
        })
        .collect();

    Ok(records)
}

/// Strips leading and trailing whitespace from a header cell.
///
/// Uses the ECMAScript whitespace set: the byte-order mark U+FEFF is stripped
/// and NEXT LINE (U+0085) is kept, unlike [`str::trim`].
pub fn trim_header(name: &str) -> &str {
    name.trim_matches(|c: char| (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}')
}

/// Maps a grid and wraps the records as the served payload.
pub fn into_sheet_data(grid: &[Row]) -> Result<SheetData> {
    rows_to_records(grid).map(SheetData::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    fn grid(rows: &[&[&str]]) -> Vec<Row> {
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_maps_rows_by_header() {
        let records = rows_to_records(&grid(&[&["Name", "Age"], &["Alice", "30"], &["Bob", "41"]])).unwrap();
        assert_eq!(
            records,
            vec![
                record(&[("Name", "Alice"), ("Age", "30")]),
                record(&[("Name", "Bob"), ("Age", "41")]),
            ]
        );
    }

    #[test]
    fn test_header_is_trimmed() {
        let records = rows_to_records(&grid(&[&["  Name ", "\tClass\n"], &["Alice", "4B"]])).unwrap();
        assert_eq!(records, vec![record(&[("Name", "Alice"), ("Class", "4B")])]);
    }

    #[test_case("\u{feff}Name", "Name" ; "leading byte order mark")]
    #[test_case("Name\u{feff}", "Name" ; "trailing byte order mark")]
    #[test_case("\u{a0}Name\u{3000}", "Name" ; "no-break and ideographic spaces")]
    #[test_case("\u{85}Name\u{85}", "\u{85}Name\u{85}" ; "next line is kept")]
    #[test_case("Full Name", "Full Name" ; "inner space is kept")]
    fn test_trim_header(raw: &str, expected: &str) {
        assert_eq!(trim_header(raw), expected);
    }

    #[test]
    fn test_bom_header_maps_to_plain_key() {
        let records = rows_to_records(&grid(&[&["\u{feff}Name", "Age"], &["Alice", "30"]])).unwrap();
        assert_eq!(records, vec![record(&[("Name", "Alice"), ("Age", "30")])]);
    }

    #[test]
    fn test_cell_values_are_not_trimmed() {
        let records = rows_to_records(&grid(&[&["Name"], &["  Alice  "]])).unwrap();
        assert_eq!(records[0]["Name"], "  Alice  ");
    }

    #[test_case(&["1", "2"], &[("A", "1"), ("B", "2")] ; "short row omits trailing fields")]
    #[test_case(&["1", "2", "3"], &[("A", "1"), ("B", "2"), ("C", "3")] ; "full row")]
    #[test_case(&["1", "2", "3", "4"], &[("A", "1"), ("B", "2"), ("C", "3")] ; "long row drops extra cells")]
    #[test_case(&[], &[] ; "empty row yields empty record")]
    fn test_row_width(row: &[&str], expected: &[(&str, &str)]) {
        let records = rows_to_records(&grid(&[&["A", "B", "C"], row])).unwrap();
        assert_eq!(records, vec![record(expected)]);
    }

    #[test]
    fn test_header_only_yields_no_records() {
        let records = rows_to_records(&grid(&[&["Name", "Age"]])).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_grid_fails() {
        let err = rows_to_records(&[]).unwrap_err();
        assert!(matches!(err, SheetError::MalformedData(_)));
    }

    #[test]
    fn test_duplicate_header_keeps_last_value() {
        let records = rows_to_records(&grid(&[&["A", "A"], &["1", "2"]])).unwrap();
        assert_eq!(records, vec![record(&[("A", "2")])]);
    }

    #[test]
    fn test_into_sheet_data() {
        let data = into_sheet_data(&grid(&[&["Name", "Age"], &["Alice", "30"]])).unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.data[0]["Age"], "30");
    }

    fn arb_grid() -> impl Strategy<Value = Vec<Row>> {
        let header = prop::collection::vec("[ \u{feff}]?[A-Za-z]{1,6} ?", 1..6);
        let rows = prop::collection::vec(prop::collection::vec("[a-z0-9 ]{0,5}", 0..8), 0..10);
        (header, rows).prop_map(|(header, rows)| {
            let mut grid = vec![header];
            grid.extend(rows);
            grid
        })
    }

    proptest! {
        #[test]
        fn prop_one_record_per_data_row(g in arb_grid()) {
            let records = rows_to_records(&g).unwrap();
            prop_assert_eq!(records.len(), g.len() - 1);
        }

        #[test]
        fn prop_fields_follow_trimmed_header(g in arb_grid()) {
            let header: Vec<String> = g[0].iter().map(|h| trim_header(h).to_string()).collect();
            let records = rows_to_records(&g).unwrap();

            for (record, row) in records.iter().zip(&g[1..]) {
                let width = row.len().min(header.len());
                let mut expected: Vec<&String> = Vec::new();
                for name in &header[..width] {
                    if !expected.contains(&name) {
                        expected.push(name);
                    }
                }
                let keys: Vec<&String> = record.keys().collect();
                prop_assert_eq!(keys, expected);
            }
        }

        #[test]
        fn prop_mapping_is_idempotent(g in arb_grid()) {
            prop_assert_eq!(rows_to_records(&g).unwrap(), rows_to_records(&g).unwrap());
        }
    }
}
