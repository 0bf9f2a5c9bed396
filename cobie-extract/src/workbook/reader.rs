//! Read header names and normalized records out of a workbook
//!
//! Sheets listed as excluded (instructions, pick lists) are skipped. For every
//! other sheet row 0 holds the headers and each following row becomes one
//! record, paired with the headers by column position.

use super::value::normalize;
use super::{Sheet, Workbook};
use crate::error::ExtractError;
use crate::schema::column_name;

/// Sheets that never become tables unless configured otherwise
pub const DEFAULT_EXCLUDED_SHEETS: [&str; 2] = ["Instruction", "PickLists"];

pub fn default_excluded_sheets() -> Vec<String> {
    DEFAULT_EXCLUDED_SHEETS.iter().map(|s| s.to_string()).collect()
}

/// One data row, keyed by column name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based row number in the source sheet (the header is row 1)
    pub sheet_row: usize,
    /// (column name, normalized value) in column order
    pub fields: Vec<(String, String)>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn columns(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }
}

/// Headers and records of a single sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetData {
    pub name: String,
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

/// Everything read from a workbook, in sheet order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkbookData {
    pub sheets: Vec<SheetData>,
    /// Excluded sheets that were present in the workbook
    pub skipped: Vec<String>,
}

/// Read every non-excluded sheet of `workbook`
pub fn read_workbook(
    workbook: &Workbook,
    excluded: &[String],
) -> Result<WorkbookData, ExtractError> {
    let mut data = WorkbookData::default();

    for sheet in &workbook.sheets {
        if excluded.iter().any(|name| name == &sheet.name) {
            log::info!("Skipping excluded sheet '{}'", sheet.name);
            data.skipped.push(sheet.name.clone());
            continue;
        }

        let sheet_data = read_sheet(sheet)?;
        log::debug!(
            "Read sheet '{}': {} headers, {} records",
            sheet_data.name,
            sheet_data.headers.len(),
            sheet_data.records.len()
        );
        data.sheets.push(sheet_data);
    }

    Ok(data)
}

fn read_sheet(sheet: &Sheet) -> Result<SheetData, ExtractError> {
    let Some((header_row, data_rows)) = sheet.rows.split_first() else {
        log::warn!("Sheet '{}' is empty, it will only get an id column", sheet.name);
        return Ok(SheetData {
            name: sheet.name.clone(),
            headers: Vec::new(),
            records: Vec::new(),
        });
    };

    let headers = header_row
        .iter()
        .enumerate()
        .map(|(col, raw)| normalize_cell(sheet, 0, col, raw))
        .collect::<Result<Vec<_>, _>>()?;

    let columns: Vec<String> = headers.iter().map(|h| column_name(h)).collect();

    let mut records = Vec::with_capacity(data_rows.len());
    for (offset, row) in data_rows.iter().enumerate() {
        let row_idx = offset + 1;

        // Cells past the last header have no column and are dropped
        let fields = row
            .iter()
            .zip(&columns)
            .enumerate()
            .map(|(col, (raw, column))| {
                normalize_cell(sheet, row_idx, col, raw).map(|value| (column.clone(), value))
            })
            .collect::<Result<Vec<_>, _>>()?;

        records.push(Record {
            sheet_row: row_idx + 1,
            fields,
        });
    }

    Ok(SheetData {
        name: sheet.name.clone(),
        headers,
        records,
    })
}

fn normalize_cell(sheet: &Sheet, row: usize, col: usize, raw: &str) -> Result<String, ExtractError> {
    normalize(raw).map_err(|err| ExtractError::MalformedCellValue {
        sheet: sheet.name.clone(),
        row: row + 1,
        column: col + 1,
        raw: err.raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> String {
        format!("text:'{}'", s)
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| text(c)).collect()
    }

    fn component_sheet() -> Sheet {
        Sheet::new(
            "Component",
            vec![
                row(&["Name", "TypeName", "Space"]),
                row(&["AHU-1", "Air Handler", "Plant Room"]),
                row(&["AHU-2", "Air Handler", "Roof"]),
            ],
        )
    }

    #[test]
    fn test_excluded_sheets_are_skipped() {
        let workbook = Workbook::new(vec![
            Sheet::new("Instruction", vec![vec!["Read me first".to_string()]]),
            component_sheet(),
            Sheet::new("PickLists", vec![row(&["Category"])]),
        ]);

        let data = read_workbook(&workbook, &default_excluded_sheets()).unwrap();
        assert_eq!(data.sheets.len(), 1);
        assert_eq!(data.sheets[0].name, "Component");
        assert_eq!(data.skipped, vec!["Instruction", "PickLists"]);
    }

    #[test]
    fn test_headers_and_records() {
        let workbook = Workbook::new(vec![component_sheet()]);
        let data = read_workbook(&workbook, &[]).unwrap();
        let sheet = &data.sheets[0];

        assert_eq!(sheet.headers, vec!["Name", "TypeName", "Space"]);
        assert_eq!(sheet.records.len(), 2);

        let first = &sheet.records[0];
        assert_eq!(first.sheet_row, 2);
        assert_eq!(first.columns(), vec!["name", "typename", "space"]);
        assert_eq!(first.get("name"), Some("AHU-1"));
        assert_eq!(first.get("space"), Some("Plant Room"));
        assert_eq!(sheet.records[1].get("space"), Some("Roof"));
    }

    #[test]
    fn test_positional_pairing_truncates() {
        let sheet = Sheet::new(
            "Space",
            vec![
                row(&["Name", "Floor"]),
                row(&["101"]),
                row(&["102", "L1", "stray"]),
            ],
        );
        let data = read_workbook(&Workbook::new(vec![sheet]), &[]).unwrap();
        let records = &data.sheets[0].records;

        assert_eq!(records[0].fields, vec![("name".to_string(), "101".to_string())]);
        assert_eq!(records[1].columns(), vec!["name", "floor"]);
        assert_eq!(records[1].get("floor"), Some("L1"));
    }

    #[test]
    fn test_malformed_header_reports_location() {
        let sheet = Sheet::new(
            "Type",
            vec![vec![text("Name"), "Manufacturer".to_string()]],
        );
        let err = read_workbook(&Workbook::new(vec![sheet]), &[]).unwrap_err();
        match err {
            ExtractError::MalformedCellValue {
                sheet,
                row,
                column,
                raw,
            } => {
                assert_eq!(sheet, "Type");
                assert_eq!(row, 1);
                assert_eq!(column, 2);
                assert_eq!(raw, "Manufacturer");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_data_cell_reports_location() {
        let mut sheet = component_sheet();
        sheet.rows[2][1] = "Widget".to_string();
        let err = read_workbook(&Workbook::new(vec![sheet]), &[]).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MalformedCellValue { row: 3, column: 2, .. }
        ));
    }

    #[test]
    fn test_malformed_excluded_sheet_is_ignored() {
        let workbook = Workbook::new(vec![
            Sheet::new("Instruction", vec![vec!["Widget".to_string()]]),
            component_sheet(),
        ]);
        assert!(read_workbook(&workbook, &default_excluded_sheets()).is_ok());
    }

    #[test]
    fn test_empty_sheet() {
        let data = read_workbook(&Workbook::new(vec![Sheet::new("Zone", vec![])]), &[]).unwrap();
        assert!(data.sheets[0].headers.is_empty());
        assert!(data.sheets[0].records.is_empty());
    }
}
