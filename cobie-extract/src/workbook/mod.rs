//! Workbook model and the calamine adapter that fills it
//!
//! The rest of the crate only sees sheets of raw tagged strings, so it does
//! not care which spreadsheet format the file was in.

pub mod reader;
pub mod value;

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};

use crate::error::ExtractError;
use value::tagged;

pub use reader::{
    DEFAULT_EXCLUDED_SHEETS, Record, SheetData, WorkbookData, default_excluded_sheets,
    read_workbook,
};
pub use value::{MalformedValue, normalize};

/// An exchange workbook: ordered sheets of tagged raw cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

/// A single worksheet; row 0 is the header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Decode a workbook file (xls, xlsx, xlsm, xlsb, ods)
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let mut workbook =
            open_workbook_auto(path).map_err(|source| ExtractError::WorkbookOpen {
                path: path.to_path_buf(),
                source,
            })?;

        let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
        let mut sheets = Vec::with_capacity(sheet_names.len());

        for name in sheet_names {
            let range =
                workbook
                    .worksheet_range(&name)
                    .map_err(|source| ExtractError::SheetRead {
                        sheet: name.clone(),
                        source,
                    })?;

            let rows = sheet_rows(&range);
            sheets.push(Sheet { name, rows });
        }

        log::debug!("Opened workbook {} with {} sheets", path.display(), sheets.len());
        Ok(Self { sheets })
    }
}

/// Render a decoded range as tagged rows
///
/// A range is as wide as its widest row, so the header row is cut back to its
/// last non-empty cell. Otherwise stray cells right of the data would turn
/// into blank headers.
fn sheet_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    range
        .rows()
        .enumerate()
        .map(|(idx, row)| {
            let cells = if idx == 0 {
                let width = row
                    .iter()
                    .rposition(|c| !matches!(c, Data::Empty))
                    .map_or(0, |last| last + 1);
                &row[..width]
            } else {
                row
            };
            cells.iter().map(raw_cell).collect()
        })
        .collect()
}

/// Render a decoded cell in the tagged convention
fn raw_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => tagged("empty", ""),
        Data::String(s) => tagged("text", s),
        Data::Float(f) => tagged("number", &format!("{:?}", f)),
        Data::Int(i) => tagged("number", &i.to_string()),
        Data::Bool(b) => tagged("bool", if *b { "1" } else { "0" }),
        Data::DateTime(dt) => tagged("xldate", &format!("{:?}", dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => tagged("xldate", s),
        Data::Error(e) => tagged("error", &e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn test_raw_cell_tags() {
        assert_eq!(raw_cell(&Data::Empty), "empty:''");
        assert_eq!(raw_cell(&Data::String("AHU-1".into())), "text:'AHU-1'");
        assert_eq!(raw_cell(&Data::Float(2.0)), "number:'2.0'");
        assert_eq!(raw_cell(&Data::Float(0.25)), "number:'0.25'");
        assert_eq!(raw_cell(&Data::Int(7)), "number:'7'");
        assert_eq!(raw_cell(&Data::Bool(true)), "bool:'1'");
        assert_eq!(raw_cell(&Data::Bool(false)), "bool:'0'");
        assert_eq!(
            raw_cell(&Data::DateTimeIso("2024-01-31T00:00:00".into())),
            "xldate:'2024-01-31T00:00:00'"
        );
        assert_eq!(raw_cell(&Data::Error(CellErrorType::Div0)), "error:'#DIV/0!'");
    }

    #[test]
    fn test_raw_cells_normalize_back_to_content() {
        let cells = [
            Data::String("Mechanical: Level 2".into()),
            Data::Float(12.5),
            Data::Empty,
        ];
        let normalized: Vec<String> = cells
            .iter()
            .map(|c| normalize(&raw_cell(c)).unwrap())
            .collect();
        assert_eq!(normalized, vec!["Mechanical: Level 2", "12.5", ""]);
    }

    #[test]
    fn test_open_missing_file() {
        let err = Workbook::open("/nonexistent/facility.xlsx").unwrap_err();
        assert!(matches!(err, ExtractError::WorkbookOpen { .. }));
        assert_eq!(err.stage(), crate::error::Stage::Read);
    }

    #[test]
    fn test_header_row_ignores_stray_columns() {
        let mut range: Range<Data> = Range::new((0, 0), (2, 3));
        range.set_value((0, 0), Data::String("Name".into()));
        range.set_value((0, 1), Data::String("Type".into()));
        range.set_value((1, 0), Data::String("AHU-1".into()));
        range.set_value((1, 1), Data::String("Air Handler".into()));
        range.set_value((1, 2), Data::String("check filter".into()));
        range.set_value((1, 3), Data::String("see drawing".into()));
        range.set_value((2, 0), Data::String("AHU-2".into()));

        let rows = sheet_rows(&range);
        assert_eq!(rows[0], vec!["text:'Name'", "text:'Type'"]);
        assert_eq!(rows[1].len(), 4);

        let workbook = Workbook::new(vec![Sheet::new("Component", rows)]);
        let plan = crate::pipeline::plan(&workbook, &[]).unwrap();
        let table = &plan.tables[0];
        assert_eq!(table.schema.column_names(), vec!["id", "name", "type"]);
        assert_eq!(table.records[0].columns(), vec!["name", "type"]);
        assert_eq!(table.records[0].get("type"), Some("Air Handler"));
        assert_eq!(table.records[1].get("type"), Some(""));
    }

    #[test]
    fn test_blank_header_row() {
        let range: Range<Data> = Range::new((0, 0), (1, 1));
        let rows = sheet_rows(&range);
        assert!(rows[0].is_empty());
        assert_eq!(rows[1], vec!["empty:''", "empty:''"]);
    }
}
