//! Workbook writer: merge transformed rows into a persistent .xlsx document.
//!
//! The writer owns exactly two sheets, [`RESULTS_SHEET`] and
//! [`DESCRIPTORS_SHEET`]. When the destination file already exists it is
//! opened and every other sheet is preserved verbatim; owned sheets are
//! cleared in place (values and styles) rather than deleted and recreated,
//! so external references to them stay valid. The library-default
//! placeholder sheet of a freshly created workbook is removed before save.

use std::collections::HashMap;
use std::path::Path;

use tracing::info;
use umya_spreadsheet::helper::coordinate::string_from_column_index;
use umya_spreadsheet::{
    new_file, reader, writer, Border, HorizontalAlignmentValues, Spreadsheet, Style,
    VerticalAlignmentValues, Worksheet,
};

use crate::error::{AuditError, Result};
use crate::schema;
use crate::transform::{CellValue, ComponentCount, FlatRow};

/// Sheet holding one row per vulnerability.
pub const RESULTS_SHEET: &str = "Cargo Audit Results";
/// Glossary sheet describing every results column.
pub const DESCRIPTORS_SHEET: &str = "Cargo Row Descriptors";
/// The default sheet umya creates in a brand-new workbook.
const PLACEHOLDER_SHEET: &str = "Sheet1";

const HEADER_FILL: &str = "FFD84E85";
const NAME_COLUMN_FILL: &str = "FFE8650D";

/// Write the transformed rows (and, optionally, the column glossary) into
/// the workbook at `path`, creating it if absent. Re-running with the same
/// input overwrites the owned sheets in place; it never duplicates them.
pub fn write_workbook(
    rows: &[FlatRow],
    component_count: ComponentCount,
    path: &Path,
    include_descriptors: bool,
) -> Result<()> {
    let mut book = open_or_create(path)?;

    info!("{} components in the scanned lockfile", component_count);

    if include_descriptors {
        write_descriptors(&mut book)?;
    }
    write_results(&mut book, rows)?;
    remove_placeholder(&mut book)?;
    autosize_columns(&mut book);

    writer::xlsx::write(&book, path).map_err(|e| AuditError::WorkbookSaveError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    info!("Saved workbook: {}", path.display());
    Ok(())
}

/// Open the workbook at `path`, or create a fresh one if the file does not
/// exist. An existing file that cannot be parsed is a fatal error.
fn open_or_create(path: &Path) -> Result<Spreadsheet> {
    if path.exists() {
        reader::xlsx::read(path)
            .map_err(|e| {
                AuditError::WorkbookOpenError {
                    path: path.to_path_buf(),
                    details: e.to_string(),
                }
                .into()
            })
    } else {
        Ok(new_file())
    }
}

/// Locate a sheet by name and clear it, or create it if absent. Clearing
/// keeps the sheet object alive so external references to it survive.
fn reset_or_create_sheet<'a>(book: &'a mut Spreadsheet, name: &str) -> Result<&'a mut Worksheet> {
    let exists = book.get_sheet_by_name(name).is_some();
    if exists {
        let sheet = book
            .get_sheet_by_name_mut(name)
            .ok_or_else(|| AuditError::SheetError {
                name: name.to_string(),
                details: "sheet disappeared during reset".to_string(),
            })?;
        reset_sheet_contents(sheet);
        Ok(sheet)
    } else {
        book.new_sheet(name).map_err(|e| {
            AuditError::SheetError {
                name: name.to_string(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

/// Clear every cell value and reset cell styling back to defaults.
fn reset_sheet_contents(sheet: &mut Worksheet) {
    let max_col = sheet.get_highest_column();
    let max_row = sheet.get_highest_row();

    for row in 1..=max_row {
        for col in 1..=max_col {
            let cell = sheet.get_cell_mut((col, row));
            cell.set_value("");
            *cell.get_style_mut() = Style::default();
        }
    }
}

/// Header cell styling shared by both owned sheets: size 14 bold, centered,
/// thin border with a medium bottom edge, solid fill.
fn apply_header_style(style: &mut Style) {
    let font = style.get_font_mut();
    font.set_size(14.0);
    font.set_bold(true);

    let alignment = style.get_alignment_mut();
    alignment.set_horizontal(HorizontalAlignmentValues::Center);
    alignment.set_vertical(VerticalAlignmentValues::Center);

    let borders = style.get_borders_mut();
    borders.get_top_mut().set_border_style(Border::BORDER_THIN);
    borders.get_left_mut().set_border_style(Border::BORDER_THIN);
    borders.get_right_mut().set_border_style(Border::BORDER_THIN);
    borders
        .get_bottom_mut()
        .set_border_style(Border::BORDER_MEDIUM);

    style.set_background_color(HEADER_FILL);
}

/// Write the column glossary sheet: a two-column header, one row per
/// registry column, and a highlight fill down the name column.
fn write_descriptors(book: &mut Spreadsheet) -> Result<()> {
    let sheet = reset_or_create_sheet(book, DESCRIPTORS_SHEET)?;

    sheet.get_cell_mut("A1").set_value("Row Name");
    sheet.get_cell_mut("B1").set_value("Row Description");
    apply_header_style(sheet.get_style_mut("A1"));
    apply_header_style(sheet.get_style_mut("B1"));

    for (index, column) in schema::all_columns().iter().enumerate() {
        let row = index as u32 + 2;
        sheet.get_cell_mut((1, row)).set_value(column.name);
        sheet.get_cell_mut((2, row)).set_value(column.description);
        sheet
            .get_style_mut((1, row))
            .set_background_color(NAME_COLUMN_FILL);
    }

    Ok(())
}

/// Write the results sheet: one header row in registry order, then one data
/// row per FlatRow. With zero rows, a single informational cell is written
/// instead of headers.
fn write_results(book: &mut Spreadsheet, rows: &[FlatRow]) -> Result<()> {
    let sheet = reset_or_create_sheet(book, RESULTS_SHEET)?;

    if rows.is_empty() {
        sheet.get_cell_mut("A1").set_value("No vulnerabilities found");
        return Ok(());
    }

    let columns = schema::all_columns();
    for (index, column) in columns.iter().enumerate() {
        let col = index as u32 + 1;
        sheet.get_cell_mut((col, 1)).set_value(column.name);
        apply_header_style(sheet.get_style_mut((col, 1)));
    }

    for (row_index, flat_row) in rows.iter().enumerate() {
        let row = row_index as u32 + 2;
        for (col_index, column) in columns.iter().enumerate() {
            let col = col_index as u32 + 1;
            // Columns the row lacks (absent affected info) stay blank.
            match flat_row.get(column.name) {
                Some(CellValue::Text(value)) => {
                    sheet.get_cell_mut((col, row)).set_value(value);
                }
                Some(CellValue::Bool(value)) => {
                    sheet.get_cell_mut((col, row)).set_value_bool(*value);
                }
                None => {}
            }
        }
    }

    Ok(())
}

/// Remove the default empty sheet a brand-new workbook starts with. Only
/// ever affects the library-created placeholder, never a user sheet.
fn remove_placeholder(book: &mut Spreadsheet) -> Result<()> {
    if book.get_sheet_by_name(PLACEHOLDER_SHEET).is_some() {
        book.remove_sheet_by_name(PLACEHOLDER_SHEET)
            .map_err(|e| AuditError::SheetError {
                name: PLACEHOLDER_SHEET.to_string(),
                details: e.to_string(),
            })?;
    }
    Ok(())
}

/// Set every column's width to the character length of its longest
/// non-empty stringified cell value, on every sheet in the document.
/// Columns whose cells are all empty get width zero, so a column cleared
/// by a re-run does not keep its previous width.
fn autosize_columns(book: &mut Spreadsheet) {
    for sheet in book.get_sheet_collection_mut() {
        let mut widths: HashMap<u32, usize> = HashMap::new();

        for cell in sheet.get_cell_collection() {
            let value = cell.get_value();
            if value.is_empty() {
                continue;
            }
            let col = *cell.get_coordinate().get_col_num();
            let length = value.chars().count();
            let entry = widths.entry(col).or_insert(0);
            *entry = (*entry).max(length);
        }

        let max_col = sheet.get_highest_column();
        for col in 1..=max_col {
            let width = widths.get(&col).copied().unwrap_or(0);
            let letter = string_from_column_index(&col);
            sheet
                .get_column_dimension_mut(&letter)
                .set_width(width as f64);
        }
    }
}
