//! Reading the first worksheet of an `.xlsx` package.
//!
//! The package is a zip archive. `package` locates the worksheet part through
//! `xl/workbook.xml` and its relationships and loads the shared string table;
//! `cells` turns the worksheet XML into rows of cleaned cell text.

pub mod cells;
pub mod package;

pub use cells::{column_index, extract_rows};
pub use package::{SheetPart, WorkbookPackage};

use crate::domain::model::SheetRow;
use crate::utils::error::Result;

/// Rows of the first worksheet of the workbook held in `bytes`.
pub fn read_first_sheet(bytes: Vec<u8>) -> Result<Vec<SheetRow>> {
    let mut package = WorkbookPackage::from_bytes(bytes)?;
    let sheet = package.load_first_sheet()?;
    extract_rows(&sheet.xml, &sheet.shared_strings)
}
