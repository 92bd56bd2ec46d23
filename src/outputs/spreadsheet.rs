//! Excel export of the digest.
//!
//! The workbook holds a single worksheet named [`SHEET_NAME`] with a bold,
//! frozen header row followed by one row per [`NewsItem`], in digest order.
//!
//! # Output Path
//!
//! ```text
//! output_dir/
//! └── news_Global Economy_20250506.xlsx
//! ```

use crate::models::NewsItem;
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

pub const SHEET_NAME: &str = "Latest News";

/// Column headers, in column order.
pub const HEADERS: [&str; 5] = ["Source", "Title", "Timestamp", "URL", "Summary"];

/// MIME type of the exported file.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const COLUMN_WIDTHS: [f64; 5] = [22.0, 60.0, 26.0, 50.0, 100.0];

fn row_values(item: &NewsItem) -> [&str; 5] {
    [
        item.source.as_str(),
        item.title.as_str(),
        item.published.as_str(),
        item.url.as_str(),
        item.summary.as_str(),
    ]
}

/// Serialize `items` to an in-memory `.xlsx` workbook.
pub fn to_spreadsheet(items: &[NewsItem]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, (header, width)) in HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        worksheet.set_column_width(col as u16, width)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (i, item) in items.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, value) in row_values(item).into_iter().enumerate() {
            worksheet.write_string(row, col as u16, value)?;
        }
    }

    workbook.save_to_buffer()
}

/// File name for an export: `news_<topic>_<YYYYMMDD>.xlsx`.
///
/// Path separators in the topic become underscores; everything else is kept.
pub fn export_file_name(topic: &str, date: NaiveDate) -> String {
    let topic = topic.replace(['/', '\\'], "_");
    format!("news_{}_{}.xlsx", topic, date.format("%Y%m%d"))
}

/// Write the digest rows to `{output_dir}/{export_file_name}`.
///
/// # Returns
///
/// The path of the written file.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display(), rows = items.len()))]
pub async fn write_spreadsheet(
    items: &[NewsItem],
    output_dir: &Path,
    topic: &str,
    date: NaiveDate,
) -> Result<PathBuf, Box<dyn Error>> {
    let buffer = to_spreadsheet(items)?;
    let path = output_dir.join(export_file_name(topic, date));

    info!(path = %path.display(), bytes = buffer.len(), "Writing spreadsheet");
    fs::write(&path, buffer).await?;
    info!(path = %path.display(), mime = XLSX_MIME, "Wrote spreadsheet export");

    Ok(path)
}
