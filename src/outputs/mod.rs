//! Output generation for the terminal and the Excel export.
//!
//! # Submodules
//!
//! - [`console`]: Renders the digest (or the empty-state notice) as plain text
//! - [`spreadsheet`]: Serializes digest rows to an `.xlsx` workbook and writes it to disk
//!
//! # Output Structure
//!
//! ```text
//! stdout                                  # rendered digest
//! output_dir/
//! └── news_<topic>_<YYYYMMDD>.xlsx        # sheet "Latest News"
//! ```

use crate::models::Digest;
use chrono::NaiveDate;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub mod console;
pub mod spreadsheet;

/// Export the digest unless there is nothing to export or export is disabled.
///
/// # Returns
///
/// The written workbook path, or `None` when no file was written.
pub async fn finish(
    digest: &Digest,
    export: bool,
    output_dir: &Path,
    topic: &str,
    date: NaiveDate,
) -> Result<Option<PathBuf>, Box<dyn Error>> {
    if digest.is_empty() {
        warn!(%topic, "No news found; skipping export");
        return Ok(None);
    }
    if !export {
        info!("Export disabled");
        return Ok(None);
    }

    let path = spreadsheet::write_spreadsheet(&digest.items, output_dir, topic, date).await?;
    Ok(Some(path))
}
