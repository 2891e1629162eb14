// src/crawl/persist.rs
// =============================================================================
// Writing crawl output to disk (only when --persist is given).
//
// Layout under the output directory:
//   text/<domain>/<derived filename>.txt   one file per page, raw text
//   processed/scraped.csv                  every record, after cleanup
//
// Any failure here is returned to the caller. The user asked for the
// files, so a crawl that can't write them stops instead of going quiet.
// =============================================================================

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::PageRecord;

pub const CSV_PATH: &str = "processed/scraped.csv";

// Creates text/, text/<domain>/ and processed/ if they are missing
pub fn create_dirs(output_dir: &Path, local_domain: &str) -> Result<()> {
    let dirs = [
        output_dir.join("text"),
        output_dir.join("text").join(local_domain),
        output_dir.join("processed"),
    ];

    for dir in &dirs {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }

    Ok(())
}

// Writes one page's text to its derived filename
//
// fs::write opens, writes and closes the file in one go, so no handle
// outlives the call.
pub fn write_page(output_dir: &Path, fname: &str, text: &str) -> Result<PathBuf> {
    let path = output_dir.join(fname);
    fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

// Dumps all records to processed/scraped.csv
//
// Columns are an unnamed row index, then fname and text, in crawl order:
//   ,fname,text
//   0,text/example.com/example.com.txt,Welcome ...
pub fn write_csv(output_dir: &Path, records: &[PageRecord]) -> Result<PathBuf> {
    let path = output_dir.join(CSV_PATH);
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    writer.write_record(["", "fname", "text"])?;
    for (index, record) in records.iter().enumerate() {
        let index = index.to_string();
        writer.write_record([index.as_str(), record.filename.as_str(), record.text.as_str()])?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(path)
}
