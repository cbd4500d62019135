//! CSV export of scan results.

use std::io::Write;

use folderstat_core::{ExtensionKey, ExtensionStat, ScanResult, format_size};

use crate::error::RenderError;

/// Column names of the export.
pub const CSV_HEADER: [&str; 4] = ["extension", "count", "sizebytes", "Size"];

/// Attachment name used when the export is served as a download.
pub const CSV_FILENAME: &str = "folder_summary.csv";

/// Write the header and one row per extension, in key order.
pub fn write_csv<W: Write>(result: &ScanResult, writer: W) -> Result<(), RenderError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_HEADER)?;
    for (key, stat) in &result.per_extension {
        csv.write_record(record(key, stat))?;
    }
    csv.flush()?;
    Ok(())
}

/// Render the whole export into a string.
pub fn to_csv_string(result: &ScanResult) -> Result<String, RenderError> {
    let mut buf = Vec::new();
    write_csv(result, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Encode the export one row at a time, header first.
///
/// Each item is a complete CSV line, so the rows can be sent as separate
/// body chunks without building the whole document.
pub fn csv_rows(result: ScanResult) -> CsvRows {
    CsvRows {
        header_sent: false,
        rows: result.per_extension.into_iter(),
    }
}

/// Iterator returned by [`csv_rows`].
pub struct CsvRows {
    header_sent: bool,
    rows: std::collections::btree_map::IntoIter<ExtensionKey, ExtensionStat>,
}

impl Iterator for CsvRows {
    type Item = Result<Vec<u8>, RenderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.header_sent {
            self.header_sent = true;
            return Some(encode_line(CSV_HEADER));
        }
        let (key, stat) = self.rows.next()?;
        Some(encode_line(record(&key, &stat)))
    }
}

fn record(key: &ExtensionKey, stat: &ExtensionStat) -> [String; 4] {
    [
        key.to_string(),
        stat.count.to_string(),
        stat.total_bytes.to_string(),
        format_size(stat.total_bytes),
    ]
}

fn encode_line<I, T>(fields: I) -> Result<Vec<u8>, RenderError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut csv = csv::Writer::from_writer(Vec::new());
    csv.write_record(fields)?;
    csv.into_inner().map_err(|err| RenderError::Io(err.into_error()))
}
