use crate::error::ScrapeError;
use crate::records::CableRecord;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the aggregated records as CSV, replacing any existing file
/// at `path`.
pub fn write_csv<P: AsRef<Path>>(records: &[CableRecord], path: P) -> Result<(), ScrapeError> {
    let path = path.as_ref();
    ::log::info!("Saving {} records to {}...", records.len(), path.display());
    let file = File::create(path)?;
    write_csv_to(records, file)?;
    ::log::info!("Data saved successfully!");
    Ok(())
}

/// Serializes records to any writer. The header row comes from the
/// record field names, in declaration order.
pub fn write_csv_to<W: Write>(records: &[CableRecord], writer: W) -> Result<(), ScrapeError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}
