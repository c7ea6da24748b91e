use std::fmt::Display;
use std::io::{self, Write};

use tracing::{debug, info, info_span};

use crate::config::UploadConfig;
use crate::error::{Result, UploadError};
use crate::parsers::csv;
use crate::services::mapper::{self, RowOutcome};
use crate::services::store::DocumentStore;

/// Console sink for the one-line progress messages.
pub struct Progress<W> {
    out: W,
}

impl Progress<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Progress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn line(&mut self, message: impl Display) {
        // A closed console must not stop the upload halfway.
        let _ = writeln!(self.out, "{message}");
        let _ = self.out.flush();
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UploadReport {
    pub written: usize,
    pub skipped: usize,
}

/// Loads the configured file and writes one document per usable row.
///
/// Rows go through strictly in file order, one blocking write at a time. The
/// first failed write aborts the run; documents written before it stay in the
/// collection and later rows are not looked at.
pub fn run<W: Write>(
    config: &UploadConfig,
    store: &dyn DocumentStore,
    progress: &mut Progress<W>,
) -> Result<UploadReport> {
    let _span = info_span!("upload", collection = %config.collection).entered();

    progress.line(format_args!(
        "Reading CSV file from: {}",
        config.csv_path.display()
    ));
    let table = csv::load_rows(&config.csv_path)?;

    progress.line(format_args!(
        "Starting upload to '{}' collection in project '{}'...",
        config.collection, config.project_id
    ));

    let mut report = UploadReport::default();

    for row in &table.rows {
        match mapper::map_row(row) {
            RowOutcome::Upload { id, document } => {
                store
                    .set(&config.collection, &id, &document)
                    .map_err(|source| UploadError::RemoteWriteFailure {
                        document_id: id,
                        source,
                    })?;
                progress.line(format_args!("Processed document for: {}", document.word));
                report.written += 1;
            }
            RowOutcome::Skip { display_row } => {
                debug!(row = display_row, "word cell missing");
                progress.line(format_args!(
                    "Skipping row {display_row} due to missing 'English word'."
                ));
                report.skipped += 1;
            }
        }
    }

    progress.line("Upload/update complete.");
    info!(
        written = report.written,
        skipped = report.skipped,
        "upload finished"
    );

    Ok(report)
}
