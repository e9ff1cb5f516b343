//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `events.csv`
//! - `epochs.csv`
//!
//! Headers come from the row field names.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{EpochRow, EventRow, OutputResult};

pub struct CsvWriter {
    events:   Writer<File>,
    epochs:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create (or truncate) the two CSV files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Ok(Self {
            events:   Writer::from_path(dir.join("events.csv"))?,
            epochs:   Writer::from_path(dir.join("epochs.csv"))?,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.serialize(row)?;
        Ok(())
    }

    fn write_epoch(&mut self, row: &EpochRow) -> OutputResult<()> {
        self.epochs.serialize(row)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.epochs.flush()?;
        Ok(())
    }
}
