//! `br-output` — observers that turn simulation events into something a
//! person can read.
//!
//! | Observer             | Output                                           |
//! |----------------------|--------------------------------------------------|
//! | [`TerminalRenderer`] | one status line per event on any `io::Write`     |
//! | [`EventLogObserver`] | rows handed to an [`OutputWriter`] (CSV provided)|
//!
//! Observers cannot return errors, so both store the first failure
//! internally; check with `take_error()` after the run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use br_output::{CsvWriter, EventLogObserver, TerminalRenderer};
//!
//! let mut screen = TerminalRenderer::new(std::io::stdout());
//! let mut log = EventLogObserver::new(CsvWriter::new(Path::new("./output"))?);
//! sim.run(&mut (&mut screen, &mut log))?;
//! log.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod terminal;
pub mod writer;


pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::EventLogObserver;
pub use row::{EpochRow, EventRow};
pub use terminal::TerminalRenderer;
pub use writer::OutputWriter;
