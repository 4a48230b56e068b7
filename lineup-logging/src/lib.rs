//! lineup-logging: NDJSON lifecycle events for selection sessions.
//!
//! Append-only, one JSON object per line, so a crashed process leaves at
//! worst one truncated trailing line behind.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

/// A selection came into existence.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionCreatedV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub session_id: u64,
    pub owner_id: u64,
    pub slots: u32,
    pub max_rerolls: u32,
    /// True when the zero-budget path constructed it already locked.
    pub locked: bool,
    /// Display text per slot, in slot order.
    pub chosen: Vec<String>,
}

/// An accepted reroll: one slot changed and the budget went down by one.
#[derive(Debug, Clone, Serialize)]
pub struct RerollAppliedV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub session_id: u64,
    pub caller_id: u64,
    pub slot: usize,
    pub outgoing: String,
    pub incoming: String,
    pub rerolls_left: u32,
    /// True when this reroll spent the last of the budget.
    pub locked: bool,
}

/// The selection reached its terminal state via an accepted lock request.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionLockedV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub session_id: u64,
    pub caller_id: u64,
    pub by_owner: bool,
}

/// The hosting layer retired the session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionEvictedV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub session_id: u64,
}

#[derive(Debug)]
pub enum NdjsonError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl From<io::Error> for NdjsonError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for NdjsonError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Append-only NDJSON writer.
///
/// Contract: each call writes exactly one JSON object followed by a newline.
pub struct NdjsonWriter {
    w: BufWriter<File>,
    lines_since_flush: u64,
    flush_every_lines: u64,
}

impl NdjsonWriter {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(path, 0)
    }

    /// `flush_every_lines=0` disables periodic flushing.
    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every_lines: u64,
    ) -> Result<Self, NdjsonError> {
        let f = OpenOptions::new()
            .create(true)
            .append(true)
            .write(true)
            .open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            lines_since_flush: 0,
            flush_every_lines,
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.lines_since_flush += 1;
        if self.flush_every_lines > 0 && self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.w.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }
}
