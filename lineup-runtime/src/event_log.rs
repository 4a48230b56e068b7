//! NDJSON emission for registry operations.
//!
//! Only accepted operations produce events; rejected requests are silent
//! no-ops all the way down.

use std::path::Path;

use lineup_core::Snapshot;
use lineup_logging::{
    now_ms, NdjsonError, NdjsonWriter, RerollAppliedV1, SelectionCreatedV1, SelectionLockedV1,
    SessionEvictedV1,
};

pub struct EventLog {
    events: NdjsonWriter,
}

impl EventLog {
    /// Open an append-only event log. Creates the file if missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Ok(Self {
            events: NdjsonWriter::open_append(path)?,
        })
    }

    /// Flush every `n` lines; `0` disables periodic flushing.
    pub fn open_with_flush(path: impl AsRef<Path>, n: u64) -> Result<Self, NdjsonError> {
        Ok(Self {
            events: NdjsonWriter::open_append_with_flush(path, n)?,
        })
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.events.flush()
    }

    pub(crate) fn created(
        &mut self,
        session_id: u64,
        max_rerolls: u32,
        snap: &Snapshot,
    ) -> Result<(), NdjsonError> {
        self.events.write_event(&SelectionCreatedV1 {
            event: "selection_created",
            ts_ms: now_ms(),
            session_id,
            owner_id: snap.owner,
            slots: snap.chosen.len() as u32,
            max_rerolls,
            locked: snap.locked,
            chosen: snap.chosen.iter().map(|c| c.text.clone()).collect(),
        })
    }

    pub(crate) fn reroll_applied(
        &mut self,
        session_id: u64,
        caller_id: u64,
        slot: usize,
        outgoing: String,
        snap: &Snapshot,
    ) -> Result<(), NdjsonError> {
        self.events.write_event(&RerollAppliedV1 {
            event: "reroll_applied",
            ts_ms: now_ms(),
            session_id,
            caller_id,
            slot,
            outgoing,
            incoming: snap.chosen[slot].text.clone(),
            rerolls_left: snap.rerolls_left,
            locked: snap.locked,
        })
    }

    pub(crate) fn locked(
        &mut self,
        session_id: u64,
        caller_id: u64,
        snap: &Snapshot,
    ) -> Result<(), NdjsonError> {
        self.events.write_event(&SelectionLockedV1 {
            event: "selection_locked",
            ts_ms: now_ms(),
            session_id,
            caller_id,
            by_owner: caller_id == snap.owner,
        })
    }

    pub(crate) fn evicted(&mut self, session_id: u64) -> Result<(), NdjsonError> {
        self.events.write_event(&SessionEvictedV1 {
            event: "session_evicted",
            ts_ms: now_ms(),
            session_id,
        })
    }
}
