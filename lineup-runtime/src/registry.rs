//! Session registry: one mutable selection per invocation, many per process.
//!
//! Serialization discipline: the registry map sits behind a short-held
//! lock used only to resolve ids; every session carries its own mutex, and
//! reroll/lock run entirely under it, so budget decrement, slot
//! replacement, and the lock-flag transition are atomic as a unit. Two
//! rapid activations of the same control serialize; operations on
//! different sessions never contend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use lineup_core::{
    create_selection, engine, AccessPolicy, CreateError, DrawContext, Roster, Selection, Snapshot,
    UserId,
};

use crate::event_log::EventLog;

pub type SessionId = u64;

struct Session {
    sel: Selection,
    ctx: DrawContext,
}

pub struct SessionRegistry {
    next_id: AtomicU64,
    sessions: Mutex<HashMap<SessionId, Arc<Mutex<Session>>>>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Create a session and return its handle plus the initial snapshot.
    ///
    /// The draw context stays with the session for its whole life, so a
    /// seeded context makes the entire session reproducible.
    pub fn create(
        &self,
        roster: Roster,
        amount: u32,
        max_rerolls: u32,
        owner: UserId,
        mut ctx: DrawContext,
        log: Option<&mut EventLog>,
    ) -> Result<(SessionId, Snapshot), CreateError> {
        let sel = create_selection(roster, amount, max_rerolls, owner, &mut ctx)?;
        let snap = sel.snapshot();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.sessions
            .lock()
            .unwrap()
            .insert(id, Arc::new(Mutex::new(Session { sel, ctx })));
        if let Some(log) = log {
            // Event emission is best-effort throughout the registry.
            let _ = log.created(id, max_rerolls, &snap);
        }
        Ok((id, snap))
    }

    /// Current snapshot, or `None` for an unknown/evicted session.
    pub fn snapshot(&self, id: SessionId) -> Option<Snapshot> {
        let session = self.resolve(id)?;
        let s = session.lock().unwrap();
        Some(s.sel.snapshot())
    }

    /// Apply a reroll request. `None` only for unknown/evicted sessions;
    /// rejected requests return the unchanged snapshot.
    pub fn reroll(
        &self,
        id: SessionId,
        slot: usize,
        caller: UserId,
        policy: &dyn AccessPolicy,
        log: Option<&mut EventLog>,
    ) -> Option<Snapshot> {
        let session = self.resolve(id)?;
        let mut guard = session.lock().unwrap();
        let before_left = guard.sel.rerolls_left;
        let outgoing = guard
            .sel
            .chosen
            .get(slot)
            .map(|&i| guard.sel.roster.entries()[i as usize].text.clone());

        let s = &mut *guard;
        let snap = engine::reroll(&mut s.sel, slot, caller, policy, &mut s.ctx);

        if snap.rerolls_left != before_left {
            if let (Some(log), Some(outgoing)) = (log, outgoing) {
                let _ = log.reroll_applied(id, caller, slot, outgoing, &snap);
            }
        }
        Some(snap)
    }

    /// Apply a forced lock request. `None` only for unknown/evicted
    /// sessions; rejected requests return the unchanged snapshot.
    pub fn lock(
        &self,
        id: SessionId,
        caller: UserId,
        policy: &dyn AccessPolicy,
        log: Option<&mut EventLog>,
    ) -> Option<Snapshot> {
        let session = self.resolve(id)?;
        let mut guard = session.lock().unwrap();
        let was_locked = guard.sel.locked;
        let snap = engine::lock(&mut guard.sel, caller, policy);

        if !was_locked && snap.locked {
            if let Some(log) = log {
                let _ = log.locked(id, caller, &snap);
            }
        }
        Some(snap)
    }

    /// Retire a session once its UI lifetime is over. Returns whether it
    /// existed.
    pub fn evict(&self, id: SessionId, log: Option<&mut EventLog>) -> bool {
        let removed = self.sessions.lock().unwrap().remove(&id).is_some();
        if removed {
            if let Some(log) = log {
                let _ = log.evicted(id);
            }
        }
        removed
    }

    fn resolve(&self, id: SessionId) -> Option<Arc<Mutex<Session>>> {
        self.sessions.lock().unwrap().get(&id).cloned()
    }
}
