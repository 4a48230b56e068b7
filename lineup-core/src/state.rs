//! Selection state: the per-invocation record mutated by the engine.

use serde::Serialize;

use crate::roster::{Character, Roster};

/// Caller/owner identity as the chat platform reports it.
pub type UserId = u64;

/// Per-invocation mutable record. All transitions go through `engine`.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Initiating user; never reassigned.
    pub owner: UserId,
    /// Shared, read-only pool this selection draws from.
    pub roster: Roster,
    /// Indices into `roster`. Pairwise distinct at all times.
    pub chosen: Vec<u32>,
    pub rerolls_left: u32,
    /// Monotonic: once true it never clears.
    pub locked: bool,
    /// Fixed at creation: whether this selection ever offered reroll
    /// controls. Drives the renderer's omit-vs-disable choice.
    pub rerolls_offered: bool,
}

impl Selection {
    /// Project the current state into the value renderers consume.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            owner: self.owner,
            chosen: self
                .chosen
                .iter()
                .map(|&i| self.roster.entries()[i as usize].clone())
                .collect(),
            rerolls_left: self.rerolls_left,
            locked: self.locked,
            rerolls_offered: self.rerolls_offered,
        }
    }
}

/// Immutable view of a selection at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub owner: UserId,
    /// Chosen characters in slot order.
    pub chosen: Vec<Character>,
    pub rerolls_left: u32,
    pub locked: bool,
    pub rerolls_offered: bool,
}
