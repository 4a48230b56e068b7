//! Selection engine: the single place that mutates `Selection`.
//!
//! Creation can fail (a roster too small to honor the reroll budget is a
//! configuration error). Reroll and lock never fail: a request that does
//! not pass its preconditions is a silent no-op and the unchanged snapshot
//! comes back.

use thiserror::Error;

use crate::draw::DrawContext;
use crate::policy::AccessPolicy;
use crate::roster::Roster;
use crate::state::{Selection, Snapshot, UserId};

/// Platform ceiling on per-message components; slots must stay below it.
pub const MAX_SLOTS: u32 = 25;

#[derive(Debug, Error)]
pub enum CreateError {
    #[error("amount must be >= 1 and < {limit}, got {amount}")]
    AmountOutOfRange { amount: u32, limit: u32 },
    #[error(
        "roster of {roster} entries cannot support {amount} slots with {max_rerolls} rerolls"
    )]
    RosterTooSmall {
        roster: usize,
        amount: u32,
        max_rerolls: u32,
    },
}

/// Create a selection: draw `amount` distinct characters uniformly from
/// the roster and arm the reroll budget.
///
/// Precondition: the roster must be strictly larger than the hand, except
/// that an exact-size roster is allowed when no rerolls will ever happen.
/// A `max_rerolls` of zero constructs the selection already locked.
pub fn create_selection(
    roster: Roster,
    amount: u32,
    max_rerolls: u32,
    owner: UserId,
    ctx: &mut DrawContext,
) -> Result<Selection, CreateError> {
    if amount < 1 || amount >= MAX_SLOTS {
        return Err(CreateError::AmountOutOfRange {
            amount,
            limit: MAX_SLOTS,
        });
    }
    let n = roster.len();
    let enough = n > amount as usize || (n == amount as usize && max_rerolls == 0);
    if !enough {
        return Err(CreateError::RosterTooSmall {
            roster: n,
            amount,
            max_rerolls,
        });
    }

    let chosen = ctx.draw_distinct(n, amount as usize);
    Ok(Selection {
        owner,
        roster,
        chosen,
        rerolls_left: max_rerolls,
        locked: max_rerolls == 0,
        rerolls_offered: max_rerolls > 0,
    })
}

/// Reroll one slot: replace it with a uniform draw from the
/// not-currently-chosen remainder and spend one reroll. Spending the last
/// reroll locks the selection in the same call.
///
/// Silent no-op when the selection is locked, the budget is spent, the
/// caller is not the owner, or the slot is out of range.
pub fn reroll(
    sel: &mut Selection,
    slot: usize,
    caller: UserId,
    policy: &dyn AccessPolicy,
    ctx: &mut DrawContext,
) -> Snapshot {
    debug_assert_selection(sel);
    if sel.locked || sel.rerolls_left == 0 {
        return sel.snapshot();
    }
    if !policy.may_reroll(caller, sel.owner) {
        return sel.snapshot();
    }
    if slot >= sel.chosen.len() {
        return sel.snapshot();
    }

    let replacement = ctx.draw_replacement(sel.roster.len(), &sel.chosen);
    sel.chosen[slot] = replacement;
    sel.rerolls_left -= 1;
    if sel.rerolls_left == 0 {
        sel.locked = true;
    }
    sel.snapshot()
}

/// Force the terminal state: zero the remaining budget (for display
/// consistency) and set the lock flag.
///
/// Silent no-op when already locked or the caller is neither the owner
/// nor elevated.
pub fn lock(sel: &mut Selection, caller: UserId, policy: &dyn AccessPolicy) -> Snapshot {
    debug_assert_selection(sel);
    if sel.locked {
        return sel.snapshot();
    }
    if !policy.may_lock(caller, sel.owner) {
        return sel.snapshot();
    }
    sel.rerolls_left = 0;
    sel.locked = true;
    sel.snapshot()
}

fn debug_assert_selection(sel: &Selection) {
    debug_assert!(
        sel.chosen.iter().all(|&i| (i as usize) < sel.roster.len()),
        "chosen index out of roster range"
    );
    debug_assert!(
        sel.chosen
            .iter()
            .enumerate()
            .all(|(k, a)| !sel.chosen[..k].contains(a)),
        "chosen slots must be pairwise distinct"
    );
    debug_assert!(
        !sel.locked || sel.rerolls_left == 0,
        "locked selection must not retain budget"
    );
}
