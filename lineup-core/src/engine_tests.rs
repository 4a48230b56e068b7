use crate::draw::DrawContext;
use crate::engine::{create_selection, lock, reroll, CreateError, MAX_SLOTS};
use crate::policy::{AdminSet, OwnerOnly};
use crate::roster::{Character, Roster};
use crate::state::Selection;

const OWNER: u64 = 100;
const STRANGER: u64 = 200;
const ADMIN: u64 = 300;

fn roster_of(names: &[&str]) -> Roster {
    Roster::new(
        names
            .iter()
            .map(|n| Character {
                text: n.to_string(),
                image: format!("https://example.invalid/{}.png", n),
            })
            .collect(),
    )
}

fn assert_invariants(sel: &Selection) {
    assert_eq!(
        sel.chosen.len(),
        sel.chosen
            .iter()
            .collect::<std::collections::HashSet<_>>()
            .len(),
        "chosen slots must be pairwise distinct"
    );
    assert!(sel.chosen.iter().all(|&i| (i as usize) < sel.roster.len()));
    if sel.locked {
        assert_eq!(sel.rerolls_left, 0);
    }
}

#[test]
fn create_draws_distinct_hand_of_requested_size() {
    let roster = roster_of(&["a", "b", "c", "d", "e", "f", "g"]);
    for seed in 0..50u64 {
        let mut ctx = DrawContext::with_seed(seed);
        let sel = create_selection(roster.clone(), 3, 2, OWNER, &mut ctx).unwrap();
        assert_eq!(sel.chosen.len(), 3);
        assert_invariants(&sel);
        assert_eq!(sel.rerolls_left, 2);
        assert!(!sel.locked);
        assert!(sel.rerolls_offered);
    }
}

#[test]
fn zero_budget_creates_locked_with_no_affordances() {
    let roster = roster_of(&["a", "b", "c", "d"]);
    let mut ctx = DrawContext::with_seed(1);
    let sel = create_selection(roster, 2, 0, OWNER, &mut ctx).unwrap();
    assert!(sel.locked);
    assert!(!sel.rerolls_offered);
    assert_eq!(sel.rerolls_left, 0);
}

#[test]
fn exact_size_roster_allowed_only_without_rerolls() {
    let roster = roster_of(&["a", "b", "c"]);

    let mut ctx = DrawContext::with_seed(2);
    let sel = create_selection(roster.clone(), 3, 0, OWNER, &mut ctx).unwrap();
    assert!(sel.locked);
    // The whole roster is dealt out, in some order.
    let mut idx = sel.chosen.clone();
    idx.sort();
    assert_eq!(idx, vec![0, 1, 2]);

    let err = create_selection(roster, 3, 1, OWNER, &mut ctx).unwrap_err();
    assert!(matches!(err, CreateError::RosterTooSmall { .. }));
}

#[test]
fn amount_bounds_enforced() {
    let roster = roster_of(&["a", "b", "c", "d"]);
    let mut ctx = DrawContext::with_seed(3);

    let err = create_selection(roster.clone(), 0, 1, OWNER, &mut ctx).unwrap_err();
    assert!(matches!(err, CreateError::AmountOutOfRange { .. }));

    let err = create_selection(roster, MAX_SLOTS, 1, OWNER, &mut ctx).unwrap_err();
    assert!(matches!(err, CreateError::AmountOutOfRange { .. }));
}

#[test]
fn reroll_replaces_one_slot_with_unchosen_entry() {
    let roster = roster_of(&["a", "b", "c", "d", "e", "f"]);
    let mut ctx = DrawContext::with_seed(7);
    let mut sel = create_selection(roster, 3, 5, OWNER, &mut ctx).unwrap();

    for round in 0..5usize {
        let slot = round % sel.chosen.len();
        let before = sel.chosen.clone();
        let snap = reroll(&mut sel, slot, OWNER, &OwnerOnly, &mut ctx);
        assert_invariants(&sel);

        // Exactly the requested slot changed, to an entry not previously held.
        assert!(!before.contains(&sel.chosen[slot]));
        for (i, &v) in sel.chosen.iter().enumerate() {
            if i != slot {
                assert_eq!(v, before[i]);
            }
        }
        assert_eq!(snap.rerolls_left, (5 - round - 1) as u32);
    }
    assert!(sel.locked);
}

#[test]
fn budget_exhaustion_locks_on_the_same_call() {
    // Pool [a..e], two slots, one reroll: the documented end-to-end walk.
    let roster = roster_of(&["a", "b", "c", "d", "e"]);
    let mut ctx = DrawContext::with_seed(11);
    let mut sel = create_selection(roster, 2, 1, OWNER, &mut ctx).unwrap();
    assert_eq!(sel.rerolls_left, 1);
    assert!(!sel.locked);

    let before = sel.chosen.clone();
    let snap = reroll(&mut sel, 0, OWNER, &OwnerOnly, &mut ctx);
    assert!(!before.contains(&sel.chosen[0]));
    assert_eq!(snap.rerolls_left, 0);
    assert!(snap.locked);

    // Any further operation leaves the snapshot byte-for-byte unchanged.
    let frozen = sel.snapshot();
    let after = reroll(&mut sel, 1, OWNER, &OwnerOnly, &mut ctx);
    assert_eq!(after, frozen);
    let after = lock(&mut sel, OWNER, &OwnerOnly);
    assert_eq!(after, frozen);
}

#[test]
fn unauthorized_calls_change_nothing() {
    let roster = roster_of(&["a", "b", "c", "d", "e"]);
    let mut ctx = DrawContext::with_seed(13);
    let mut sel = create_selection(roster, 2, 3, OWNER, &mut ctx).unwrap();
    let frozen = sel.snapshot();

    let snap = reroll(&mut sel, 0, STRANGER, &OwnerOnly, &mut ctx);
    assert_eq!(snap, frozen);
    let snap = lock(&mut sel, STRANGER, &OwnerOnly);
    assert_eq!(snap, frozen);
    assert!(!sel.locked);
    assert_eq!(sel.rerolls_left, 3);
}

#[test]
fn out_of_range_slot_is_a_noop() {
    let roster = roster_of(&["a", "b", "c", "d"]);
    let mut ctx = DrawContext::with_seed(17);
    let mut sel = create_selection(roster, 2, 2, OWNER, &mut ctx).unwrap();
    let frozen = sel.snapshot();

    let snap = reroll(&mut sel, 2, OWNER, &OwnerOnly, &mut ctx);
    assert_eq!(snap, frozen);
    assert_eq!(sel.rerolls_left, 2);
}

#[test]
fn owner_lock_is_terminal_and_zeroes_budget() {
    let roster = roster_of(&["a", "b", "c", "d"]);
    let mut ctx = DrawContext::with_seed(19);
    let mut sel = create_selection(roster, 2, 5, OWNER, &mut ctx).unwrap();

    let snap = lock(&mut sel, OWNER, &OwnerOnly);
    assert!(snap.locked);
    assert_eq!(snap.rerolls_left, 0);

    // Locked is absorbing: a second lock changes nothing.
    let frozen = sel.snapshot();
    assert_eq!(lock(&mut sel, OWNER, &OwnerOnly), frozen);
}

#[test]
fn admins_may_lock_but_not_reroll() {
    let policy = AdminSet::new(vec![ADMIN]);
    let roster = roster_of(&["a", "b", "c", "d", "e"]);
    let mut ctx = DrawContext::with_seed(23);
    let mut sel = create_selection(roster, 2, 3, OWNER, &mut ctx).unwrap();

    let frozen = sel.snapshot();
    let snap = reroll(&mut sel, 0, ADMIN, &policy, &mut ctx);
    assert_eq!(snap, frozen, "elevated privilege must not grant rerolls");

    let snap = lock(&mut sel, ADMIN, &policy);
    assert!(snap.locked);
}

#[test]
fn same_seed_reproduces_hand_and_replacements() {
    let roster = roster_of(&["a", "b", "c", "d", "e", "f", "g", "h"]);

    let run = |seed: u64| {
        let mut ctx = DrawContext::with_seed(seed);
        let mut sel = create_selection(roster.clone(), 3, 3, OWNER, &mut ctx).unwrap();
        reroll(&mut sel, 1, OWNER, &OwnerOnly, &mut ctx);
        reroll(&mut sel, 0, OWNER, &OwnerOnly, &mut ctx);
        sel.chosen
    };

    assert_eq!(run(42), run(42));
}

#[test]
fn initial_draw_is_uniform_over_entries() {
    // Frequency smoke test: with 2000 single-slot draws over 5 entries,
    // each entry should land well within [300, 500] (expected 400).
    let roster = roster_of(&["a", "b", "c", "d", "e"]);
    let mut ctx = DrawContext::with_seed(1234);
    let mut counts = [0u32; 5];
    for _ in 0..2000 {
        let sel = create_selection(roster.clone(), 1, 1, OWNER, &mut ctx).unwrap();
        counts[sel.chosen[0] as usize] += 1;
    }
    for (i, &c) in counts.iter().enumerate() {
        assert!(
            (300..=500).contains(&c),
            "entry {} drawn {} times out of 2000",
            i,
            c
        );
    }
}

#[test]
fn snapshot_projects_display_data_in_slot_order() {
    let roster = roster_of(&["a", "b", "c", "d"]);
    let mut ctx = DrawContext::with_seed(29);
    let sel = create_selection(roster, 2, 1, OWNER, &mut ctx).unwrap();

    let snap = sel.snapshot();
    assert_eq!(snap.owner, OWNER);
    assert_eq!(snap.chosen.len(), 2);
    for (slot, c) in snap.chosen.iter().enumerate() {
        assert_eq!(c, sel.roster.entries().get(sel.chosen[slot] as usize).unwrap());
    }
}
