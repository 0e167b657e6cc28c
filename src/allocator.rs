//! Rounding-tolerant cost allocation over a sweep-line split sequence, and
//! the `PAY`/`BUY` gap-filling rule that sources empty presence splits from
//! the obligation store.

use {
    crate::debt_graph::DebtGraph,
    crate::interval::Interval,
    crate::interval_store::IntervalStore,
    crate::money::Cents,
    crate::registry::PersonId,
    crate::sweep::{self, Split},
    crate::time::Time,
};

/// Integer division truncating toward zero, plus a one-cent payer tip when
/// the division has a non-zero remainder.
fn cost_with_tip(numerator: i128, denominator: i128) -> Cents {
    debug_assert!(denominator > 0, "denominator must be positive");
    let base = numerator / denominator;
    let remainder = numerator % denominator;
    (base + if remainder != 0 { 1 } else { 0 }) as Cents
}

/// Applies a `PAY` of `total` cents over window `[w0, w1]`, built from
/// `presence`, gap-filled from `obligation` where presence has no
/// occupants. Charges every split's occupants (other than `payer`) to
/// `payer` via `graph.add`.
pub fn allocate_pay(
    graph: &mut DebtGraph,
    presence: &IntervalStore,
    obligation: &IntervalStore,
    payer: PersonId,
    total: Cents,
    w0: Time,
    w1: Time,
) {
    if w0 == w1 {
        return;
    }
    let splits = gap_filled_splits(presence, obligation, w0, w1);
    let window_width = (w1 - w0) as i128;

    for s in &splits {
        let n = s.occupants.len() as i128;
        if n == 0 {
            continue;
        }
        let width = (s.end - s.start) as i128;
        let cost = cost_with_tip(total as i128 * width, n * window_width);
        for &occupant in &s.occupants {
            if occupant != payer {
                graph.add(payer, occupant, cost);
            }
        }
    }
}

/// Builds the split sequence for `[w0, w1]` from `presence`, substituting
/// obligation-sourced splits over any presence gap (prefix, suffix, or
/// interior empty-occupant split).
fn gap_filled_splits(
    presence: &IntervalStore,
    obligation: &IntervalStore,
    w0: Time,
    w1: Time,
) -> Vec<Split> {
    let clipped: Vec<Interval> = presence
        .intersect(w0, w1)
        .map(|iv| iv.clip(w0, w1))
        .collect();
    let presence_splits = sweep::split(&clipped);

    let mut filled = Vec::new();
    let mut cursor = w0;
    for s in &presence_splits {
        if s.start > cursor {
            fill_gap(obligation, cursor, s.start, &mut filled);
        }
        filled.push(s.clone());
        cursor = s.end;
    }
    if cursor < w1 {
        fill_gap(obligation, cursor, w1, &mut filled);
    }
    filled
}

fn fill_gap(obligation: &IntervalStore, gap_start: Time, gap_end: Time, out: &mut Vec<Split>) {
    let clipped: Vec<Interval> = obligation
        .intersect(gap_start, gap_end)
        .map(|iv| iv.clip(gap_start, gap_end))
        .collect();
    out.extend(sweep::split(&clipped));
}

/// `BUY`'s degenerate allocation path: occupants are the owners of
/// obligation intervals containing `t`. Fatal (division by zero) if none.
pub fn allocate_buy(
    graph: &mut DebtGraph,
    obligation: &IntervalStore,
    payer: PersonId,
    total: Cents,
    t: Time,
) -> Result<(), BuyError> {
    let occupants: Vec<PersonId> = obligation.intersect(t, t).map(|iv| iv.owner).collect();
    let n = occupants.len();
    if n == 0 {
        return Err(BuyError::NoObligatedOccupants);
    }
    let cost = cost_with_tip(total as i128, n as i128);
    for occupant in occupants {
        if occupant != payer {
            graph.add(payer, occupant, cost);
        }
    }
    Ok(())
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum BuyError {
    #[error("BUY at this timestamp has no obligated occupants")]
    NoObligatedOccupants,
}
