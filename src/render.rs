//! ASCII timeline rendering for the `timeline` CLI subcommand. Read-only,
//! never consulted by the engine.

use {crate::interval_store::IntervalStore, crate::registry::PersonId, crate::time::Time};

/// One character per sample point in `[w0, w1)`, spaced `step` apart:
/// `#` present, `~` obligated but absent, `.` neither.
pub fn render(
    presence: &IntervalStore,
    obligation: &IntervalStore,
    owner: PersonId,
    w0: Time,
    w1: Time,
    step: Time,
) -> String {
    debug_assert!(step > 0, "rendering step must be positive");
    let mut bar = String::new();
    let mut t = w0;
    while t < w1 {
        let present = presence.intersect(t, t).any(|iv| iv.owner == owner);
        let obligated = obligation.intersect(t, t).any(|iv| iv.owner == owner);
        bar.push(if present {
            '#'
        } else if obligated {
            '~'
        } else {
            '.'
        });
        t += step;
    }
    bar
}
