//! The operation dispatcher: wires the person registry, the two interval
//! stores, and the debt graph together, and runs a full ledger end to end.

use {
    crate::allocator,
    crate::debt_graph::DebtGraph,
    crate::error::EngineError,
    crate::interval_store::{IntervalStore, IntervalStoreError},
    crate::money,
    crate::parser::{self, Op},
    crate::registry::PersonRegistry,
    crate::time,
    std::io::BufRead,
};

/// Owns the registry, both interval stores, and the debt graph for one run.
/// Mirrors the source's `pdbs`/`npdbs` split: one `IntervalStore` for
/// presence, one for rent obligation, identical in structure, different in
/// which ops mutate them.
#[derive(Debug, Default)]
pub struct Engine {
    registry: PersonRegistry,
    presence: IntervalStore,
    obligation: IntervalStore,
    graph: DebtGraph,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `input` line by line, parsing and applying each record in
    /// order. Stops at the first error; no partial output.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<(), EngineError> {
        for (idx, line) in input.lines().enumerate() {
            let line_no = idx + 1;
            let line = line?;
            let op = parser::parse_line(&line).map_err(|source| EngineError::Parse {
                line: line_no,
                source,
            })?;
            if let Some(op) = op {
                log::debug!("line {line_no}: applying {op:?}");
                self.apply(op, line_no)?;
            }
        }
        Ok(())
    }

    fn apply(&mut self, op: Op, line_no: usize) -> Result<(), EngineError> {
        match op {
            Op::Start { time, nick } => {
                let p = self
                    .registry
                    .intern(&nick)
                    .map_err(|source| EngineError::Registry {
                        line: line_no,
                        source,
                    })?;
                self.presence.insert(p, time, time::MAX);
                self.obligation.insert(p, time, time::MAX);
            }
            Op::Stop { time: t, nick } => {
                let known = self.registry.lookup(&nick).is_some();
                let p = self
                    .registry
                    .intern_or_lookup(&nick)
                    .map_err(|source| EngineError::Registry {
                        line: line_no,
                        source,
                    })?;
                if known {
                    self.close_both(p, t, line_no)?;
                } else {
                    // retroactive [-inf, t) interval for a never-started nick
                    self.presence.insert(p, time::MIN, t);
                    self.obligation.insert(p, time::MIN, t);
                }
            }
            Op::Pause { time: t, nick } => {
                let p = self.resolve(&nick, line_no)?;
                self.presence
                    .close_open(p, t)
                    .map_err(|source| EngineError::IntervalStore {
                        line: line_no,
                        source,
                    })?;
            }
            Op::Resume { time: t, nick } => {
                let p = self.resolve(&nick, line_no)?;
                if self.presence.has_open(p) {
                    return Err(EngineError::IntervalStore {
                        line: line_no,
                        source: IntervalStoreError::AlreadyOpen(p),
                    });
                }
                self.presence.insert(p, t, time::MAX);
            }
            Op::Transfer {
                time: _,
                from_nick,
                to_nick,
                amount,
            } => {
                let from = self.resolve(&from_nick, line_no)?;
                let to = self.resolve(&to_nick, line_no)?;
                self.graph.add(from, to, amount);
            }
            Op::Buy {
                time: t,
                nick,
                amount,
            } => {
                let payer = self.resolve(&nick, line_no)?;
                allocator::allocate_buy(&mut self.graph, &self.obligation, payer, amount, t)
                    .map_err(|source| EngineError::Buy {
                        line: line_no,
                        source,
                    })?;
            }
            Op::Pay {
                time: _,
                nick,
                amount,
                window_start,
                window_end,
            } => {
                let payer = self.resolve(&nick, line_no)?;
                allocator::allocate_pay(
                    &mut self.graph,
                    &self.presence,
                    &self.obligation,
                    payer,
                    amount,
                    window_start,
                    window_end,
                );
            }
        }
        Ok(())
    }

    fn resolve(&self, nick: &str, line_no: usize) -> Result<u32, EngineError> {
        self.registry
            .lookup(nick)
            .ok_or_else(|| EngineError::UnknownNickname {
                line: line_no,
                nickname: nick.to_string(),
            })
    }

    fn close_both(&mut self, p: u32, t: time::Time, line_no: usize) -> Result<(), EngineError> {
        self.presence
            .close_open(p, t)
            .map_err(|source| EngineError::IntervalStore {
                line: line_no,
                source,
            })?;
        self.obligation
            .close_open(p, t)
            .map_err(|source| EngineError::IntervalStore {
                line: line_no,
                source,
            })
    }

    pub fn registry(&self) -> &PersonRegistry {
        &self.registry
    }

    pub fn presence(&self) -> &IntervalStore {
        &self.presence
    }

    pub fn obligation(&self) -> &IntervalStore {
        &self.obligation
    }

    /// One formatted line per non-zero debt edge.
    pub fn debt_lines(&self) -> Vec<String> {
        self.graph
            .iter_nonzero()
            .map(|(lo, hi, w)| {
                let lo_name = self.registry.name_of(lo);
                let hi_name = self.registry.name_of(hi);
                if w > 0 {
                    format!("{hi_name} owes {lo_name} {}€", money::format_cents(w))
                } else {
                    format!("{lo_name} owes {hi_name} {}€", money::format_cents(-w))
                }
            })
            .collect()
    }
}
