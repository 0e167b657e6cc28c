//! Tokenizes a ledger line and resolves it to a typed `Op`.

use {
    crate::money::{self, Cents, MoneyParseError},
    crate::time::{self, Time, TimeParseError},
    thiserror::Error,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("unrecognized operation '{0}'")]
    UnknownOp(String),
    #[error("missing required field for '{op}' (expected at least {expected}, got {got})")]
    MissingField {
        op: String,
        expected: usize,
        got: usize,
    },
    #[error(transparent)]
    Time(#[from] TimeParseError),
    #[error(transparent)]
    Money(#[from] MoneyParseError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Start {
        time: Time,
        nick: String,
    },
    Stop {
        time: Time,
        nick: String,
    },
    Pause {
        time: Time,
        nick: String,
    },
    Resume {
        time: Time,
        nick: String,
    },
    Transfer {
        time: Time,
        from_nick: String,
        to_nick: String,
        amount: Cents,
    },
    Buy {
        time: Time,
        nick: String,
        amount: Cents,
    },
    Pay {
        time: Time,
        nick: String,
        amount: Cents,
        window_start: Time,
        window_end: Time,
    },
}

/// Parses one ledger line. Returns `Ok(None)` for blank lines and `#`
/// comments, which carry no operation.
pub fn parse_line(line: &str) -> Result<Option<Op>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    let op_token = fields[0];

    let require = |n: usize| -> Result<(), ParseError> {
        if fields.len() < n {
            Err(ParseError::MissingField {
                op: op_token.to_string(),
                expected: n,
                got: fields.len(),
            })
        } else {
            Ok(())
        }
    };

    let op = match op_token {
        "START" => {
            require(3)?;
            Op::Start {
                time: time::parse(fields[1])?,
                nick: fields[2].to_string(),
            }
        }
        "STOP" => {
            require(3)?;
            Op::Stop {
                time: time::parse(fields[1])?,
                nick: fields[2].to_string(),
            }
        }
        "PAUSE" => {
            require(3)?;
            Op::Pause {
                time: time::parse(fields[1])?,
                nick: fields[2].to_string(),
            }
        }
        "RESUME" => {
            require(3)?;
            Op::Resume {
                time: time::parse(fields[1])?,
                nick: fields[2].to_string(),
            }
        }
        "TRANSFER" => {
            require(5)?;
            Op::Transfer {
                time: time::parse(fields[1])?,
                from_nick: fields[2].to_string(),
                to_nick: fields[3].to_string(),
                amount: money::parse_cents(fields[4])?,
            }
        }
        "BUY" => {
            require(4)?;
            Op::Buy {
                time: time::parse(fields[1])?,
                nick: fields[2].to_string(),
                amount: money::parse_cents(fields[3])?,
            }
        }
        "PAY" => {
            require(6)?;
            Op::Pay {
                time: time::parse(fields[1])?,
                nick: fields[2].to_string(),
                amount: money::parse_cents(fields[3])?,
                window_start: time::parse(fields[4])?,
                window_end: time::parse(fields[5])?,
            }
        }
        other => return Err(ParseError::UnknownOp(other.to_string())),
    };

    Ok(Some(op))
}
