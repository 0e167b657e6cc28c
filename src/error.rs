//! Top-level error type composing every fallible layer.

use {
    crate::allocator::BuyError, crate::interval_store::IntervalStoreError,
    crate::parser::ParseError, crate::registry::RegistryError, thiserror::Error,
};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },

    #[error("line {line}: {source}")]
    Registry {
        line: usize,
        #[source]
        source: RegistryError,
    },

    #[error("line {line}: {source}")]
    IntervalStore {
        line: usize,
        #[source]
        source: IntervalStoreError,
    },

    #[error("line {line}: {source}")]
    Buy {
        line: usize,
        #[source]
        source: BuyError,
    },

    #[error("line {line}: referential error, unknown nickname '{nickname}'")]
    UnknownNickname { line: usize, nickname: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invariant violation: {0}")]
    Invariant(String),
}
