// Copyright (C) 2020-2026 Andy Kurnia.

pub enum Error {
    /// Malformed word-list input while constructing the automaton.
    /// Fatal to startup, not recoverable per-request.
    Build(String),
    /// The supplied grid is not exactly the expected dimensions.
    BoardShape { rows: usize, cols: usize },
    /// Malformed rack or board cell contents.
    Input(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Build(s) => write!(f, "cannot build dictionary: {s}"),
            Error::BoardShape { rows, cols } => {
                write!(f, "board must be 15x15, found {rows}x{cols}")
            }
            Error::Input(s) => write!(f, "{s}"),
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        (self as &dyn std::fmt::Display).fmt(f)
    }
}

impl std::error::Error for Error {}

pub type Returns<T> = Result<T, Error>;
