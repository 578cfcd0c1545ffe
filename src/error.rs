//! Error types for the NHA assembler

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::parser::Mnemonic;

/// Why a single line could not be encoded
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum EncodeError {
    #[error("`{mnemonic}` expects operand {position}, found none")]
    MissingOperand { mnemonic: Mnemonic, position: usize },

    #[error("`{0}` is not a register")]
    UnknownRegister(String),

    #[error("`{0}` is not a valid immediate")]
    InvalidImmediate(String),
}

/// Failure of a whole assembly run
#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("cannot read `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write `{path}`: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("output error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: `{text}`: {source}")]
    Malformed {
        line: usize,
        text: String,
        #[source]
        source: EncodeError,
    },
}
