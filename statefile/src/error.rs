//! Errors reported while decoding state files.
use thiserror::Error;

use base::prelude::DigitError;

use super::header::CURRENT_VERSION;

/// Describes what was wrong with the contents of a state file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Problem {
    #[error("bad magic number {found:#010x}")]
    BadMagic { found: u32 },
    #[error("need {need} more bytes but only {remaining} remain")]
    Truncated { need: usize, remaining: usize },
    #[error("{count} unexpected bytes follow the last record")]
    TrailingBytes { count: usize },
    #[error("flag byte has value {value} (expected 0 or 1)")]
    BadFlag { value: u8 },
    #[error("unknown number class tag {tag}")]
    BadNumberClass { tag: u8 },
    #[error("invalid packed digits: {0}")]
    BadDigits(DigitError),
    #[error("unknown program step argument tag {tag}")]
    BadStepArgument { tag: u8 },
    #[error("unknown variable kind {kind}")]
    BadVariableKind { kind: u8 },
    #[error("variable refers to matrix {index} but only {count} are stored")]
    BadMatrixReference { index: u32, count: usize },
    #[error("a {rows}x{columns} matrix is too large")]
    MatrixTooLarge { rows: u32, columns: u32 },
    #[error("a {rows}x{columns} matrix has {elements} elements")]
    MatrixShape {
        rows: u32,
        columns: u32,
        elements: usize,
    },
    #[error("text is not valid UTF-8")]
    BadText,
    #[error("text of {len} bytes is longer than 255")]
    TextTooLong { len: usize },
    #[error("{count} items are too many to count in 32 bits")]
    TooManyItems { count: usize },
}

/// Failure to load or save a state file.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The file is damaged or is not a state file at all.
    #[error("invalid state file at offset {offset}: {problem}")]
    Format { offset: usize, problem: Problem },
    /// The file was written by a newer release than this one.
    #[error("state file version {version} is newer than the newest supported version {max}", max = CURRENT_VERSION)]
    UnsupportedVersion { version: u32 },
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    pub fn is_format_error(&self) -> bool {
        matches!(self, CodecError::Format { .. })
    }

    pub fn problem(&self) -> Option<&Problem> {
        match self {
            CodecError::Format { problem, .. } => Some(problem),
            _ => None,
        }
    }
}
