//! The `statefile` crate reads and writes saved calculator state.
//!
//! A state file starts with a [`Header`] (a magic number and a format
//! version).  The format has been revised ten times; every revision
//! is described by a row of the field-presence table in [`layout`],
//! and one reader consults that table to decode files of any
//! version.  Files are always written in the current format, so
//! reading a file and writing it back upgrades it.

mod error;
mod file;
mod header;
mod model;
mod reader;
mod records;
mod writer;

pub mod layout;

pub use error::{CodecError, Problem};
pub use file::{read_state_file, write_state_file};
pub use header::{Header, CURRENT_VERSION, MAGIC};
pub use layout::{Field, Layout};
pub use model::{
    GetkeyState, KeyAssignment, Matrix, Options, Program, Stack, StateFile, Step, StepArgument,
    Variable, VariableValue,
};
pub use records::{decode_record, decode_value, encode_record, encode_value, Record, RecordKind};
