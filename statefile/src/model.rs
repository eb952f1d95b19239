//! The in-memory form of saved calculator state.  Whatever version a
//! file was written in, it is decoded into these types.
use serde::Serialize;

use base::prelude::*;

/// Calculator option flags which are saved with the state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Options {
    pub singular_matrix: bool,
    pub matrix_out_of_range: bool,
    pub deferred_print: bool,
    pub raw_text: bool,
}

/// A GETKEY which was waiting for a key when the calculator was
/// switched off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GetkeyState {
    pub pending: bool,
    pub key: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Stack {
    pub x: Decimal,
    pub y: Decimal,
    pub z: Decimal,
    pub t: Decimal,
    pub lastx: Decimal,
}

impl Stack {
    pub(crate) fn values(&self) -> [&Decimal; 5] {
        [&self.x, &self.y, &self.z, &self.t, &self.lastx]
    }
}

/// A real matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    pub rows: u32,
    pub columns: u32,
    pub elements: Vec<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum VariableValue {
    Real(Decimal),
    /// An index into [`StateFile::matrices`].
    Matrix(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    pub name: String,
    pub value: VariableValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StepArgument {
    None,
    Number(Decimal),
    Register(u8),
    Label(String),
}

/// One program step: a command and its argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub command: u16,
    pub argument: StepArgument,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Program {
    pub steps: Vec<Step>,
}

/// A command assigned to a slot of the CUSTOM menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyAssignment {
    pub slot: u8,
    pub command: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StateFile {
    pub options: Options,
    pub getkey: GetkeyState,
    pub stack: Stack,
    pub registers: Vec<Decimal>,
    pub matrices: Vec<Matrix>,
    pub variables: Vec<Variable>,
    pub programs: Vec<Program>,
    pub key_assignments: Vec<KeyAssignment>,
}
