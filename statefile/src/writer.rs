//! Encoding.  Files are always written in the current layout; the
//! writer can produce older layouts too, which the tests use to build
//! legacy files.
//!
//! The model's fields are public, so the writer checks the things the
//! reader relies on (matrix shapes, matrix references, text and
//! element counts which fit their length prefixes) and refuses to
//! write state which could not be read back.
use base::prelude::*;

use super::error::{CodecError, Problem};
use super::header::Header;
use super::layout::{Field, Layout};
use super::model::{Matrix, Stack, StateFile, Step, StepArgument, VariableValue};
use super::records::{ARG_LABEL, ARG_NONE, ARG_NUMBER, ARG_REGISTER, VAR_MATRIX, VAR_REAL};
use super::records::{TAG_ERROR, TAG_INFINITY, TAG_NAN, TAG_NORMAL, TAG_ZERO};

/// Longest text (in bytes) a length prefix can describe.
const MAX_TEXT_LEN: usize = u8::MAX as usize;

pub(crate) struct Writer {
    bytes: Vec<u8>,
    layout: Layout,
}

impl Writer {
    pub(crate) fn new(layout: Layout) -> Writer {
        Writer {
            bytes: Vec::new(),
            layout,
        }
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub(crate) fn u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    fn u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub(crate) fn u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    fn i32(&mut self, value: i32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    fn f64(&mut self, value: f64) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    fn flag(&mut self, value: bool) {
        self.u8(u8::from(value));
    }

    fn fail(&self, problem: Problem) -> CodecError {
        CodecError::Format {
            offset: self.bytes.len(),
            problem,
        }
    }

    fn count(&mut self, n: usize) -> Result<(), CodecError> {
        let n = u32::try_from(n).map_err(|_| self.fail(Problem::TooManyItems { count: n }))?;
        self.u32(n);
        Ok(())
    }

    /// Writes a length-prefixed string.
    fn text(&mut self, text: &str) -> Result<(), CodecError> {
        if text.len() > MAX_TEXT_LEN {
            return Err(self.fail(Problem::TextTooLong { len: text.len() }));
        }
        self.u8(text.len() as u8);
        self.bytes.extend_from_slice(text.as_bytes());
        Ok(())
    }

    pub(crate) fn number(&mut self, x: &Decimal) {
        if self.layout.has(Field::DecimalNumbers) {
            self.decimal(x);
        } else {
            self.f64(x.to_f64());
        }
    }

    fn decimal(&mut self, x: &Decimal) {
        let tag = match x.class() {
            Class::Zero => TAG_ZERO,
            Class::Normal => TAG_NORMAL,
            Class::Infinity => TAG_INFINITY,
            Class::NaN => TAG_NAN,
            Class::Error => TAG_ERROR,
        };
        self.u8(tag);
        self.flag(x.is_negative() && !x.is_unordered());
        if x.is_normal() {
            let digits = x.significant();
            self.i32(x.exponent());
            self.u8(digits.len() as u8);
            for pair in digits.chunks(2) {
                let low = pair.get(1).copied().unwrap_or(0);
                self.u8((pair[0] << 4) | low);
            }
        }
    }

    fn command(&mut self, code: u16) {
        if self.layout.has(Field::WideCommandCodes) {
            self.u16(code);
        } else {
            self.u8(u8::try_from(code).unwrap_or(u8::MAX));
        }
    }

    fn stack(&mut self, stack: &Stack) {
        for x in stack.values() {
            self.number(x);
        }
    }

    pub(crate) fn registers(&mut self, registers: &[Decimal]) -> Result<(), CodecError> {
        self.count(registers.len())?;
        for x in registers {
            self.number(x);
        }
        Ok(())
    }

    fn matrix(&mut self, m: &Matrix) -> Result<(), CodecError> {
        let expected = u64::from(m.rows) * u64::from(m.columns);
        if m.elements.len() as u64 != expected {
            return Err(self.fail(Problem::MatrixShape {
                rows: m.rows,
                columns: m.columns,
                elements: m.elements.len(),
            }));
        }
        self.u32(m.rows);
        self.u32(m.columns);
        for x in &m.elements {
            self.number(x);
        }
        Ok(())
    }

    pub(crate) fn step(&mut self, step: &Step) -> Result<(), CodecError> {
        self.command(step.command);
        match &step.argument {
            StepArgument::None => self.u8(ARG_NONE),
            StepArgument::Number(x) => {
                self.u8(ARG_NUMBER);
                self.number(x);
            }
            StepArgument::Register(r) => {
                self.u8(ARG_REGISTER);
                self.u8(*r);
            }
            StepArgument::Label(text) => {
                self.u8(ARG_LABEL);
                self.text(text)?;
            }
        }
        Ok(())
    }

    fn state(&mut self, state: &StateFile) -> Result<(), CodecError> {
        let layout = self.layout;
        let options = &state.options;
        if layout.has(Field::IpHack) {
            self.flag(false);
        }
        if layout.has(Field::SingularMatrix) {
            self.flag(options.singular_matrix);
        }
        if layout.has(Field::MatrixOutOfRange) {
            self.flag(options.matrix_out_of_range);
        }
        if layout.has(Field::DeferredPrint) {
            self.flag(options.deferred_print);
        }
        if layout.has(Field::Hp42sByteCounts) {
            self.flag(false);
        }
        if layout.has(Field::RawText) {
            self.flag(options.raw_text);
        }
        if layout.has(Field::BcdTable) {
            self.count(0)?;
        }
        if layout.has(Field::Getkey) {
            self.flag(state.getkey.pending);
            self.u8(state.getkey.key);
        }
        self.stack(&state.stack);
        self.registers(&state.registers)?;
        let shared = layout.has(Field::SharedMatrices);
        if shared {
            self.count(state.matrices.len())?;
            for m in &state.matrices {
                self.matrix(m)?;
            }
        }
        self.count(state.variables.len())?;
        for variable in &state.variables {
            self.text(&variable.name)?;
            match variable.value {
                VariableValue::Real(x) => {
                    self.u8(VAR_REAL);
                    self.number(&x);
                }
                VariableValue::Matrix(index) => {
                    let Some(m) = state.matrices.get(index) else {
                        return Err(self.fail(Problem::BadMatrixReference {
                            index: u32::try_from(index).unwrap_or(u32::MAX),
                            count: state.matrices.len(),
                        }));
                    };
                    self.u8(VAR_MATRIX);
                    if shared {
                        // Bounded by the matrix count, which fitted in a u32.
                        self.u32(index as u32);
                    } else {
                        self.matrix(m)?;
                    }
                }
            }
        }
        self.count(state.programs.len())?;
        for program in &state.programs {
            self.count(program.steps.len())?;
            for step in &program.steps {
                self.step(step)?;
            }
        }
        self.count(state.key_assignments.len())?;
        for key in &state.key_assignments {
            self.u8(key.slot);
            self.command(key.command);
        }
        Ok(())
    }
}

impl StateFile {
    /// Encodes the state in the current format.  State which the
    /// reader would reject (a matrix whose element count does not
    /// match its shape, a reference to a matrix which does not exist,
    /// or a name too long for its length prefix) is a format error.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        self.encode_as(Layout::CURRENT)
    }

    /// Encodes the state in the format of an older version.  Options
    /// which that version lacks are lost; obsolete options are
    /// written as off.
    pub(crate) fn encode_as(&self, layout: Layout) -> Result<Vec<u8>, CodecError> {
        let mut writer = Writer::new(layout);
        Header {
            version: layout.version(),
        }
        .write(&mut writer);
        writer.state(self)?;
        Ok(writer.into_bytes())
    }
}
