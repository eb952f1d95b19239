//! Decoding.  A [`Reader`] is a bounded cursor over the bytes of a
//! state file which knows the [`Layout`] of the version being read,
//! so a single decoding routine serves every version.
use tracing::{event, Level};

use base::prelude::*;

use super::error::{CodecError, Problem};
use super::header::{Header, CURRENT_VERSION};
use super::layout::{Field, Layout};
use super::model::{
    GetkeyState, KeyAssignment, Matrix, Options, Program, Stack, StateFile, Step, StepArgument,
    Variable, VariableValue,
};
use super::records::{ARG_LABEL, ARG_NONE, ARG_NUMBER, ARG_REGISTER, VAR_MATRIX, VAR_REAL};
use super::records::{TAG_ERROR, TAG_INFINITY, TAG_NAN, TAG_NORMAL, TAG_ZERO};

/// Size of a BCD conversion table entry (a binary double).
const BCD_ENTRY_SIZE: usize = 8;

pub(crate) struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
    layout: Layout,
    mode: PrecisionMode,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(bytes: &'a [u8], layout: Layout, mode: &PrecisionMode) -> Reader<'a> {
        Reader {
            bytes,
            pos: 0,
            layout,
            mode: *mode,
        }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    fn fail_at(&self, offset: usize, problem: Problem) -> CodecError {
        CodecError::Format { offset, problem }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if n > self.remaining() {
            return Err(self.fail_at(
                self.pos,
                Problem::Truncated {
                    need: n,
                    remaining: self.remaining(),
                },
            ));
        }
        let start = self.pos;
        self.pos += n;
        Ok(&self.bytes[start..self.pos])
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0_u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub(crate) fn u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.array::<1>()?[0])
    }

    fn u16(&mut self) -> Result<u16, CodecError> {
        Ok(u16::from_le_bytes(self.array()?))
    }

    pub(crate) fn u32(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_le_bytes(self.array()?))
    }

    fn i32(&mut self) -> Result<i32, CodecError> {
        Ok(i32::from_le_bytes(self.array()?))
    }

    fn f64(&mut self) -> Result<f64, CodecError> {
        Ok(f64::from_le_bytes(self.array()?))
    }

    fn flag(&mut self) -> Result<bool, CodecError> {
        let at = self.pos;
        match self.u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(self.fail_at(at, Problem::BadFlag { value })),
        }
    }

    /// A length-prefixed UTF-8 string.
    fn text(&mut self) -> Result<String, CodecError> {
        let at = self.pos;
        let len = usize::from(self.u8()?);
        let raw = self.take(len)?;
        String::from_utf8(raw.to_vec()).map_err(|_| self.fail_at(at, Problem::BadText))
    }

    /// Reads an element count.  Each element occupies at least
    /// `min_size` bytes, so a count which could not possibly fit in
    /// the rest of the file is rejected before anything is allocated
    /// for it.
    fn count(&mut self, min_size: usize) -> Result<usize, CodecError> {
        let at = self.pos;
        let n = self.u32()? as usize;
        let need = n.saturating_mul(min_size);
        if need > self.remaining() {
            return Err(self.fail_at(
                at,
                Problem::Truncated {
                    need,
                    remaining: self.remaining(),
                },
            ));
        }
        Ok(n)
    }

    fn min_number_size(&self) -> usize {
        if self.layout.has(Field::DecimalNumbers) {
            2
        } else {
            8
        }
    }

    /// Checks that every byte has been consumed.
    pub(crate) fn finish(&self) -> Result<(), CodecError> {
        match self.remaining() {
            0 => Ok(()),
            count => Err(self.fail_at(self.pos, Problem::TrailingBytes { count })),
        }
    }

    /// A number, in whichever representation this version uses.
    /// Binary doubles from older files are converted to the nearest
    /// decimal of the reader's precision mode.
    pub(crate) fn number(&mut self) -> Result<Decimal, CodecError> {
        if self.layout.has(Field::DecimalNumbers) {
            self.decimal()
        } else {
            let x = self.f64()?;
            Ok(Decimal::from_f64(x, &self.mode).value)
        }
    }

    /// A decimal record: class tag, sign, and for normal numbers the
    /// exponent, digit count and packed digits (two to a byte, most
    /// significant first).  Values stored with more digits than the
    /// reader's mode holds are rounded to fit.
    fn decimal(&mut self) -> Result<Decimal, CodecError> {
        let at = self.pos;
        let tag = self.u8()?;
        let negative = self.flag()?;
        match tag {
            TAG_ZERO => Ok(Decimal::zero(negative)),
            TAG_INFINITY => Ok(Decimal::infinity(negative)),
            TAG_NAN => Ok(Decimal::NAN),
            TAG_ERROR => Ok(Decimal::ERROR),
            TAG_NORMAL => {
                let exponent = self.i32()?;
                let count = usize::from(self.u8()?);
                if count > MAX_DIGITS {
                    return Err(self.fail_at(
                        at,
                        Problem::BadDigits(DigitError::TooManyDigits {
                            supplied: count,
                            precision: MAX_DIGITS,
                        }),
                    ));
                }
                let packed = self.take(count.div_ceil(2))?;
                let mut digits = [0_u8; MAX_DIGITS];
                for (i, d) in digits[..count].iter_mut().enumerate() {
                    let byte = packed[i / 2];
                    *d = if i % 2 == 0 { byte >> 4 } else { byte & 0x0F };
                }
                let stored = Decimal::new(
                    negative,
                    exponent,
                    &digits[..count],
                    &PrecisionMode::widest(),
                )
                .map_err(|e| self.fail_at(at, Problem::BadDigits(e)))?;
                Ok(stored.rounded_to(&self.mode).value)
            }
            tag => Err(self.fail_at(at, Problem::BadNumberClass { tag })),
        }
    }

    /// A command code; one byte before the catalog was renumbered,
    /// two bytes after.  Old one-byte codes keep their values.
    fn command(&mut self) -> Result<u16, CodecError> {
        if self.layout.has(Field::WideCommandCodes) {
            self.u16()
        } else {
            self.u8().map(u16::from)
        }
    }

    fn options(&mut self) -> Result<Options, CodecError> {
        let mut options = Options::default();
        if self.layout.has(Field::IpHack) {
            let ip_hack = self.flag()?;
            event!(Level::DEBUG, ip_hack, "discarding obsolete IP Hack flag");
        }
        if self.layout.has(Field::SingularMatrix) {
            options.singular_matrix = self.flag()?;
        }
        if self.layout.has(Field::MatrixOutOfRange) {
            options.matrix_out_of_range = self.flag()?;
        }
        if self.layout.has(Field::DeferredPrint) {
            options.deferred_print = self.flag()?;
        }
        if self.layout.has(Field::Hp42sByteCounts) {
            let byte_counts = self.flag()?;
            event!(
                Level::DEBUG,
                byte_counts,
                "discarding obsolete HP-42S byte counts flag"
            );
        }
        if self.layout.has(Field::RawText) {
            options.raw_text = self.flag()?;
        }
        Ok(options)
    }

    fn skip_bcd_table(&mut self) -> Result<(), CodecError> {
        if self.layout.has(Field::BcdTable) {
            let entries = self.count(BCD_ENTRY_SIZE)?;
            self.take(entries * BCD_ENTRY_SIZE)?;
            event!(Level::DEBUG, "skipped BCD conversion table of {entries} entries");
        }
        Ok(())
    }

    fn getkey(&mut self) -> Result<GetkeyState, CodecError> {
        if self.layout.has(Field::Getkey) {
            Ok(GetkeyState {
                pending: self.flag()?,
                key: self.u8()?,
            })
        } else {
            Ok(GetkeyState::default())
        }
    }

    fn stack(&mut self) -> Result<Stack, CodecError> {
        Ok(Stack {
            x: self.number()?,
            y: self.number()?,
            z: self.number()?,
            t: self.number()?,
            lastx: self.number()?,
        })
    }

    pub(crate) fn registers(&mut self) -> Result<Vec<Decimal>, CodecError> {
        let n = self.count(self.min_number_size())?;
        (0..n).map(|_| self.number()).collect()
    }

    fn matrix(&mut self) -> Result<Matrix, CodecError> {
        let at = self.pos;
        let rows = self.u32()?;
        let columns = self.u32()?;
        let count = u64::from(rows) * u64::from(columns);
        let available = (self.remaining() / self.min_number_size()) as u64;
        if count > available {
            return Err(self.fail_at(at, Problem::MatrixTooLarge { rows, columns }));
        }
        let elements = (0..count)
            .map(|_| self.number())
            .collect::<Result<Vec<Decimal>, CodecError>>()?;
        Ok(Matrix {
            rows,
            columns,
            elements,
        })
    }

    fn shared_matrices(&mut self) -> Result<Vec<Matrix>, CodecError> {
        if !self.layout.has(Field::SharedMatrices) {
            return Ok(Vec::new());
        }
        let n = self.count(8)?;
        (0..n).map(|_| self.matrix()).collect()
    }

    /// Reads the variables.  Before matrices were shared, each matrix
    /// variable held its own matrix; those are moved into `matrices`
    /// so that every version decodes to the same shape.
    fn variables(&mut self, matrices: &mut Vec<Matrix>) -> Result<Vec<Variable>, CodecError> {
        let n = self.count(2)?;
        let mut variables = Vec::with_capacity(n);
        for _ in 0..n {
            let name = self.text()?;
            let at = self.pos;
            let value = match self.u8()? {
                VAR_REAL => VariableValue::Real(self.number()?),
                VAR_MATRIX if self.layout.has(Field::SharedMatrices) => {
                    let index = self.u32()?;
                    if index as usize >= matrices.len() {
                        return Err(self.fail_at(
                            at,
                            Problem::BadMatrixReference {
                                index,
                                count: matrices.len(),
                            },
                        ));
                    }
                    VariableValue::Matrix(index as usize)
                }
                VAR_MATRIX => {
                    matrices.push(self.matrix()?);
                    VariableValue::Matrix(matrices.len() - 1)
                }
                kind => return Err(self.fail_at(at, Problem::BadVariableKind { kind })),
            };
            variables.push(Variable { name, value });
        }
        Ok(variables)
    }

    pub(crate) fn step(&mut self) -> Result<Step, CodecError> {
        let command = self.command()?;
        let at = self.pos;
        let argument = match self.u8()? {
            ARG_NONE => StepArgument::None,
            ARG_NUMBER => StepArgument::Number(self.number()?),
            ARG_REGISTER => StepArgument::Register(self.u8()?),
            ARG_LABEL => StepArgument::Label(self.text()?),
            tag => return Err(self.fail_at(at, Problem::BadStepArgument { tag })),
        };
        Ok(Step { command, argument })
    }

    fn programs(&mut self) -> Result<Vec<Program>, CodecError> {
        let n = self.count(4)?;
        let mut programs = Vec::with_capacity(n);
        for _ in 0..n {
            let steps = self.count(2)?;
            let steps = (0..steps)
                .map(|_| self.step())
                .collect::<Result<Vec<Step>, CodecError>>()?;
            programs.push(Program { steps });
        }
        Ok(programs)
    }

    fn key_assignments(&mut self) -> Result<Vec<KeyAssignment>, CodecError> {
        let n = self.count(2)?;
        (0..n)
            .map(|_| -> Result<KeyAssignment, CodecError> {
                Ok(KeyAssignment {
                    slot: self.u8()?,
                    command: self.command()?,
                })
            })
            .collect()
    }

    /// Everything after the header.
    fn body(&mut self) -> Result<StateFile, CodecError> {
        let options = self.options()?;
        self.skip_bcd_table()?;
        let getkey = self.getkey()?;
        let stack = self.stack()?;
        let registers = self.registers()?;
        let mut matrices = self.shared_matrices()?;
        let variables = self.variables(&mut matrices)?;
        let programs = self.programs()?;
        let key_assignments = self.key_assignments()?;
        self.finish()?;
        Ok(StateFile {
            options,
            getkey,
            stack,
            registers,
            matrices,
            variables,
            programs,
            key_assignments,
        })
    }
}

impl StateFile {
    /// Decodes a complete state file of any supported version.
    /// Numbers are converted to the precision `mode`.  Either the
    /// whole file is decoded or an error is returned.
    pub fn decode(bytes: &[u8], mode: &PrecisionMode) -> Result<StateFile, CodecError> {
        let mut reader = Reader::new(bytes, Layout::CURRENT, mode);
        let header = Header::parse(&mut reader)?;
        reader.layout = Layout::for_version(header.version)?;
        if header.version < CURRENT_VERSION {
            event!(
                Level::DEBUG,
                "upgrading state file from version {} to {CURRENT_VERSION}",
                header.version
            );
            for (field, present) in reader.layout.differences() {
                if present {
                    event!(Level::DEBUG, "version {} has {field}, which is dropped", header.version);
                } else {
                    event!(Level::DEBUG, "version {} lacks {field}, using the default", header.version);
                }
            }
        }
        let state = reader.body()?;
        event!(
            Level::DEBUG,
            registers = state.registers.len(),
            matrices = state.matrices.len(),
            variables = state.variables.len(),
            programs = state.programs.len(),
            "decoded state file"
        );
        Ok(state)
    }
}
