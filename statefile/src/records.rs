//! Single records: one number, a register file or a program step,
//! outside of any state file.  The excluded command layer uses these
//! to move values through the clipboard and program import.
use base::prelude::*;

use super::error::CodecError;
use super::layout::Layout;
use super::model::Step;
use super::reader::Reader;
use super::writer::Writer;

// Number class tags of the decimal record format.
pub(crate) const TAG_ZERO: u8 = 0;
pub(crate) const TAG_NORMAL: u8 = 1;
pub(crate) const TAG_INFINITY: u8 = 2;
pub(crate) const TAG_NAN: u8 = 3;
pub(crate) const TAG_ERROR: u8 = 4;

// Program step argument tags.
pub(crate) const ARG_NONE: u8 = 0;
pub(crate) const ARG_NUMBER: u8 = 1;
pub(crate) const ARG_REGISTER: u8 = 2;
pub(crate) const ARG_LABEL: u8 = 3;

// Variable kinds.
pub(crate) const VAR_REAL: u8 = 0;
pub(crate) const VAR_MATRIX: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Number,
    Registers,
    ProgramStep,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Number(Decimal),
    Registers(Vec<Decimal>),
    Step(Step),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Number(_) => RecordKind::Number,
            Record::Registers(_) => RecordKind::Registers,
            Record::Step(_) => RecordKind::ProgramStep,
        }
    }
}

/// Encodes one number in the current format.
pub fn encode_value(x: &Decimal) -> Vec<u8> {
    let mut writer = Writer::new(Layout::CURRENT);
    writer.number(x);
    writer.into_bytes()
}

/// Decodes one number written in format `version`.  The bytes must
/// hold exactly one number.
pub fn decode_value(
    bytes: &[u8],
    version: u32,
    mode: &PrecisionMode,
) -> Result<Decimal, CodecError> {
    let mut reader = Reader::new(bytes, Layout::for_version(version)?, mode);
    let x = reader.number()?;
    reader.finish()?;
    Ok(x)
}

/// Encodes a record in the current format.  Fails only for content
/// which could not be read back, such as a label longer than 255
/// bytes.
pub fn encode_record(record: &Record) -> Result<Vec<u8>, CodecError> {
    let mut writer = Writer::new(Layout::CURRENT);
    match record {
        Record::Number(x) => writer.number(x),
        Record::Registers(registers) => writer.registers(registers)?,
        Record::Step(step) => writer.step(step)?,
    }
    Ok(writer.into_bytes())
}

/// Decodes a record of the given kind written in format `version`.
pub fn decode_record(
    kind: RecordKind,
    bytes: &[u8],
    version: u32,
    mode: &PrecisionMode,
) -> Result<Record, CodecError> {
    let mut reader = Reader::new(bytes, Layout::for_version(version)?, mode);
    let record = match kind {
        RecordKind::Number => Record::Number(reader.number()?),
        RecordKind::Registers => Record::Registers(reader.registers()?),
        RecordKind::ProgramStep => Record::Step(reader.step()?),
    };
    reader.finish()?;
    Ok(record)
}
