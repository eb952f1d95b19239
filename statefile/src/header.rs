//! The fixed header at the start of every state file.
use base::prelude::*;

use super::error::{CodecError, Problem};
use super::layout::Layout;
use super::reader::Reader;
use super::writer::Writer;

/// The characters "Fk42" as a 32-bit number.
pub const MAGIC: u32 = 0x466B_3432;

/// The format version written by this release.
pub const CURRENT_VERSION: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: u32,
}

impl Header {
    /// Size of the header in bytes.
    pub const SIZE: usize = 8;

    pub const fn current() -> Header {
        Header {
            version: CURRENT_VERSION,
        }
    }

    /// Reads just the header of a state file.
    pub fn decode(bytes: &[u8]) -> Result<Header, CodecError> {
        let mut reader = Reader::new(bytes, Layout::CURRENT, &PrecisionMode::HP42S);
        Header::parse(&mut reader)
    }

    /// Parses the header from the start of `reader`.  A wrong magic
    /// number is a format error; a version newer than
    /// [`CURRENT_VERSION`] is reported separately since the file is
    /// probably fine, just too new for us.
    pub(crate) fn parse(reader: &mut Reader<'_>) -> Result<Header, CodecError> {
        let at = reader.pos();
        let found = reader.u32()?;
        if found != MAGIC {
            return Err(CodecError::Format {
                offset: at,
                problem: Problem::BadMagic { found },
            });
        }
        let version = reader.u32()?;
        if version > CURRENT_VERSION {
            return Err(CodecError::UnsupportedVersion { version });
        }
        Ok(Header { version })
    }

    pub(crate) fn write(&self, writer: &mut Writer) {
        writer.u32(MAGIC);
        writer.u32(self.version);
    }
}
