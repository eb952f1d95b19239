//! Which fields are present in which version of the state file.
//!
//! Every revision of the format added or removed a field.  Rather
//! than keep a decoder per version, the reader asks a [`Layout`]
//! whether each field is present, and the answer comes from the
//! single table [`PRESENCE`] below.  Fields absent from a file take
//! their legacy default (off, for all of the option flags).
use std::fmt::{self, Display, Formatter};

use super::error::CodecError;
use super::header::CURRENT_VERSION;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The "IP Hack" option flag.  Read and discarded.
    IpHack,
    SingularMatrix,
    MatrixOutOfRange,
    /// Whether printing is deferred; affects how NORM and TRACE
    /// printing behaves.
    DeferredPrint,
    /// The "HP-42S byte counts" option.  Read and discarded.
    Hp42sByteCounts,
    RawText,
    /// A copy of the BCD-to-binary conversion table.  Skipped.
    BcdTable,
    /// The state of a GETKEY in progress when the calculator was
    /// switched off.
    Getkey,
    /// Matrices are stored once and referred to by index from
    /// variables, instead of inline in each variable.
    SharedMatrices,
    /// Numbers are stored in the decimal record format rather than as
    /// binary doubles.
    DecimalNumbers,
    /// Command codes in programs and key assignments take two bytes
    /// (the reference hardware's catalog numbering) rather than one.
    WideCommandCodes,
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            Field::IpHack => "IP Hack flag",
            Field::SingularMatrix => "singular matrix flag",
            Field::MatrixOutOfRange => "matrix out of range flag",
            Field::DeferredPrint => "deferred print flag",
            Field::Hp42sByteCounts => "HP-42S byte counts flag",
            Field::RawText => "raw text flag",
            Field::BcdTable => "BCD conversion table",
            Field::Getkey => "GETKEY state",
            Field::SharedMatrices => "shared matrices",
            Field::DecimalNumbers => "decimal numbers",
            Field::WideCommandCodes => "two-byte command codes",
        })
    }
}

/// A field is present in versions `since..until`.
#[derive(Debug, Clone, Copy)]
struct Presence {
    field: Field,
    since: u32,
    until: Option<u32>,
}

const fn present(field: Field, since: u32, until: Option<u32>) -> Presence {
    Presence {
        field,
        since,
        until,
    }
}

const PRESENCE: [Presence; 11] = [
    present(Field::Hp42sByteCounts, 0, Some(8)),
    present(Field::BcdTable, 0, Some(4)),
    present(Field::IpHack, 1, Some(9)),
    present(Field::SingularMatrix, 2, None),
    present(Field::MatrixOutOfRange, 2, None),
    present(Field::DeferredPrint, 3, None),
    present(Field::RawText, 5, None),
    present(Field::Getkey, 6, None),
    present(Field::WideCommandCodes, 7, None),
    present(Field::DecimalNumbers, 9, None),
    present(Field::SharedMatrices, 10, None),
];

/// The set of fields present in one version of the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    version: u32,
}

impl Layout {
    pub const CURRENT: Layout = Layout {
        version: CURRENT_VERSION,
    };

    pub fn for_version(version: u32) -> Result<Layout, CodecError> {
        if version > CURRENT_VERSION {
            Err(CodecError::UnsupportedVersion { version })
        } else {
            Ok(Layout { version })
        }
    }

    pub const fn version(&self) -> u32 {
        self.version
    }

    pub fn has(&self, field: Field) -> bool {
        PRESENCE.iter().any(|p| {
            p.field == field
                && p.since <= self.version
                && p.until.map_or(true, |until| self.version < until)
        })
    }

    /// Fields which this version has but the current version does
    /// not, or the reverse.  These are the migration steps taken when
    /// a file of this version is loaded.
    pub fn differences(&self) -> impl Iterator<Item = (Field, bool)> + '_ {
        PRESENCE.iter().filter_map(move |p| {
            let ours = self.has(p.field);
            if ours == Layout::CURRENT.has(p.field) {
                None
            } else {
                Some((p.field, ours))
            }
        })
    }
}
