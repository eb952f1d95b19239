//! Reading and writing state files on disk.  This is the only
//! blocking I/O in the crate.
use std::fs;
use std::path::Path;

use tracing::{event, Level};

use base::prelude::*;

use super::error::CodecError;
use super::model::StateFile;

pub fn read_state_file<P: AsRef<Path>>(
    path: P,
    mode: &PrecisionMode,
) -> Result<StateFile, CodecError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    event!(
        Level::DEBUG,
        "read {} bytes from {}",
        bytes.len(),
        path.display()
    );
    StateFile::decode(&bytes, mode)
}

/// Writes `state` to `path` in the current format, replacing any
/// existing file.  Nothing is written if the state cannot be encoded.
pub fn write_state_file<P: AsRef<Path>>(path: P, state: &StateFile) -> Result<(), CodecError> {
    let path = path.as_ref();
    let bytes = state.encode()?;
    fs::write(path, &bytes)?;
    event!(
        Level::DEBUG,
        "wrote {} bytes to {}",
        bytes.len(),
        path.display()
    );
    Ok(())
}
