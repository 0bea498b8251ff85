//! File I/O primitives with consistent error handling.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Read file contents, surfacing failures as `Error::Io` naming the path.
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::Io {
        context: format!("read {}", path.display()),
        source: e,
    })
}
