use crate::error::HandoffError;
use std::{fs, io::ErrorKind, path::Path};
use tracing::debug;

/// Read the whole SQL file; a missing file is reported with its path.
pub fn read_sql_file(path: &Path) -> Result<String, HandoffError> {
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => HandoffError::SqlFileNotFound {
            path: path.to_path_buf(),
        },
        _ => HandoffError::Io(e),
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "read SQL file");
    Ok(contents)
}
