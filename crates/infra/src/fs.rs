//! Small file helpers shared by the stores and logs.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::{InfraError, InfraResult};

/// Replace `path` with `content` via a sibling temp file and a rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> InfraResult<()> {
    ensure_parent(path)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    std::fs::write(tmp, content).map_err(|e| InfraError::io(tmp, e))?;
    std::fs::rename(tmp, path).map_err(|e| InfraError::io(path, e))?;
    Ok(())
}

pub fn append(path: &Path, content: &str) -> InfraResult<()> {
    ensure_parent(path)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| InfraError::io(path, e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| InfraError::io(path, e))
}

/// Read a whole file; a missing file reads as `None`.
pub fn read_optional(path: &Path) -> InfraResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(InfraError::io(path, e)),
    }
}

fn ensure_parent(path: &Path) -> InfraResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| InfraError::io(parent, e))?;
    }
    Ok(())
}
