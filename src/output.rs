//! Output file naming and writing

use std::fs;
use std::path::{Path, PathBuf};

use crate::theme::Branding;
use crate::ReportError;

/// Extension of generated reports
pub const EXTENSION: &str = "docx";

/// `<prefix>-<user>.docx`. The user name is used verbatim; a name the file
/// system rejects fails later, in [`write_report`].
pub fn file_name(prefix: &str, user: &str) -> String {
    format!("{}-{}.{}", prefix, user, EXTENSION)
}

/// File name for `user` with the default branding
pub fn name_for(user: &str) -> String {
    file_name(&Branding::default().file_prefix, user)
}

/// Write `bytes` to `dir/name`, creating `dir` first. Returns the path
/// written, made absolute when possible.
pub fn write_report(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(dir).map_err(|source| ReportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(name);
    fs::write(&path, bytes).map_err(|source| ReportError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(fs::canonicalize(&path).unwrap_or(path))
}
