//! Data directory location and whole-file replacement for CSV caches.

use crate::Result;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Path: ~/.cache/ipl-stats
pub fn default_data_dir() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("ipl-stats")
}

/// Sibling temp path used while a file is being rewritten.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

/// Replace `path` with the CSV produced by `write`.
///
/// The rows go to a sibling temp file that is renamed over `path` once
/// flushed, so readers see either the previous contents or the new ones.
pub fn replace_csv<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut csv::Writer<fs::File>) -> Result<()>,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = temp_path_for(path);
    let written = (|| -> Result<()> {
        let mut wtr = csv::Writer::from_path(&tmp)?;
        write(&mut wtr)?;
        wtr.flush()?;
        Ok(())
    })();
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, path)?;
    Ok(())
}
