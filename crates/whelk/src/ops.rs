//! Filesystem and process-info primitives.
//!
//! Every operation takes the working directory explicitly and returns a
//! structured result; rendering to user-facing text happens at the execute
//! boundary in [`Shell`](crate::Shell). Relative paths resolve against the
//! given directory, so nothing here touches the process-wide working
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ShellError;

/// Resolve `path` against `cwd` unless it is already absolute.
fn resolve(cwd: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        cwd.join(p)
    }
}

/// List the names of the entries in `cwd`, sorted for stable output.
pub fn list_entries(cwd: &Path) -> Result<Vec<String>, ShellError> {
    let read = fs::read_dir(cwd).map_err(|e| ShellError::from_io(e, &cwd.display().to_string()))?;
    let mut names = Vec::new();
    for entry in read {
        let entry = entry.map_err(ShellError::Io)?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

/// Validate `target` as a directory and return its canonicalized path.
///
/// The caller's directory is untouched; it should adopt the returned path
/// only on success.
pub fn change_dir(cwd: &Path, target: &str) -> Result<PathBuf, ShellError> {
    let path = resolve(cwd, target);
    if !path.exists() {
        return Err(ShellError::NotFound(target.to_string()));
    }
    if !path.is_dir() {
        return Err(ShellError::InvalidArgument(format!(
            "not a directory: {target}"
        )));
    }
    fs::canonicalize(&path).map_err(|e| ShellError::from_io(e, target))
}

/// Create a single directory named `name`. No partial work on failure.
pub fn make_dir(cwd: &Path, name: &str) -> Result<(), ShellError> {
    let path = resolve(cwd, name);
    fs::create_dir(&path).map_err(|e| ShellError::from_io(e, name))
}

/// Remove `target`: directories recursively, files singly.
pub fn remove(cwd: &Path, target: &str) -> Result<(), ShellError> {
    let path = resolve(cwd, target);
    if path.is_dir() {
        fs::remove_dir_all(&path).map_err(|e| ShellError::from_io(e, target))
    } else {
        fs::remove_file(&path).map_err(|e| ShellError::from_io(e, target))
    }
}

/// Relocate `source` to `dest/<basename(source)>`.
///
/// Both paths must already exist; otherwise nothing is touched and
/// [`ShellError::NotFound`] is returned.
pub fn move_into(cwd: &Path, source: &str, dest: &str) -> Result<PathBuf, ShellError> {
    let from = resolve(cwd, source);
    let to_dir = resolve(cwd, dest);
    if !from.exists() || !to_dir.exists() {
        return Err(ShellError::NotFound(format!("{source} or {dest}")));
    }
    let file_name = from
        .file_name()
        .ok_or_else(|| ShellError::InvalidArgument(format!("cannot move {source}")))?;
    let to = to_dir.join(file_name);
    fs::rename(&from, &to).map_err(|e| ShellError::from_io(e, source))?;
    Ok(to)
}

/// Sample instantaneous CPU utilization as a percentage.
///
/// sysinfo needs two refreshes separated by its minimum update interval
/// before the delta is meaningful, so this blocks for that long.
pub fn cpu_usage() -> f32 {
    let mut sys = sysinfo::System::new();
    sys.refresh_cpu_usage();
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    sys.refresh_cpu_usage();
    sys.global_cpu_usage()
}

/// Sample memory utilization: percent of total in use, and used megabytes.
pub fn memory_usage() -> (f64, f64) {
    let mut sys = sysinfo::System::new();
    sys.refresh_memory();
    let total = sys.total_memory() as f64;
    let used = sys.used_memory() as f64;
    let percent = if total > 0.0 { used / total * 100.0 } else { 0.0 };
    (percent, used / (1024.0 * 1024.0))
}
