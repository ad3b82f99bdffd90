//! Filesystem validation source.
//!
//! Discovers files on disk and reads them safely for the validation pipeline:
//! - Symlinks are not followed by default (`follow_links: false`)
//! - Resolved paths are checked to remain within the scan root
//! - Device files, pipes, and sockets are skipped
//! - Maximum directory depth is enforced
//! - Reads are bounded by `max_file_size`

use std::io::Read;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::FsSourceConfig;
use crate::error::{ScanError, ScanErrorKind};
use crate::strategy::ContentFormat;

/// Directories to skip
pub const SKIP_DIRS: &[&str] = &["target", "node_modules", ".git", "vendor"];

/// Result of attempting to read a file for scanning.
pub enum ScanResult {
    /// File was read successfully; contains the UTF-8 content.
    Ok(String),
    /// File could not be read or validated; contains the scan error.
    Err(ScanError),
}

/// Check if a path matches any of the exclude patterns
fn matches_exclude(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    exclude_patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    })
}

/// Returns `true` if the entry should be **included** (i.e., is NOT a skip dir).
fn is_not_skip_dir(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() > 0
        && entry.file_type().is_dir()
        && let Some(name) = entry.file_name().to_str()
    {
        return !SKIP_DIRS.contains(&name);
    }
    true
}

#[cfg(unix)]
fn is_special_file(entry: &walkdir::DirEntry) -> bool {
    use std::os::unix::fs::FileTypeExt;
    entry.metadata().map(|m| m.file_type()).is_ok_and(|ft| {
        ft.is_block_device() || ft.is_char_device() || ft.is_fifo() || ft.is_socket()
    })
}

#[cfg(not(unix))]
fn is_special_file(_entry: &walkdir::DirEntry) -> bool {
    false
}

/// Determine the content format from a file extension.
pub fn content_format_for(path: &Path) -> Option<ContentFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("txt" | "lst") => Some(ContentFormat::Text),
        Some("csv") => Some(ContentFormat::Csv),
        Some("json") => Some(ContentFormat::Json),
        _ => None,
    }
}

/// Find all files to scan in the given paths.
///
/// Returns `(files, scan_errors)`:
/// - `files`: paths that passed all filters and are ready to read.
/// - `scan_errors`: walk errors, boundary violations and bad exclude patterns.
pub fn find_files(config: &FsSourceConfig) -> (Vec<PathBuf>, Vec<ScanError>) {
    let mut files = Vec::new();
    let mut scan_errors = Vec::new();

    let mut exclude_patterns = Vec::with_capacity(config.exclude.len());
    for pat_str in &config.exclude {
        match Pattern::new(pat_str) {
            Ok(pat) => exclude_patterns.push(pat),
            Err(e) => scan_errors.push(ScanError {
                file: PathBuf::from(pat_str),
                kind: ScanErrorKind::InvalidExcludePattern,
                message: format!("Invalid exclude glob pattern '{pat_str}': {e}"),
            }),
        }
    }

    for root in &config.paths {
        let canonical_root = match root.canonicalize() {
            Ok(r) => r,
            Err(e) => {
                scan_errors.push(ScanError {
                    file: root.clone(),
                    kind: ScanErrorKind::IoError,
                    message: format!("Failed to canonicalize root path: {e}"),
                });
                continue;
            }
        };

        if root.is_file() {
            if content_format_for(root).is_some() && !matches_exclude(root, &exclude_patterns) {
                files.push(root.clone());
            }
            continue;
        }

        if !root.is_dir() {
            continue;
        }

        debug!(root = %root.display(), "walking directory");

        for entry_result in WalkDir::new(root)
            .follow_links(config.follow_links)
            .max_depth(config.max_depth)
            .into_iter()
            .filter_entry(is_not_skip_dir)
        {
            let entry = match entry_result {
                Ok(e) => e,
                Err(walk_err) => {
                    let path = walk_err
                        .path()
                        .map_or_else(|| root.clone(), Path::to_path_buf);
                    scan_errors.push(ScanError {
                        file: path,
                        kind: ScanErrorKind::WalkError,
                        message: format!("Directory traversal error: {walk_err}"),
                    });
                    continue;
                }
            };

            let file_path = entry.path();

            if !file_path.is_file() || is_special_file(&entry) {
                continue;
            }

            // Boundary check catches symlink escapes even when follow_links is on.
            match file_path.canonicalize() {
                Ok(canonical_path) if !canonical_path.starts_with(&canonical_root) => {
                    scan_errors.push(ScanError {
                        file: file_path.to_path_buf(),
                        kind: ScanErrorKind::OutsideRoot,
                        message: format!(
                            "Path resolves outside scan root: {} -> {}",
                            file_path.display(),
                            canonical_path.display()
                        ),
                    });
                    continue;
                }
                Ok(_) => {}
                Err(e) => {
                    scan_errors.push(ScanError {
                        file: file_path.to_path_buf(),
                        kind: ScanErrorKind::IoError,
                        message: format!("Failed to canonicalize path: {e}"),
                    });
                    continue;
                }
            }

            if content_format_for(file_path).is_none()
                || matches_exclude(file_path, &exclude_patterns)
            {
                continue;
            }

            files.push(file_path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    (files, scan_errors)
}

/// Read a file with a bounded read, enforcing `max_file_size`.
///
/// Reads at most `max_file_size + 1` bytes so that the size check and the
/// read are the same operation. Failures are returned, never dropped.
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> ScanResult {
    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) => {
            return ScanResult::Err(ScanError {
                file: path.to_owned(),
                kind: ScanErrorKind::IoError,
                message: format!("Failed to open file: {e}"),
            });
        }
    };

    let mut buffer = Vec::new();
    if let Err(e) = file.take(max_file_size + 1).read_to_end(&mut buffer) {
        return ScanResult::Err(ScanError {
            file: path.to_owned(),
            kind: ScanErrorKind::IoError,
            message: format!("Failed to read file: {e}"),
        });
    }

    if buffer.len() as u64 > max_file_size {
        return ScanResult::Err(ScanError {
            file: path.to_owned(),
            kind: ScanErrorKind::FileTooLarge,
            message: format!("File exceeds maximum size of {max_file_size} bytes"),
        });
    }

    match String::from_utf8(buffer) {
        Ok(content) => ScanResult::Ok(content),
        Err(_) => ScanResult::Err(ScanError {
            file: path.to_owned(),
            kind: ScanErrorKind::InvalidEncoding,
            message: "File is not valid UTF-8".to_owned(),
        }),
    }
}
