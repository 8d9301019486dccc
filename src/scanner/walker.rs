//! File collection: enumerate the scannable text files under a skill root.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// One scanned file, constructed during collection and consumed by the
/// matcher.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    /// Path relative to the skill root, `/`-separated.
    pub relative_path: String,
    pub content: String,
    pub size: u64,
}

/// Directories never descended into.
const SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".svn",
    "__pycache__",
    ".tox",
    ".mypy_cache",
    ".pytest_cache",
    "dist",
    "build",
    ".next",
    "venv",
    ".venv",
    "env",
];

/// Files larger than this are skipped.
const MAX_FILE_SIZE: u64 = 1024 * 1024;

const SCANNABLE_EXTENSIONS: &[&str] = &[
    ".js", ".ts", ".mjs", ".cjs", ".py", ".rb", ".sh", ".bash", ".json", ".yaml", ".yml", ".md",
    ".txt", ".env", ".cfg", ".conf", ".ini", ".toml",
];

/// Collect every eligible file reachable from `root`.
///
/// The walk skips the fixed directory skip-set and dot-directories (the root
/// itself is exempt), admits files by extension allow-list and size cap, and
/// reads them as UTF-8. Unreadable files and directories are skipped, never
/// fatal: traversal errors degrade scan coverage, they do not abort the run.
/// Siblings are ordered files-first then by name, so the result is
/// deterministic for a fixed tree.
pub fn walk_directory(root: &Path) -> Vec<FileEntry> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by(|a, b| {
            a.file_type()
                .is_dir()
                .cmp(&b.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        })
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !SKIP_DIRS.contains(&name.as_ref()) && !name.starts_with('.')
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if entry.depth() == 0 || !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        let Some(ext) = scannable_extension(&name) else {
            continue;
        };
        if !SCANNABLE_EXTENSIONS.contains(&ext.as_str()) {
            continue;
        }

        let size = match entry.metadata() {
            Ok(meta) => meta.len(),
            Err(e) => {
                tracing::debug!(path = %entry.path().display(), error = %e, "stat failed");
                continue;
            }
        };
        if size > MAX_FILE_SIZE {
            tracing::debug!(path = %entry.path().display(), size, "file over size cap");
            continue;
        }

        let content = match std::fs::read_to_string(entry.path()) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %entry.path().display(), error = %e, "read failed");
                continue;
            }
        };

        let relative_path = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");

        files.push(FileEntry {
            path: entry.path().to_path_buf(),
            relative_path,
            content,
            size,
        });
    }

    files
}

/// The effective extension used against the allow-list. `.env` and
/// `.env.*` names count as extension `.env`; everything else is the
/// lowercased text from the last dot.
fn scannable_extension(filename: &str) -> Option<String> {
    if filename == ".env" || filename.starts_with(".env.") {
        return Some(".env".into());
    }
    let dot = filename.rfind('.')?;
    Some(filename[dot..].to_ascii_lowercase())
}
