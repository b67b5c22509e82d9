use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions treated as documents that may carry front matter
const DOCUMENT_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "mkd", "mkdn"];

pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            DOCUMENT_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Expand `paths`: files are kept as given, directories are walked for markdown files
pub fn resolve_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && is_markdown(e.path()))
                .map(|e| e.into_path())
                .collect();
            found.sort();
            files.extend(found);
        }
    }
    files
}
