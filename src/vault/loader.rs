//! Reading a directory of notes into a corpus and writing one back out

use std::path::{Component, Path};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use super::VaultError;
use crate::index::Corpus;

/// Read every file under `raw_directory` into a corpus.
///
/// Keys are paths relative to the root joined with `/`, so a note in a
/// sub-directory is keyed `folder/Note.md`. Hidden files and directories
/// are skipped.
pub fn read_markdown_directory(raw_directory: &Path) -> Result<Corpus, VaultError> {
    if !raw_directory.exists() {
        return Err(VaultError::NotFound(raw_directory.to_path_buf()));
    }
    if !raw_directory.is_dir() {
        return Err(VaultError::NotADirectory(raw_directory.to_path_buf()));
    }

    let mut contents = Corpus::new();

    let walker = WalkDir::new(raw_directory)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = entry.map_err(|source| VaultError::Walk {
            path: raw_directory.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file_path = entry.path();
        let relative_path = file_path.strip_prefix(raw_directory).unwrap_or(file_path);
        let key = note_key(relative_path);

        let bytes = std::fs::read(file_path).map_err(|e| VaultError::io(file_path, e))?;
        let content = String::from_utf8(bytes).map_err(|_| VaultError::NotUtf8 {
            path: file_path.to_path_buf(),
        })?;

        debug!(note = %key, bytes = content.len(), "read note");
        contents.insert(key, content);
    }

    Ok(contents)
}

/// Write each note of `contents` under `directory`, creating parent
/// directories and overwriting existing files.
pub fn save_files(directory: &Path, contents: &Corpus) -> Result<(), VaultError> {
    std::fs::create_dir_all(directory).map_err(|e| VaultError::io(directory, e))?;

    for (key, content) in contents {
        let file_path = directory.join(key);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| VaultError::io(parent, e))?;
        }
        std::fs::write(&file_path, content).map_err(|e| VaultError::io(&file_path, e))?;
    }

    Ok(())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn note_key(relative_path: &Path) -> String {
    relative_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
