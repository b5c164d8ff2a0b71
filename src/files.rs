//! Filesystem access: directory listing, loading and saving sequence files.

use crate::parser::{ParseError, SequenceParser};
use crate::sequence::Sequence;
use crate::writer::write_sequence;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// A directory entry that may hold a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName {
    /// Directory the entry was found in.
    pub path: PathBuf,
    /// Entry name within `path`.
    pub name: String,
}

impl FileName {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Full path of the entry.
    pub fn full_path(&self) -> PathBuf {
        self.path.join(&self.name)
    }
}

/// Directory entries in enumeration order, with at most one selected.
#[derive(Debug, Clone, Default)]
pub struct FileList {
    entries: Vec<FileName>,
    selected: Option<usize>,
}

impl FileList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: FileName) {
        self.entries.push(entry);
    }

    /// Removes all entries and clears the selection.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.selected = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[FileName] {
        &self.entries
    }

    /// Selects an entry; `None` clears the selection. Returns `false` if
    /// `index` is out of range, leaving the selection unchanged.
    pub fn select(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(index) if index >= self.entries.len() => false,
            _ => {
                self.selected = index;
                true
            }
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_file(&self) -> Option<&FileName> {
        self.selected.and_then(|index| self.entries.get(index))
    }
}

/// Errors from filesystem operations.
#[derive(Debug)]
pub enum LoadError {
    /// The file or directory could not be opened, read or written.
    Io { path: PathBuf, source: io::Error },
    /// The file was read but is not a well-formed sequence.
    Parse { path: PathBuf, source: ParseError },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Io { path, .. } | LoadError::Parse { path, .. } => path,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
            LoadError::Parse { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Parse { source, .. } => Some(source),
        }
    }
}

/// Lists the entries of `dir`, excluding `.` and `..`.
///
/// Order is whatever the OS returns. Fails as a whole if the directory cannot
/// be opened or an entry cannot be read.
pub fn list_directory(dir: impl AsRef<Path>) -> Result<FileList, LoadError> {
    let dir = dir.as_ref();
    let io_error = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    tracing::info!(path = %dir.display(), "listing directory");
    let mut list = FileList::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name == "." || name == ".." {
            continue;
        }
        tracing::debug!(name = %name, "found file");
        list.add(FileName::new(dir, name));
    }
    tracing::info!(count = list.len(), "directory listed");
    Ok(list)
}

/// Loads and parses the sequence file named by `file`.
///
/// The file name is the short name unless the file provides one. Any read or
/// parse failure discards the partial sequence.
pub fn load_sequence<const N: usize>(file: &FileName) -> Result<Sequence<N>, LoadError> {
    let path = file.full_path();
    tracing::info!(path = %path.display(), "loading sequence");

    let result = read_sequence(&file.name, &path);
    match &result {
        Ok(sequence) => tracing::info!(
            name = sequence.short_name(),
            steps = sequence.step_count(),
            duration = sequence.duration(),
            "sequence loaded"
        ),
        Err(err) => tracing::warn!(error = %err, "failed to load sequence"),
    }
    result
}

fn read_sequence<const N: usize>(name: &str, path: &Path) -> Result<Sequence<N>, LoadError> {
    let io_error = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let reader = BufReader::new(File::open(path).map_err(io_error)?);
    let mut parser = SequenceParser::new(name);
    for line in reader.lines() {
        let line = line.map_err(io_error)?;
        parser.feed_line(&line).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(parser.finish())
}

/// Writes `sequence` to `path` in the sequence file format.
pub fn save_sequence<const N: usize>(path: impl AsRef<Path>, sequence: &Sequence<N>) -> Result<(), LoadError> {
    let path = path.as_ref();
    let io_error = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut text = String::new();
    write_sequence(sequence, &mut text).map_err(|err| io_error(io::Error::other(err)))?;
    std::fs::write(path, text).map_err(io_error)?;
    tracing::info!(path = %path.display(), name = sequence.short_name(), "sequence saved");
    Ok(())
}
