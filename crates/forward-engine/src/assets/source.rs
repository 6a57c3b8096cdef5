use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::{Component, Path, PathBuf};

/// A bundle of read-only assets addressed by name.
pub trait AssetSource {
    /// Opens the asset for reading.
    ///
    /// Missing assets fail with `io::ErrorKind::NotFound`.
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + '_>>;
}

/// Reads a whole text asset.
///
/// Every line is terminated with `\n`, whatever the source line endings were,
/// so the result always ends with a newline when non-empty.
pub fn read_text(source: &dyn AssetSource, name: &str) -> io::Result<String> {
    let reader = BufReader::new(source.open(name)?);
    let mut text = String::new();
    for line in reader.lines() {
        text.push_str(&line?);
        text.push('\n');
    }
    Ok(text)
}

/// Assets stored as files below a root directory.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves `name` below the root. Absolute names and names that climb
    /// out of the root are rejected.
    fn resolve(&self, name: &str) -> io::Result<PathBuf> {
        let rel = Path::new(name);
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if name.is_empty() || escapes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid asset name `{name}`"),
            ));
        }
        Ok(self.root.join(rel))
    }
}

impl AssetSource for DirAssets {
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        let path = self.resolve(name)?;
        Ok(Box::new(File::open(path)?))
    }
}

/// In-memory assets, e.g. sources embedded with `include_str!`.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(name.into(), bytes.into());
    }

    pub fn with(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }
}

impl AssetSource for MemoryAssets {
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        match self.entries.get(name) {
            Some(bytes) => Ok(Box::new(Cursor::new(bytes.as_slice()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no asset named `{name}`"),
            )),
        }
    }
}
