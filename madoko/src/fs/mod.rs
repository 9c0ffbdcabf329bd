use std::collections::HashMap;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Component, Path, PathBuf};

/// Read-only view of the file store that include directives resolve against.
pub trait FileSystem {
    fn file_exists(&self, path: &Path) -> bool;

    fn open_text(&self, path: &Path) -> io::Result<Box<dyn BufRead + '_>>;

    /// Read a whole file as lines, without line terminators.
    /// The reader is dropped as soon as the content is buffered.
    fn read_all_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        let reader = self.open_text(path)?;
        reader.lines().collect()
    }
}

/// Supplies the process's current directory, the first search root for
/// relative include paths.
pub trait Environment {
    fn current_dir(&self) -> io::Result<PathBuf>;
}

/// The local disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn open_text(&self, path: &Path) -> io::Result<Box<dyn BufRead + '_>> {
        let file = std::fs::File::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealEnvironment;

impl Environment for RealEnvironment {
    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }
}

/// An in-memory file store keyed by normalized path.
///
/// Relative paths handed to [`MemoryFileSystem::add_file`] are stored as given,
/// so tests normally register absolute paths under the directory reported by a
/// [`StaticEnvironment`].
#[derive(Debug, Default, Clone)]
pub struct MemoryFileSystem {
    files: HashMap<PathBuf, String>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, path: impl AsRef<Path>, contents: impl Into<String>) {
        self.files.insert(normalize(path.as_ref()), contents.into());
    }

    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<String>) -> Self {
        self.add_file(path, contents);
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn file_exists(&self, path: &Path) -> bool {
        self.files.contains_key(&normalize(path))
    }

    fn open_text(&self, path: &Path) -> io::Result<Box<dyn BufRead + '_>> {
        match self.files.get(&normalize(path)) {
            Some(contents) => Ok(Box::new(Cursor::new(contents.as_bytes()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {}", path.display()),
            )),
        }
    }
}

/// An environment whose current directory never changes.
#[derive(Debug, Clone)]
pub struct StaticEnvironment {
    current_dir: PathBuf,
}

impl StaticEnvironment {
    pub fn new(current_dir: impl Into<PathBuf>) -> Self {
        StaticEnvironment {
            current_dir: current_dir.into(),
        }
    }
}

impl Environment for StaticEnvironment {
    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.current_dir.clone())
    }
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding component. Symlinks are not consulted.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
