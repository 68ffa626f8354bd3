//! Class lookup by qualified name.
//!
//! A [`ClassPath`] is an ordered list of directories. [`ClassRepository`] maps a dotted
//! class name such as `com.example.Widget` to `com/example/Widget.class` below each entry
//! and parses the first match into a [`ClassModel`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use jvmscope::{ClassPath, ClassRepository};
//!
//! let class_path = ClassPath::new().with_entry("build/classes")?;
//! let repository = ClassRepository::new(class_path);
//! let model = repository.lookup("com.example.Widget")?;
//! println!("{} has {} methods", model.class_name, model.methods.len());
//! # Ok::<(), jvmscope::Error>(())
//! ```

use std::{
    env,
    ffi::OsStr,
    path::{Path, PathBuf},
};

use crate::{classfile::ClassFile, model::ClassModel, Error, Result};

/// Environment variable consulted by [`ClassPath::from_env`]
pub const CLASSPATH_ENV: &str = "CLASSPATH";

/// Ordered list of directories searched for class files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassPath {
    entries: Vec<PathBuf>,
}

impl ClassPath {
    /// An empty class path
    #[must_use]
    pub fn new() -> Self {
        ClassPath::default()
    }

    /// Parse a class path string, entries separated by the platform separator (`:` or `;`)
    ///
    /// Empty entries are dropped. Entries are not checked for existence.
    #[must_use]
    pub fn parse<S: AsRef<OsStr> + ?Sized>(value: &S) -> Self {
        ClassPath {
            entries: env::split_paths(value)
                .filter(|entry| !entry.as_os_str().is_empty())
                .collect(),
        }
    }

    /// The class path from `CLASSPATH`, or the current directory if it is unset or empty
    #[must_use]
    pub fn from_env() -> Self {
        let class_path = env::var_os(CLASSPATH_ENV)
            .map(|value| ClassPath::parse(&value))
            .unwrap_or_default();

        if class_path.is_empty() {
            ClassPath {
                entries: vec![PathBuf::from(".")],
            }
        } else {
            class_path
        }
    }

    /// Append a directory
    ///
    /// ## Arguments
    /// * 'path' - The directory to search
    ///
    /// # Errors
    /// Returns [`crate::Error::Error`] if the path does not exist or is not a directory.
    pub fn with_entry<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(Error::Error(format!(
                "Class path entry does not exist or is not a directory: {}",
                path.display()
            )));
        }

        self.entries.push(path.to_path_buf());
        Ok(self)
    }

    /// The entries in search order
    #[must_use]
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Returns `true` if there are no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the class file for a dotted class name
    #[must_use]
    pub fn find(&self, class_name: &str) -> Option<PathBuf> {
        let relative = class_file_path(class_name);
        self.entries.iter().find_map(|entry| {
            let candidate = entry.join(&relative);
            log::trace!("Probing {}", candidate.display());
            candidate.is_file().then_some(candidate)
        })
    }
}

/// `com.example.Widget` -> `com/example/Widget.class`
fn class_file_path(class_name: &str) -> PathBuf {
    let mut path: PathBuf = class_name.split('.').collect();
    path.set_extension("class");
    path
}

/// Resolves classes to [`ClassModel`]s
#[derive(Debug, Clone, Default)]
pub struct ClassRepository {
    class_path: ClassPath,
}

impl ClassRepository {
    /// Create a repository over a class path
    #[must_use]
    pub fn new(class_path: ClassPath) -> Self {
        ClassRepository { class_path }
    }

    /// The class path searched by this repository
    #[must_use]
    pub fn class_path(&self) -> &ClassPath {
        &self.class_path
    }

    /// Look up a class by dotted qualified name
    ///
    /// ## Arguments
    /// * 'class_name' - e.g. `com.example.Widget`
    ///
    /// # Errors
    /// Returns [`crate::Error::ClassNotFound`] if no class path entry contains the class, and
    /// any error of [`ClassFile::from_file`] or [`ClassFile::model`] for a damaged file.
    pub fn lookup(&self, class_name: &str) -> Result<ClassModel> {
        let Some(path) = self.class_path.find(class_name) else {
            return Err(Error::ClassNotFound(class_name.to_string()));
        };

        log::debug!("Resolved {} to {}", class_name, path.display());
        ClassFile::from_file(&path)?.model()
    }

    /// Load a class given either a qualified name or a path to a `.class` file
    ///
    /// The class path is searched first; if the class is not found there, `target` is read
    /// as a file path.
    ///
    /// # Errors
    /// Returns [`crate::Error::ClassNotFound`] if `target` is neither a class on the class
    /// path nor an existing file.
    pub fn load(&self, target: &str) -> Result<ClassModel> {
        match self.lookup(target) {
            Err(Error::ClassNotFound(_)) => {}
            result => return result,
        }

        let path = Path::new(target);
        if !path.is_file() {
            return Err(Error::ClassNotFound(target.to_string()));
        }

        log::debug!("Loading {} as a class file", path.display());
        ClassFile::from_file(path)?.model()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::test::ClassBytes;

    fn write_class(root: &Path, internal_name: &str) -> PathBuf {
        let mut bytes = ClassBytes::new();
        bytes.header(0x0021, internal_name, Some("java/lang/Object"));
        bytes.method(0x0001, "<init>", "()V");

        let path = root.join(format!("{internal_name}.class"));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, bytes.build()).unwrap();
        path
    }

    #[test]
    fn parse_class_path() {
        let joined = env::join_paths(["/a", "", "/b/c"]).unwrap();
        let class_path = ClassPath::parse(&joined);
        assert_eq!(
            class_path.entries(),
            &[PathBuf::from("/a"), PathBuf::from("/b/c")]
        );
        assert!(ClassPath::parse("").is_empty());
    }

    #[test]
    fn relative_class_file_path() {
        assert_eq!(
            class_file_path("com.example.Widget"),
            Path::new("com").join("example").join("Widget.class")
        );
        assert_eq!(class_file_path("Top"), PathBuf::from("Top.class"));
    }

    #[test]
    fn with_entry_requires_directory() {
        assert!(ClassPath::new()
            .with_entry("/definitely/not/a/real/dir")
            .is_err());
    }

    #[test]
    fn lookup_searches_entries_in_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write_class(second.path(), "com/example/Widget");

        let class_path = ClassPath::new()
            .with_entry(first.path())
            .unwrap()
            .with_entry(second.path())
            .unwrap();
        let repository = ClassRepository::new(class_path);

        let model = repository.lookup("com.example.Widget").unwrap();
        assert_eq!(model.class_name, "com.example.Widget");
        assert_eq!(model.methods.len(), 1);
    }

    #[test]
    fn lookup_not_found() {
        let dir = TempDir::new().unwrap();
        let repository = ClassRepository::new(ClassPath::new().with_entry(dir.path()).unwrap());

        match repository.lookup("com.example.Missing") {
            Err(Error::ClassNotFound(name)) => assert_eq!(name, "com.example.Missing"),
            other => panic!("expected ClassNotFound, got {other:?}"),
        }
    }

    #[test]
    fn load_falls_back_to_file_path() {
        let dir = TempDir::new().unwrap();
        let path = write_class(dir.path(), "Standalone");
        let repository = ClassRepository::new(ClassPath::new());

        let model = repository.load(path.to_str().unwrap()).unwrap();
        assert_eq!(model.class_name, "Standalone");

        assert!(matches!(
            repository.load("no.such.Thing"),
            Err(Error::ClassNotFound(_))
        ));
    }
}
