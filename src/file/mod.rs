//! Class file access and low-level binary reading.
//!
//! This module abstracts over the places class bytes come from (files on disk, memory
//! buffers) and provides the cursor-based [`crate::file::parser::Parser`] used by the class
//! file reader and the signature decoder.
//!
//! # Key Components
//!
//! ## Core Types
//! - [`crate::file::File`] - Loaded class data, independent of its source
//! - [`crate::file::Backend`] - Trait for different data sources (disk files, memory buffers)
//!
//! ## Parsing Infrastructure
//! - [`crate::file::parser::Parser`] - Bounds-checked cursor over a byte slice
//! - [`crate::file::io`] - Endian-aware primitive reads
//!
//! ## Backend Implementations
//! - [`crate::file::physical::Physical`] - Memory-mapped file backend for disk access
//! - [`crate::file::memory::Memory`] - In-memory buffer backend
//!
//! # Examples
//!
//! ```rust,no_run
//! use jvmscope::File;
//! use std::path::Path;
//!
//! let file = File::from_file(Path::new("target/classes/com/example/Widget.class"))?;
//! println!("Loaded {} bytes", file.len());
//! # Ok::<(), jvmscope::Error>(())
//! ```

pub mod io;
mod memory;
pub mod parser;
mod physical;

use std::path::{Path, PathBuf};

use memory::Memory;
use physical::Physical;

use crate::{Error::Empty, Result};

/// Backend trait for file data sources.
///
/// This trait abstracts over different data sources (files on disk, memory buffers)
/// so the class file reader works the same way on either. Bounds checking happens in the
/// [`crate::file::parser::Parser`] reading the bytes.
pub trait Backend: Send + Sync {
    /// Returns the entire data buffer.
    fn data(&self) -> &[u8];

    /// Returns the total length of the data buffer.
    fn len(&self) -> usize {
        self.data().len()
    }
}

/// Raw class data loaded from disk or memory.
///
/// `File` owns the bytes of exactly one class file. It does not interpret them; see
/// [`crate::ClassFile`] for that.
pub struct File {
    /// The underlying data source (memory or file).
    data: Box<dyn Backend>,
    /// Where the data was loaded from, if it came from disk.
    path: Option<PathBuf>,
}

impl File {
    /// Loads a class file from the given path.
    ///
    /// The file is memory-mapped instead of read into a buffer.
    ///
    /// # Arguments
    ///
    /// * `file` - Path to the `.class` file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileError`] if the file cannot be opened and
    /// [`crate::Error::Empty`] if it has no content.
    pub fn from_file(file: &Path) -> Result<File> {
        let input = Physical::new(file)?;

        let mut loaded = Self::load(input)?;
        loaded.path = Some(file.to_path_buf());
        Ok(loaded)
    }

    /// Loads a class file from a memory buffer.
    ///
    /// # Arguments
    ///
    /// * `data` - The bytes of the class file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Empty`] if the buffer is empty.
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        let input = Memory::new(data);

        Self::load(input)
    }

    fn load<T: Backend + 'static>(data: T) -> Result<File> {
        if data.len() == 0 {
            return Err(Empty);
        }

        Ok(File {
            data: Box::new(data),
            path: None,
        })
    }

    /// Returns the total size of the loaded data.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if no data is loaded. Never true for a successfully loaded file.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.len() == 0
    }

    /// Returns the complete data buffer.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.data()
    }

    /// The path this file was loaded from, `None` for memory buffers.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
