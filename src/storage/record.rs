use std::{
    ffi::OsStr,
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use walkdir::WalkDir;

/// Errors reading or writing a single YAML record file.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The file could not be read or written.
    #[error("{}: {source}", .path.display())]
    Io {
        /// The record file.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// The file is not a valid record.
    #[error("{}: {source}", .path.display())]
    Yaml {
        /// The record file.
        path: PathBuf,
        /// The underlying error.
        source: serde_yaml::Error,
    },
}

impl RecordError {
    /// The file the error concerns.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Yaml { path, .. } => path,
        }
    }
}

/// Read one record from a YAML file.
pub fn read<T: DeserializeOwned>(path: &Path) -> Result<T, RecordError> {
    let file = File::open(path).map_err(|source| RecordError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_reader(BufReader::new(file)).map_err(|source| RecordError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Write one record to a YAML file, creating parent directories as needed.
///
/// The record is written to a sibling `.tmp` file and renamed over `path`, so
/// a failed write leaves the previous record in place.
pub fn write<T: Serialize>(path: &Path, record: &T) -> Result<(), RecordError> {
    let io_error = |source| RecordError::Io {
        path: path.to_path_buf(),
        source,
    };

    let content = serde_yaml::to_string(record).map_err(|source| RecordError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }

    let staging = staging_path(path);
    let staged = File::create(&staging).and_then(|file| {
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        writer.get_ref().sync_all()
    });
    if let Err(source) = staged.and_then(|()| std::fs::rename(&staging, path)) {
        let _ = std::fs::remove_file(&staging);
        return Err(io_error(source));
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// All `.yaml`/`.yml` files below `dir`, in a stable order.
///
/// A missing directory yields nothing.
pub fn collect_yaml_paths(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            matches!(
                entry.path().extension().and_then(OsStr::to_str),
                Some("yaml" | "yml")
            )
        })
        .map(walkdir::DirEntry::into_path)
        .collect();
    paths.sort();
    paths
}
