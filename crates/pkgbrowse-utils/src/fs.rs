use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
    time::Duration,
};

use crate::error::{FileSystemError, FileSystemResult};

/// Writes `content` to `path` through a sibling `.part` file and a rename, so
/// readers never observe a half-written file. Missing parent directories are created.
pub fn write_atomic<P: AsRef<Path>>(path: P, content: &[u8]) -> FileSystemResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                FileSystemError::Directory {
                    path: parent.to_path_buf(),
                    action: "create",
                    source: err,
                }
            })?;
        }
    }

    let tmp_path = path.with_extension("part");
    let file = File::create(&tmp_path).map_err(|err| {
        FileSystemError::File {
            path: tmp_path.clone(),
            action: "create",
            source: err,
        }
    })?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(content)
        .and_then(|_| writer.flush())
        .map_err(|err| {
            FileSystemError::File {
                path: tmp_path.clone(),
                action: "write",
                source: err,
            }
        })?;

    fs::rename(&tmp_path, path).map_err(|err| {
        FileSystemError::File {
            path: path.to_path_buf(),
            action: "replace",
            source: err,
        }
    })
}

/// Returns how long ago `path` was last modified, or `None` if the file does not
/// exist or its timestamp cannot be read.
pub fn modified_elapsed<P: AsRef<Path>>(path: P) -> Option<Duration> {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|modified| modified.elapsed().ok())
}
