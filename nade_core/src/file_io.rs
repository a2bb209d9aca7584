// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use crate::error::NadeError;
use crate::template::Template;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write as _};
use std::path::Path;

/// Lists the name of every entry in `dir`, sorted by name.
///
/// Nothing is filtered out: subdirectories and hidden files are returned too,
/// so they fail later as malformed filenames.
pub fn list_image_names(dir: &Path) -> Result<Vec<String>, NadeError> {
    let entries = fs::read_dir(dir).map_err(|e| NadeError::io(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| NadeError::io(dir, e))?;
        let name = entry.file_name().into_string().map_err(|name| {
            NadeError::io(
                entry.path(),
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("file name {name:?} is not valid UTF-8"),
                ),
            )
        })?;
        names.push(name);
    }
    names.sort();
    Ok(names)
}

/// Reads and parses a page template.
pub fn load_template(path: &Path) -> Result<Template, NadeError> {
    let source = fs::read_to_string(path).map_err(|e| NadeError::io(path, e))?;
    Template::parse(&path.display().to_string(), &source)
}

/// Creates (or truncates) `path` and writes `contents` to it.
///
/// The file handle is flushed and closed before returning, on success or failure.
pub fn write_output(path: &Path, contents: &str) -> Result<(), NadeError> {
    let file = File::create(path).map_err(|e| NadeError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| NadeError::io(path, e))
}
