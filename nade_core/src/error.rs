// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use crate::types::VocabularyKind;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every way a site build can fail. Any of these aborts the run.
#[derive(Debug, Error)]
pub enum NadeError {
    /// Reading the image directory or template, or writing the output, failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The filename stem did not split into exactly five `_` separated fields.
    #[error("invalid filename (expected 5 '_' separated fields, found {fields}): {filename}")]
    MalformedFilename { filename: String, fields: usize },
    /// A map, side or throw modifier token is not part of the vocabulary.
    #[error("unknown {kind}: '{token}'")]
    UnknownToken { kind: VocabularyKind, token: String },
    /// The page template failed to parse or to render.
    #[error("template {name}: {message}")]
    Template { name: String, message: String },
}

impl NadeError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn template(name: &str, message: impl Into<String>) -> Self {
        Self::Template {
            name: name.to_owned(),
            message: message.into(),
        }
    }
}
