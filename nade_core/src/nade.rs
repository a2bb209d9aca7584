// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use crate::error::NadeError;
use crate::types::{Map, Side, ThrowModifier, Vocabulary as _};
use serde::Serialize;

/// Number of `_` separated fields in a filename stem:
/// `<map>_<side>_<mod>[-<mod>...]_<name>_<index>`.
pub const FILENAME_FIELDS: usize = 5;

/// Metadata decoded from a single image filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNade {
    pub map: Map,
    pub side: Side,
    pub throw_mods: Vec<ThrowModifier>,
    /// Display name, with the filename's hyphens turned into spaces.
    pub name: String,
    /// The original filename, extension included.
    pub image: String,
}

impl ParsedNade {
    /// Parses a filename such as `mirage_ct_lc-jump_window_1.jpg`.
    ///
    /// The trailing index field only keeps filenames unique on disk and is discarded.
    pub fn parse_filename(filename: &str) -> Result<Self, NadeError> {
        let fields: Vec<&str> = file_stem(filename).split('_').collect();
        let [map, side, throw_mods, name, _index] = fields[..] else {
            return Err(NadeError::MalformedFilename {
                filename: filename.to_owned(),
                fields: fields.len(),
            });
        };

        log::info!("{filename}");

        Ok(Self {
            map: Map::from_token(map)?,
            side: Side::from_token(side)?,
            throw_mods: parse_throw_mods(throw_mods)?,
            name: name.replace('-', " "),
            image: filename.to_owned(),
        })
    }
}

/// One catalog entry: every image sharing a map, side and display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Nade {
    pub map: Map,
    pub side: Side,
    /// Modifiers of the first image seen for this entry.
    pub throw_mods: Vec<ThrowModifier>,
    pub name: String,
    pub images: Vec<String>,
}

impl From<ParsedNade> for Nade {
    fn from(parsed: ParsedNade) -> Self {
        Self {
            map: parsed.map,
            side: parsed.side,
            throw_mods: parsed.throw_mods,
            name: parsed.name,
            images: vec![parsed.image],
        }
    }
}

/// Strips everything from the last `.` onwards.
fn file_stem(filename: &str) -> &str {
    filename
        .rsplit_once('.')
        .map_or(filename, |(stem, _extension)| stem)
}

/// Splits `lc-jump` style modifier lists, keeping their order.
fn parse_throw_mods(field: &str) -> Result<Vec<ThrowModifier>, NadeError> {
    field.split('-').map(ThrowModifier::from_token).collect()
}
