// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Builds a static catalog page of grenade throw guides from a directory of
//! images whose filenames encode the map, side, throw technique and name.
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod file_io;
pub mod nade;
pub mod template;
pub mod types;
