// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! The closed vocabularies encoded in nade image filenames.
use crate::error::NadeError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{EnumMessage, IntoEnumIterator};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

/// Which vocabulary a token was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum VocabularyKind {
    #[strum(to_string = "map")]
    Map,
    #[strum(to_string = "side")]
    Side,
    #[strum(to_string = "throw modifier")]
    ThrowModifier,
}

/// A closed set of lowercase tokens with exact, case-sensitive lookup.
///
/// The declaration order of the implementing enum is the canonical order
/// used wherever the full list is shown.
pub trait Vocabulary:
    Copy + FromStr + IntoEnumIterator + EnumMessage + Into<&'static str>
{
    const KIND: VocabularyKind;

    fn from_token(token: &str) -> Result<Self, NadeError> {
        token.parse().map_err(|_unknown| NadeError::UnknownToken {
            kind: Self::KIND,
            token: token.to_owned(),
        })
    }

    fn token(self) -> &'static str {
        self.into()
    }

    /// Human readable name, falling back to the token.
    fn label(self) -> &'static str {
        self.get_message().unwrap_or_else(|| self.token())
    }

    fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    EnumMessage,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Map {
    #[strum(message = "Inferno")]
    Inferno,
    #[strum(message = "Dust II")]
    Dust2,
    #[strum(message = "Ancient")]
    Ancient,
    #[strum(message = "Mirage")]
    Mirage,
    #[strum(message = "Train")]
    Train,
    #[strum(message = "Nuke")]
    Nuke,
    #[strum(message = "Overpass")]
    Overpass,
}

impl Vocabulary for Map {
    const KIND: VocabularyKind = VocabularyKind::Map;
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    EnumMessage,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[strum(message = "Terrorist")]
    T,
    #[strum(message = "Counter-Terrorist")]
    Ct,
}

impl Vocabulary for Side {
    const KIND: VocabularyKind = VocabularyKind::Side;
}

/// An input technique used while releasing the grenade.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    EnumMessage,
    Serialize,
    Deserialize,
)]
pub enum ThrowModifier {
    #[strum(serialize = "regular", message = "Regular throw")]
    #[serde(rename = "regular")]
    Regular,
    #[strum(serialize = "lc", message = "Left click")]
    #[serde(rename = "lc")]
    LeftClick,
    #[strum(serialize = "rc", message = "Right click")]
    #[serde(rename = "rc")]
    RightClick,
    #[strum(serialize = "w", message = "Hold W")]
    #[serde(rename = "w")]
    W,
    #[strum(serialize = "a", message = "Hold A")]
    #[serde(rename = "a")]
    A,
    #[strum(serialize = "d", message = "Hold D")]
    #[serde(rename = "d")]
    D,
    #[strum(serialize = "shift", message = "Shift walk")]
    #[serde(rename = "shift")]
    Shift,
    #[strum(serialize = "jump", message = "Jump throw")]
    #[serde(rename = "jump")]
    Jump,
}

impl Vocabulary for ThrowModifier {
    const KIND: VocabularyKind = VocabularyKind::ThrowModifier;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_lookup_valid() {
        assert_eq!(Map::from_token("inferno").unwrap(), Map::Inferno);
        assert_eq!(Map::from_token("dust2").unwrap(), Map::Dust2);
        assert_eq!(Map::from_token("overpass").unwrap(), Map::Overpass);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(Map::from_token("Dust2").is_err());
        assert!(Side::from_token("CT").is_err());
        assert!(ThrowModifier::from_token("Jump").is_err());
    }

    #[test]
    fn test_lookup_unknown_reports_kind_and_token() {
        match ThrowModifier::from_token("badtoken") {
            Err(NadeError::UnknownToken { kind, token }) => {
                assert_eq!(kind, VocabularyKind::ThrowModifier);
                assert_eq!(token, "badtoken");
            }
            other => panic!("expected UnknownToken, got {other:?}"),
        }
        assert!(Side::from_token("").is_err());
    }

    #[test]
    fn test_throw_modifier_tokens() {
        let tokens: Vec<&str> = ThrowModifier::all()
            .into_iter()
            .map(Vocabulary::token)
            .collect();
        assert_eq!(
            tokens,
            ["regular", "lc", "rc", "w", "a", "d", "shift", "jump"]
        );
        assert_eq!(ThrowModifier::from_token("lc").unwrap(), ThrowModifier::LeftClick);
        assert_eq!(ThrowModifier::from_token("rc").unwrap(), ThrowModifier::RightClick);
    }

    #[test]
    fn test_canonical_order() {
        let maps: Vec<&str> = Map::all().into_iter().map(Vocabulary::token).collect();
        assert_eq!(
            maps,
            ["inferno", "dust2", "ancient", "mirage", "train", "nuke", "overpass"]
        );
        assert_eq!(Side::all(), vec![Side::T, Side::Ct]);
    }

    #[test]
    fn test_display_and_serde_match_token() {
        assert_eq!(Map::Dust2.to_string(), "dust2");
        assert_eq!(Side::Ct.to_string(), "ct");
        assert_eq!(ThrowModifier::LeftClick.to_string(), "lc");
        assert_eq!(serde_json::to_string(&Map::Dust2).unwrap(), "\"dust2\"");
        assert_eq!(serde_json::to_string(&Side::Ct).unwrap(), "\"ct\"");
        assert_eq!(
            serde_json::to_string(&ThrowModifier::Shift).unwrap(),
            "\"shift\""
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(Map::Dust2.label(), "Dust II");
        assert_eq!(Side::Ct.label(), "Counter-Terrorist");
        assert_eq!(ThrowModifier::Jump.label(), "Jump throw");
    }
}
