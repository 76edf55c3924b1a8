//! Sprite references and their ordering.
//!
//! Sheets are sliced into named fragments such as `terrain_0`,
//! `terrain_1`, ... The number after the last underscore is the ordering key.
//! Which naming convention applies is up to the caller: any
//! [`KeyExtractor`] can be used to build a [`SpriteSequence`].

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Ordering key of a sprite. `Unordered` sorts before every index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderKey {
    /// The name carries no usable index.
    Unordered,
    /// Index parsed from the name.
    Index(u32),
}

/// Pixel rectangle of a sprite inside its sheet, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SpriteRect {
    /// Creates a new rectangle.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A named fragment of a source sheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteRef {
    /// Fragment name, e.g. `terrain_7`.
    pub name: String,
    /// Location in the source sheet.
    pub rect: SpriteRect,
    /// Ordering key derived from the name.
    pub key: OrderKey,
}

impl SpriteRef {
    /// Creates a sprite, deriving its key with `extractor`.
    pub fn new(name: impl Into<String>, rect: SpriteRect, extractor: &dyn KeyExtractor) -> Self {
        let name = name.into();
        let key = extractor.key(&name);
        Self { name, rect, key }
    }
}

/// Derives an ordering key from a sprite name.
pub trait KeyExtractor {
    /// Returns the ordering key for `name`.
    fn key(&self, name: &str) -> OrderKey;
}

impl<F> KeyExtractor for F
where
    F: Fn(&str) -> OrderKey,
{
    fn key(&self, name: &str) -> OrderKey {
        self(name)
    }
}

/// The `name_<index>` convention: digits after the last underscore.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingIndex;

const TRAILING_INDEX_PATTERN: &str = r"_(\d+)$";

static TRAILING_INDEX_REGEX: OnceLock<Regex> = OnceLock::new();

fn trailing_index_regex() -> &'static Regex {
    TRAILING_INDEX_REGEX
        .get_or_init(|| Regex::new(TRAILING_INDEX_PATTERN).expect("invalid regex pattern"))
}

impl KeyExtractor for TrailingIndex {
    fn key(&self, name: &str) -> OrderKey {
        trailing_index_regex()
            .captures(name)
            .and_then(|caps| caps[1].parse::<u32>().ok())
            .map(OrderKey::Index)
            .unwrap_or(OrderKey::Unordered)
    }
}

/// Sprites in ascending key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpriteSequence(Vec<SpriteRef>);

impl SpriteSequence {
    /// Sorts `sprites` by key. The sort is stable, so sprites with equal keys
    /// (including every `Unordered` one) keep their input order.
    pub fn ordered(mut sprites: Vec<SpriteRef>) -> Self {
        sprites.sort_by_key(|s| s.key);
        Self(sprites)
    }

    /// Re-derives every key with `extractor`, then sorts.
    pub fn ordered_with(sprites: Vec<SpriteRef>, extractor: &dyn KeyExtractor) -> Self {
        let sprites = sprites
            .into_iter()
            .map(|mut s| {
                s.key = extractor.key(&s.name);
                s
            })
            .collect();
        Self::ordered(sprites)
    }

    /// Re-sorts in place. A no-op on a sequence that is already ordered.
    pub fn resort(&mut self) {
        self.0.sort_by_key(|s| s.key);
    }

    /// Returns true if keys are non-decreasing.
    pub fn is_ordered(&self) -> bool {
        self.0.windows(2).all(|w| w[0].key <= w[1].key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SpriteRef> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[SpriteRef] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<SpriteRef> {
        self.0
    }
}

impl<'a> IntoIterator for &'a SpriteSequence {
    type Item = &'a SpriteRef;
    type IntoIter = std::slice::Iter<'a, SpriteRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sprite(name: &str) -> SpriteRef {
        SpriteRef::new(name, SpriteRect::new(0, 0, 8, 8), &TrailingIndex)
    }

    fn names(seq: &SpriteSequence) -> Vec<&str> {
        seq.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_trailing_index() {
        assert_eq!(TrailingIndex.key("terrain_0"), OrderKey::Index(0));
        assert_eq!(TrailingIndex.key("terrain_12"), OrderKey::Index(12));
        assert_eq!(TrailingIndex.key("deep_water_5"), OrderKey::Index(5));
        assert_eq!(TrailingIndex.key("terrain"), OrderKey::Unordered);
        assert_eq!(TrailingIndex.key("terrain_"), OrderKey::Unordered);
        assert_eq!(TrailingIndex.key("terrain_a"), OrderKey::Unordered);
        assert_eq!(TrailingIndex.key("terrain_99999999999"), OrderKey::Unordered);
    }

    #[test]
    fn test_unordered_sorts_first() {
        assert!(OrderKey::Unordered < OrderKey::Index(0));
        assert!(OrderKey::Index(2) < OrderKey::Index(10));
    }

    #[test]
    fn test_ordered_is_numeric_not_lexical() {
        let seq = SpriteSequence::ordered(vec![
            sprite("t_10"),
            sprite("t_2"),
            sprite("t_1"),
            sprite("cover"),
        ]);
        assert_eq!(names(&seq), vec!["cover", "t_1", "t_2", "t_10"]);
        assert!(seq.is_ordered());
    }

    #[test]
    fn test_unordered_keep_input_order() {
        let seq = SpriteSequence::ordered(vec![sprite("b"), sprite("t_0"), sprite("a")]);
        assert_eq!(names(&seq), vec!["b", "a", "t_0"]);
    }

    #[test]
    fn test_resort_is_noop_on_sorted() {
        let mut seq = SpriteSequence::ordered(vec![sprite("t_3"), sprite("t_1"), sprite("t_2")]);
        let before = seq.clone();
        seq.resort();
        assert_eq!(seq, before);
    }

    #[test]
    fn test_custom_extractor() {
        // Reverse ordering by parsing a prefix number.
        let prefix = |name: &str| {
            name.split('-')
                .next()
                .and_then(|n| n.parse::<u32>().ok())
                .map(OrderKey::Index)
                .unwrap_or(OrderKey::Unordered)
        };
        let sprites = vec![sprite("2-b"), sprite("0-c"), sprite("1-a")];
        let seq = SpriteSequence::ordered_with(sprites, &prefix);
        assert_eq!(names(&seq), vec!["0-c", "1-a", "2-b"]);
    }
}
