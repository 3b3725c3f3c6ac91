use crate::trail::{Likeness, Trail};

/// Tag applied when a liked trail could not be placed on the map.
pub const UNCATEGORIZED_TAG: &str = "Uncategorized";

/// Chronological view over the trails an account liked.
///
/// Stories are never stored; they are rebuilt from the liked-trails query.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Story {
    pub trails: Vec<Trail>,
    pub image: String,
    pub title: String,
}

impl Story {
    /// Fold liked trails into a story, sorted by creation time.
    ///
    /// The cover image is the first trail with a thumbnail (falling back to
    /// the first trail), and the title is the first tag found.
    pub fn from_trails(mut trails: Vec<Trail>) -> Self {
        trails.retain(|trail| trail.likeness == Likeness::Liked);
        trails.sort_by_key(|trail| trail.created_at);

        let image = trails
            .iter()
            .find(|trail| trail.thumb_exists)
            .or_else(|| trails.first())
            .map(|trail| trail.path.clone())
            .unwrap_or_default();

        let title = match trails
            .iter()
            .find_map(|trail| trail.tags.first())
        {
            Some(tag) => tag.clone(),
            None if trails.is_empty() => String::new(),
            None => UNCATEGORIZED_TAG.to_string(),
        };

        Self {
            trails,
            image,
            title,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }

    pub fn len(&self) -> usize {
        self.trails.len()
    }
}
