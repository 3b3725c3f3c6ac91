use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};

use crate::error::ModelError;
use crate::geo::GeoPoint;
use crate::ids::{AccountId, TrailKey};

/// Kind of media a trail carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrailKind {
    #[default]
    Photo = 0,
    Audio = 1,
    Video = 2,
}

impl Display for TrailKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TrailKind::Photo => write!(f, "Photo"),
            TrailKind::Audio => write!(f, "Audio"),
            TrailKind::Video => write!(f, "Video"),
        }
    }
}

impl TryFrom<i16> for TrailKind {
    type Error = ModelError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TrailKind::Photo),
            1 => Ok(TrailKind::Audio),
            2 => Ok(TrailKind::Video),
            other => Err(ModelError::InvalidTrailKind(other)),
        }
    }
}

/// Evaluation verdict recorded per trail.
///
/// Transitions only go forward: `NotEvaluated` to `Liked` or `Disliked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Likeness {
    #[default]
    NotEvaluated = 0,
    Liked = 1,
    Disliked = 2,
}

impl Likeness {
    pub fn is_evaluated(&self) -> bool {
        !matches!(self, Likeness::NotEvaluated)
    }

    pub fn as_i16(&self) -> i16 {
        *self as i16
    }
}

impl Display for Likeness {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Likeness::NotEvaluated => write!(f, "NotEvaluated"),
            Likeness::Liked => write!(f, "Liked"),
            Likeness::Disliked => write!(f, "Disliked"),
        }
    }
}

impl TryFrom<i16> for Likeness {
    type Error = ModelError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Likeness::NotEvaluated),
            1 => Ok(Likeness::Liked),
            2 => Ok(Likeness::Disliked),
            other => Err(ModelError::InvalidLikeness(other)),
        }
    }
}

/// A single media submission owned by an account.
///
/// On the wire the revision is carried only inside `id`, the encoded
/// [`TrailKey`] clients pass back to like or dislike the trail.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "wire::TrailWire", into = "wire::TrailWire")
)]
pub struct Trail {
    pub account: AccountId,
    pub revision: String,
    pub path: String,
    pub thumb_exists: bool,
    pub mime_type: String,
    pub created_at: DateTime<Utc>,
    pub geo_point: GeoPoint,
    pub tags: Vec<String>,
    pub bytes: i64,
    pub kind: TrailKind,
    pub likeness: Likeness,
    pub evaluated_on: Option<DateTime<Utc>>,
}

impl Trail {
    /// Fresh, not yet evaluated trail with no location, tags or media path.
    pub fn new(
        account: AccountId,
        revision: impl Into<String>,
        kind: TrailKind,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            account,
            revision: revision.into(),
            path: String::new(),
            thumb_exists: false,
            mime_type: String::new(),
            created_at,
            geo_point: GeoPoint::ZERO,
            tags: Vec::new(),
            bytes: 0,
            kind,
            likeness: Likeness::NotEvaluated,
            evaluated_on: None,
        }
    }

    pub fn key(&self) -> TrailKey {
        TrailKey::new(self.account, self.revision.clone())
    }

    pub fn has_location(&self) -> bool {
        !self.geo_point.is_zero()
    }

    /// Record a like or dislike taken at `at`.
    ///
    /// `NotEvaluated` is not a verdict and is rejected, which keeps
    /// `evaluated_on` set exactly when the trail has been evaluated.
    pub fn record_verdict(
        &mut self,
        verdict: Likeness,
        at: DateTime<Utc>,
    ) -> Result<(), ModelError> {
        if !verdict.is_evaluated() {
            return Err(ModelError::InvalidVerdict(
                "a trail cannot be reset to NotEvaluated".to_string(),
            ));
        }
        self.likeness = verdict;
        self.evaluated_on = Some(at);
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod wire {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    use super::{Likeness, Trail, TrailKind};
    use crate::error::ModelError;
    use crate::geo::GeoPoint;
    use crate::ids::{AccountId, TrailKey};

    #[derive(Serialize, Deserialize)]
    pub(super) struct TrailWire {
        id: String,
        account_id: AccountId,
        media_path: String,
        thumb_exists: bool,
        mime_type: String,
        created_at: DateTime<Utc>,
        geo_point: GeoPoint,
        #[serde(default)]
        tags: Vec<String>,
        bytes: i64,
        trail_type: TrailKind,
        #[serde(default)]
        likeness: Likeness,
        #[serde(default)]
        evaluated_on: Option<DateTime<Utc>>,
    }

    impl From<Trail> for TrailWire {
        fn from(trail: Trail) -> Self {
            Self {
                id: trail.key().encode(),
                account_id: trail.account,
                media_path: trail.path,
                thumb_exists: trail.thumb_exists,
                mime_type: trail.mime_type,
                created_at: trail.created_at,
                geo_point: trail.geo_point,
                tags: trail.tags,
                bytes: trail.bytes,
                trail_type: trail.kind,
                likeness: trail.likeness,
                evaluated_on: trail.evaluated_on,
            }
        }
    }

    impl TryFrom<TrailWire> for Trail {
        type Error = ModelError;

        fn try_from(wire: TrailWire) -> Result<Self, Self::Error> {
            let key = TrailKey::decode(&wire.id)?;
            if key.account != wire.account_id {
                return Err(ModelError::InvalidKey(format!(
                    "id belongs to account {}, not {}",
                    key.account, wire.account_id
                )));
            }
            Ok(Trail {
                account: key.account,
                revision: key.revision,
                path: wire.media_path,
                thumb_exists: wire.thumb_exists,
                mime_type: wire.mime_type,
                created_at: wire.created_at,
                geo_point: wire.geo_point,
                tags: wire.tags,
                bytes: wire.bytes,
                kind: wire.trail_type,
                likeness: wire.likeness,
                evaluated_on: wire.evaluated_on,
            })
        }
    }
}
