//! Song domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ─────────────────────────────────────────────────────────────────────────────
// Identifiers
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }
    };
}

uuid_id!(
    /// Opaque identifier of a song.
    SongId
);

uuid_id!(
    /// Opaque identifier of a performing group.
    GroupId
);

// ─────────────────────────────────────────────────────────────────────────────
// Song Types
// ─────────────────────────────────────────────────────────────────────────────

/// A persisted song as returned to callers.
///
/// `lyrics` is assembled from the song's verses (joined with `\n`); it is
/// never stored on the song row itself. Repositories return it empty and
/// `SongService` fills it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub group_name: String,
    pub release_date: NaiveDate,
    pub link: String,
    pub lyrics: String,
}

/// A song row to be inserted (no ID yet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub title: String,
    pub group_id: GroupId,
    pub release_date: NaiveDate,
    pub link: String,
}

/// A partial update request for a song.
///
/// `None` leaves a field unchanged, `Some` replaces it. Changing the group
/// is expressed by name; the service resolves (or creates) the group before
/// touching the song row. Supplying `lyrics` replaces every verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongUpdate {
    pub id: SongId,
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub group_name: Option<String>,
    pub link: Option<String>,
    pub lyrics: Option<String>,
}

impl SongUpdate {
    /// Create an empty update for the given song.
    #[must_use]
    pub const fn for_song(id: SongId) -> Self {
        Self {
            id,
            title: None,
            release_date: None,
            group_name: None,
            link: None,
            lyrics: None,
        }
    }

    /// True when no field would change.
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.release_date.is_none()
            && self.group_name.is_none()
            && self.link.is_none()
            && self.lyrics.is_none()
    }
}

/// Column-level changes applied to the `songs` row.
///
/// Derived from a [`SongUpdate`] once the group name has been resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongChanges {
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub group_id: Option<GroupId>,
    pub link: Option<String>,
}

impl SongChanges {
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.release_date.is_none()
            && self.group_id.is_none()
            && self.link.is_none()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Filter Types
// ─────────────────────────────────────────────────────────────────────────────

/// Search predicates for the song catalog.
///
/// Every field is optional. Text fields that are `None` or empty add no
/// predicate; `limit == 0` means no cap and `offset == 0` means from the
/// start. Title, group and text match case-insensitively as substrings,
/// `link` matches exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    pub title: Option<String>,
    pub group: Option<String>,
    pub link: Option<String>,
    pub text: Option<String>,
    pub released_from: Option<NaiveDate>,
    pub released_to: Option<NaiveDate>,
    pub limit: u32,
    pub offset: u32,
}

impl SongFilter {
    /// Apply a 1-based page request to this filter.
    #[must_use]
    pub const fn with_page(mut self, page: super::PageRequest) -> Self {
        self.limit = page.limit;
        self.offset = page.offset();
        self
    }
}
