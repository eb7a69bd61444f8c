//! Votes.

use chrono::{DateTime, Utc};

use crate::{Account, Flags, Item};

/// A weight from one account toward one item: `1` like, `-1` dislike,
/// `0` no vote.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vote {
    pub submitted_by: Option<Account>,
    pub item: Option<Item>,
    pub weight: i32,
    pub submitted_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub flags: Flags,
}

impl Vote {
    #[must_use]
    pub const fn is_yay(&self) -> bool {
        self.weight > 0
    }

    #[must_use]
    pub const fn is_nay(&self) -> bool {
        self.weight < 0
    }
}
