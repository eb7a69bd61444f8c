//! `ActivityPub` activity types.

#![allow(missing_docs)]

mod create;
mod like;
mod update;

pub use create::CreateActivity;
pub use like::{DislikeActivity, LikeActivity, VoteActivity, VoteDirection};
pub use update::UpdateActivity;
