//! `ActivityPub` actor types.

#![allow(missing_docs)]

mod person;

pub use person::{ApPerson, ApPublicKey};
