//! # ringside-api
//!
//! The shared data model of the ringside event platform: typed
//! identifiers and the documents stored by the server (events,
//! registrations, brackets, bouts, fights, suspensions, users) plus the
//! auth token payloads.
//!
//! ## Feature Flags
//!
//! `server`: Marks server-assigned fields (ids) as `skip_deserializing`
//! so clients cannot inject them.

pub mod auth;
pub mod bouts;
pub mod brackets;
pub mod events;
pub mod fights;
pub mod id;
pub mod registrations;
pub mod suspensions;
pub mod users;
