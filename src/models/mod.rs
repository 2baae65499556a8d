// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod identity;
pub mod profile;

pub use identity::{AuthSession, Identity, SignUpOutcome};
pub use profile::{Profile, ProfileChanges};
