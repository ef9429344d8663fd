//! Wire types shared between the repositories and the HTTP surface.
//!
//! This crate contains:
//! - Row types (e.g., `PullRequest`, `TeamMember`) - the API representation of database entities
//! - Request types (e.g., `CreatePullRequestRequest`, `SetActiveRequest`) - API input types
//! - The error-code enum and error body shape

pub mod error;
pub mod pull_request;
pub mod stats;
pub mod team;
pub mod user;

pub use error::*;
pub use pull_request::*;
pub use stats::*;
pub use team::*;
pub use user::*;
