pub mod pull_requests;
pub mod schema;
pub mod stats;
pub mod teams;
pub mod users;
