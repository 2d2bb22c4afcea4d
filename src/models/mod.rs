pub mod pull_request;
pub mod team;

pub use pull_request::PullRequestCreateRequest;
pub use team::{Member, SetupData, TeamCreateRequest};
