use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants::{PR_ID_PREFIX, PR_NAME};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestCreateRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
}

impl PullRequestCreateRequest {
    /// Builds a pull-request payload with a globally unique ID. The
    /// (vu, iteration) pair never repeats within a run; the timestamp
    /// keeps IDs from colliding across runs against the same service.
    pub fn generate(vu: usize, iteration: u64, author_id: &str) -> Self {
        let pull_request_id = format!(
            "{}{}-{}-{}",
            PR_ID_PREFIX,
            vu,
            iteration,
            Utc::now().timestamp_millis()
        );

        Self {
            pull_request_id,
            pull_request_name: PR_NAME.to_string(),
            author_id: author_id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_unique_across_vu_and_iteration() {
        let mut seen = HashSet::new();
        for vu in 1..=10 {
            for iter in 0..20 {
                let pr = PullRequestCreateRequest::generate(vu, iter, "lu_1");
                assert!(
                    seen.insert(pr.pull_request_id.clone()),
                    "duplicate id: {}",
                    pr.pull_request_id
                );
            }
        }
    }

    #[test]
    fn test_constant_name_and_author() {
        let pr = PullRequestCreateRequest::generate(3, 7, "lu_42");
        assert_eq!(pr.pull_request_name, "Load Test Feature");
        assert_eq!(pr.author_id, "lu_42");
        assert!(pr.pull_request_id.starts_with("pr-load-3-7-"));
    }

    #[test]
    fn test_wire_format_field_names() {
        let pr = PullRequestCreateRequest::generate(1, 0, "lu_1");
        let json = serde_json::to_value(&pr).unwrap();
        assert!(json.get("pull_request_id").is_some());
        assert_eq!(json["pull_request_name"], "Load Test Feature");
        assert_eq!(json["author_id"], "lu_1");
    }
}
