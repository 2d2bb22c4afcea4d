use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants::{MEMBER_ID_PREFIX, MEMBER_USERNAME_PREFIX, TEAM_NAME_PREFIX};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamCreateRequest {
    pub team_name: String,
    pub members: Vec<Member>,
}

impl TeamCreateRequest {
    /// Builds a team with a time-based unique name and `team_size`
    /// sequentially numbered active members.
    pub fn generate(team_size: usize) -> Self {
        let team_name = format!("{}{}", TEAM_NAME_PREFIX, Utc::now().timestamp_millis());

        let members = (1..=team_size)
            .map(|i| Member {
                user_id: format!("{}{}", MEMBER_ID_PREFIX, i),
                username: format!("{}{}", MEMBER_USERNAME_PREFIX, i),
                is_active: true,
            })
            .collect();

        Self { team_name, members }
    }

    pub fn user_ids(&self) -> Vec<String> {
        self.members.iter().map(|m| m.user_id.clone()).collect()
    }
}

/// Output of the setup phase, shared read-only with every virtual user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupData {
    pub user_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_produces_sequential_active_members() {
        let team = TeamCreateRequest::generate(100);

        assert_eq!(team.members.len(), 100);
        assert!(team.team_name.starts_with("load_team_"));

        let ids: HashSet<&str> = team.members.iter().map(|m| m.user_id.as_str()).collect();
        assert_eq!(ids.len(), 100, "user_ids must be distinct");

        for i in 1..=100 {
            assert!(ids.contains(format!("lu_{}", i).as_str()));
        }

        assert!(team.members.iter().all(|m| m.is_active));
        assert_eq!(team.members[0].username, "LoadUser_1");
        assert_eq!(team.members[99].username, "LoadUser_100");
    }

    #[test]
    fn test_team_names_are_time_based() {
        let team = TeamCreateRequest::generate(1);
        let suffix = &team.team_name["load_team_".len()..];
        assert!(suffix.parse::<i64>().is_ok());
    }

    #[test]
    fn test_wire_format_field_names() {
        let team = TeamCreateRequest {
            team_name: "load_team_1".to_string(),
            members: vec![Member {
                user_id: "lu_1".to_string(),
                username: "LoadUser_1".to_string(),
                is_active: true,
            }],
        };

        let json = serde_json::to_value(&team).unwrap();
        assert_eq!(json["team_name"], "load_team_1");
        assert_eq!(json["members"][0]["user_id"], "lu_1");
        assert_eq!(json["members"][0]["username"], "LoadUser_1");
        assert_eq!(json["members"][0]["is_active"], true);
    }
}
