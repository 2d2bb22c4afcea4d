pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const CONFIG_FILE: &str = ".prload-config.json";
pub const BASE_URL_ENV: &str = "PRLOAD_BASE_URL";

pub const TEAM_ADD_PATH: &str = "/team/add";
pub const PR_CREATE_PATH: &str = "/pullRequest/create";

pub const DEFAULT_TEAM_SIZE: usize = 100;
pub const MEMBER_ID_PREFIX: &str = "lu_";
pub const MEMBER_USERNAME_PREFIX: &str = "LoadUser_";
pub const TEAM_NAME_PREFIX: &str = "load_team_";
pub const PR_ID_PREFIX: &str = "pr-load-";
pub const PR_NAME: &str = "Load Test Feature";

/// Pause between iterations of a single virtual user, in milliseconds.
pub const DEFAULT_THINK_TIME_MS: u64 = 100;

/// How often the ramp controller re-publishes the VU target.
pub const CONTROLLER_TICK_MS: u64 = 100;

// Default ramp profile: 10s up to 50 VUs, 30s plateau, 10s down to 0.
pub const DEFAULT_STAGES: &[(u64, usize)] = &[(10, 50), (30, 50), (10, 0)];

// Default service-level thresholds.
pub const DEFAULT_P95_MS: u64 = 300;
pub const DEFAULT_MAX_FAILURE_RATE: f64 = 0.001;

pub const CHECK_SETUP: &str = "setup: team created (200/201)";
pub const CHECK_PR_CREATED: &str = "pr create: status is 201";
