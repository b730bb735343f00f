// Project-wide constants
//
// Plan shape and reward rules live here so the validator, the prompt builder
// and the progress engine agree on one set of numbers.

/// Number of days in every generated plan.
pub const PLAN_DAYS: usize = 14;

/// Number of tasks in every plan day.
pub const TASKS_PER_DAY: usize = 5;

/// Streak ceiling; reaching it means the plan is complete.
pub const MAX_STREAK: u32 = 14;

/// Coins awarded for each newly completed task.
pub const COINS_PER_TASK: u64 = 1;

/// Default Gemini model for plan generation.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Default Gemini REST endpoint.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Sampling temperature for plan generation.
pub const PLAN_TEMPERATURE: f32 = 0.7;

/// Output cap for a generated plan; 70 short tasks fit well inside it.
pub const PLAN_MAX_OUTPUT_TOKENS: u32 = 8192;

/// Default HTTP timeout for a generation request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Environment variable consulted when the config file carries no API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
