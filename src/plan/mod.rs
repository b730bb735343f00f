// Plan: the 14-day schedule, its schema, and recovery from model output
//
// Model text flows `extract_json_array` -> `validate_plan` -> `Plan`. The prompt
// builder lives here too because the extractor relies on the prompt's
// "raw JSON array only" contract.

pub mod extract;
pub mod prompt;
pub mod schema;
pub mod types;

pub use extract::{extract_json_array, parse_plan};
pub use prompt::build_generation_prompt;
pub use schema::validate_plan;
pub use types::{DayEntry, Plan};
