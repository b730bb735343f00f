// Plan Extractor
//
// Model output is not guaranteed to be bare JSON: it often arrives wrapped in
// prose or markdown fences. The recovery rule is the substring from the first
// '[' to the last ']', parsed as JSON.

use serde_json::Value;

use super::schema::validate_plan;
use super::types::Plan;
use crate::errors::{ExtractionError, PlanShapeError};

/// Recover the outermost bracketed JSON value from raw model text.
pub fn extract_json_array(text: &str) -> Result<Value, ExtractionError> {
    let start = text.find('[').ok_or(ExtractionError::NoJsonFound)?;
    let end = text.rfind(']').ok_or(ExtractionError::NoJsonFound)?;
    if end < start {
        return Err(ExtractionError::NoJsonFound);
    }

    let slice = &text[start..=end];
    serde_json::from_str(slice).map_err(|e| ExtractionError::Malformed {
        snippet: slice.to_string(),
        reason: e.to_string(),
    })
}

/// Extract and validate in one step.
pub fn parse_plan(text: &str) -> Result<Plan, PlanShapeError> {
    let value = extract_json_array(text)?;
    Ok(validate_plan(&value)?)
}
