// Error taxonomy for plan generation and progress tracking
//
// Extraction and schema failures never leave the pipeline on their own: they are
// folded into `PlanShapeError` and surfaced as `GenerationError::InvalidPlanShape`.

use thiserror::Error;

/// A parsed value does not have the shape of a 14-day plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("plan must have {expected} days, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("plan[{day}].tasks must have {expected} tasks, got {actual}")]
    WrongTaskCount {
        day: usize,
        expected: usize,
        actual: usize,
    },

    /// Tasks are addressed by text, so a day cannot list the same task twice.
    #[error("plan[{day}] lists '{task}' more than once")]
    DuplicateTask { day: usize, task: String },

    /// `field` is a path such as `plan`, `plan[3]`, `plan[3].day`, `plan[3].tasks[1]`
    #[error("{field} has the wrong type (expected {expected})")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("{field} is missing")]
    MissingField { field: String },
}

/// No JSON array could be recovered from model output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("no JSON array found in model output")]
    NoJsonFound,

    #[error("bracketed text is not valid JSON: {reason}")]
    Malformed { snippet: String, reason: String },
}

/// Either stage of turning model text into a plan failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanShapeError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Document-store failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("document write failed: {0}")]
    WriteFailed(String),

    #[error("document read failed: {0}")]
    ReadFailed(String),
}

/// Transport-level failures of the generative API client.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to generative API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generative API returned status {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum GenerationError {
    /// Transport failure, timeout or non-success status; the caller may retry.
    #[error("plan service is unavailable: {0}")]
    ApiUnavailable(#[source] ProviderError),

    #[error("plan service returned no text")]
    EmptyResponse,

    #[error("generated plan has an invalid shape: {0}")]
    InvalidPlanShape(#[source] PlanShapeError),

    #[error("questionnaire incomplete: {answered} of {expected} questions answered")]
    IncompleteQuestionnaire { expected: usize, answered: usize },

    #[error("problem statement is empty")]
    MissingProblemStatement,

    #[error("plan generation already in progress for user {0}")]
    AlreadyInProgress(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl GenerationError {
    /// Message shown to the end user; every generation failure reads as retryable.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::IncompleteQuestionnaire { .. } | Self::MissingProblemStatement => {
                "Please answer all questions and describe your challenge."
            }
            Self::AlreadyInProgress(_) => "Your plan is already being created. Please wait.",
            _ => "Sorry, we couldn't create your plan right now. Please try again later.",
        }
    }
}

#[derive(Debug, Error)]
pub enum ProgressError {
    /// The task is not the next one in plan order.
    #[error("'{task}' is not the next task (expected '{expected}')")]
    NotNextTask { task: String, expected: String },

    /// Only the most recent completion can be retracted.
    #[error("'{task}' is not the most recently completed task")]
    NotLastCompleted { task: String },

    #[error("'{0}' is not one of today's tasks")]
    UnknownTask(String),

    #[error("no document for user {0}")]
    UserNotFound(String),

    #[error("user has no plan yet")]
    NoPlan,

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
