// Plan generation pipeline
//
// Questionnaire answers in, persisted 14-day plan out. The pipeline owns the
// ordering: preconditions, prompt, one provider call, extraction and schema
// checks, then a single document write.

mod pipeline;

pub use pipeline::PlanGenerator;
