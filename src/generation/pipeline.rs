// Plan generation pipeline
// Preconditions, single-flight guard, one provider call, one document write

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

use crate::clock::Clock;
use crate::config::constants::{PLAN_MAX_OUTPUT_TOKENS, PLAN_TEMPERATURE};
use crate::errors::GenerationError;
use crate::plan::{build_generation_prompt, parse_plan, Plan};
use crate::profile::{QuestionnaireRecord, UserProfile};
use crate::providers::{GenerationRequest, TextGenerator};
use crate::questionnaire::questions;
use crate::store::DocumentStore;

/// Turns a completed questionnaire into a stored plan.
pub struct PlanGenerator {
    provider: Arc<dyn TextGenerator>,
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    /// Users with a generation currently running
    in_flight: DashMap<String, ()>,
}

/// Clears the user's in-flight marker however the pipeline exits.
struct InFlightGuard<'a> {
    in_flight: &'a DashMap<String, ()>,
    user_id: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.remove(&self.user_id);
    }
}

impl PlanGenerator {
    pub fn new(
        provider: Arc<dyn TextGenerator>,
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            provider,
            store,
            clock,
            in_flight: DashMap::new(),
        }
    }

    /// Whether a generation is currently running for `user_id`.
    pub fn is_generating(&self, user_id: &str) -> bool {
        self.in_flight.contains_key(user_id)
    }

    fn begin(&self, user_id: &str) -> Result<InFlightGuard<'_>, GenerationError> {
        match self.in_flight.entry(user_id.to_string()) {
            Entry::Occupied(_) => Err(GenerationError::AlreadyInProgress(user_id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(());
                Ok(InFlightGuard {
                    in_flight: &self.in_flight,
                    user_id: user_id.to_string(),
                })
            }
        }
    }

    /// Generate, validate and persist a plan for `profile`.
    ///
    /// `answers` pairs by position with the question bank for the profile's age
    /// group. Nothing is written unless the full 14 x 5 plan validates, and the
    /// plan, questionnaire and creation time land in one write.
    pub async fn generate_plan(
        &self,
        profile: &UserProfile,
        answers: &[String],
        problem: &str,
    ) -> Result<Plan, GenerationError> {
        let bank = questions(profile.age_group);
        let answered = answers.iter().filter(|a| !a.trim().is_empty()).count();
        if answers.len() != bank.len() || answered != bank.len() {
            return Err(GenerationError::IncompleteQuestionnaire {
                expected: bank.len(),
                answered,
            });
        }
        let problem = problem.trim();
        if problem.is_empty() {
            return Err(GenerationError::MissingProblemStatement);
        }

        let _guard = self.begin(&profile.id)?;

        let prompt = build_generation_prompt(profile.age, problem, bank, answers);
        let request = GenerationRequest::new(prompt)
            .with_model(self.provider.default_model())
            .with_temperature(PLAN_TEMPERATURE)
            .with_max_output_tokens(PLAN_MAX_OUTPUT_TOKENS);

        tracing::info!(
            "Generating plan for {} ({}) via {} model={}",
            profile.id,
            profile.age_group,
            self.provider.name(),
            request.model
        );

        let text = match self.provider.generate_text(&request).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::error!("Plan service returned no text for {}", profile.id);
                return Err(GenerationError::EmptyResponse);
            }
            Err(e) => {
                tracing::error!("Plan service call failed for {}: {}", profile.id, e);
                return Err(GenerationError::ApiUnavailable(e));
            }
        };

        let plan = parse_plan(&text).map_err(|e| {
            tracing::error!("Rejected generated plan for {}: {}", profile.id, e);
            tracing::debug!("Raw plan response: {}", text);
            GenerationError::InvalidPlanShape(e)
        })?;

        let questionnaire = QuestionnaireRecord {
            answers: answers.to_vec(),
            problem: problem.to_string(),
            age_group: profile.age_group,
            age: profile.age,
            generated_at: self.clock.now(),
        };
        self.store
            .set(&profile.id, &profile.with_plan(plan.clone(), questionnaire))
            .await?;

        tracing::info!("Stored {}-day plan for {}", plan.len(), profile.id);
        Ok(plan)
    }
}
