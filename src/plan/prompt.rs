// Generation prompt
//
// The closing instruction is load-bearing: the extractor assumes the response
// holds one JSON array and no other bracketed text.

use crate::config::constants::{PLAN_DAYS, TASKS_PER_DAY};
use crate::questionnaire::Question;

/// Build the single instruction sent to the generative API.
///
/// `questions` and `answers` are paired by position; callers check the counts.
pub fn build_generation_prompt(
    age: u32,
    problem: &str,
    questions: &[Question],
    answers: &[String],
) -> String {
    let transcript = questions
        .iter()
        .zip(answers)
        .enumerate()
        .map(|(i, (q, a))| format!("{}. {} - Answer: {}", i + 1, q.text, a))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "A user aged {age} is seeking guidance.\n\
         Their main challenge is: \"{problem}\".\n\
         Based on their answers below and their primary challenge, create a {PLAN_DAYS}-day \
         transformative plan rooted in principles of self-discipline, mindfulness, and \
         traditional Indian wisdom (like Brahmacharya).\n\
         The tone should be gentle, supportive, and encouraging.\n\
         Each day must have exactly {TASKS_PER_DAY} actionable tasks. The tasks should start \
         very light and gradually increase in difficulty or commitment.\n\n\
         User's Questionnaire Answers:\n\
         {transcript}\n\n\
         IMPORTANT: Your entire response must be ONLY the raw JSON array, starting with '[' \
         and ending with ']'. Do not include any other text, explanations, or markdown formatting.\n\
         For example: [{{\"day\": \"Day 1\", \"tasks\": [\"Task 1\", \"Task 2\", \"Task 3\", \
         \"Task 4\", \"Task 5\"]}}, ...]\n",
        problem = problem.trim(),
    )
}
