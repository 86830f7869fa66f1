// Career endpoints: advice, resume analysis, cover letters, skills analysis.
// All four share one pipeline; they differ only in their `UseCase` record.
// All LLM calls go through llm_client.

pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod use_cases;
