// Shared prompt fragments.
// Use-case templates live in careers/prompts.rs; anything every template needs goes here.

/// Appended to every career prompt. The normalizer still copes when the model ignores it.
pub const JSON_ONLY_INSTRUCTION: &str = "\
Output only the JSON. Do not include backticks, markdown, or any explanations.";
