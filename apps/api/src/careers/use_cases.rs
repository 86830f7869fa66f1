//! Use-case records — one per endpoint. The pipeline is generic over these.

use serde_json::{Map, Value};

use crate::careers::prompts::{
    CAREER_ADVICE_TEMPLATE, COVER_LETTER_TEMPLATE, RESUME_ANALYSIS_TEMPLATE,
    SKILLS_ANALYSIS_TEMPLATE,
};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-empty string.
    Text,
    /// Non-empty array, rendered comma-separated.
    List,
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn text(name: &'static str) -> Field {
    Field {
        name,
        kind: FieldKind::Text,
    }
}

const fn list(name: &'static str) -> Field {
    Field {
        name,
        kind: FieldKind::List,
    }
}

/// Everything that distinguishes one career endpoint from another.
#[derive(Debug)]
pub struct UseCase {
    pub name: &'static str,
    pub fields: &'static [Field],
    /// 400 body when any required field is absent.
    pub missing_message: &'static str,
    /// 500 body when the reply is not JSON.
    pub parse_failure_message: &'static str,
    /// Whether the cleaned reply is echoed back on parse failure.
    pub expose_raw: bool,
    /// Top-level keys the template asks for. Checked, never enforced.
    pub expected_keys: &'static [&'static str],
    pub template: &'static str,
}

pub const CAREER_ADVICE: UseCase = UseCase {
    name: "career_advice",
    fields: &[text("role")],
    missing_message: "Job role is missing",
    parse_failure_message: "Failed to parse Gemini response as JSON",
    expose_raw: true,
    expected_keys: &["advice", "tips", "questions"],
    template: CAREER_ADVICE_TEMPLATE,
};

pub const RESUME_ANALYSIS: UseCase = UseCase {
    name: "resume_analysis",
    fields: &[text("resume")],
    missing_message: "Resume text is required",
    parse_failure_message: "Failed to parse analysis response",
    expose_raw: true,
    expected_keys: &[
        "summary",
        "suggestedRoles",
        "strengths",
        "improvements",
        "keywords",
        "tips",
    ],
    template: RESUME_ANALYSIS_TEMPLATE,
};

pub const COVER_LETTER: UseCase = UseCase {
    name: "cover_letter",
    fields: &[text("resume"), text("company"), text("role")],
    missing_message: "Resume, company, and role are required",
    parse_failure_message: "Failed to parse cover letter response",
    expose_raw: false,
    expected_keys: &["coverLetter"],
    template: COVER_LETTER_TEMPLATE,
};

pub const SKILLS_ANALYSIS: UseCase = UseCase {
    name: "skills_analysis",
    fields: &[list("skills"), list("interestedJobRoles")],
    missing_message: "Skills and interested job roles are required",
    parse_failure_message: "Failed to parse analysis response",
    expose_raw: true,
    expected_keys: &["skillsToImprove", "additionalSkills", "careerAdvice"],
    template: SKILLS_ANALYSIS_TEMPLATE,
};

/// Field values ready for substitution, in declaration order.
pub type PromptValues = Vec<(&'static str, String)>;

impl UseCase {
    /// Returns the rendered value of every required field, or `None` if any is absent.
    pub fn collect(&self, body: &Map<String, Value>) -> Option<PromptValues> {
        self.fields
            .iter()
            .map(|field| field_value(field, body.get(field.name)?).map(|v| (field.name, v)))
            .collect()
    }

    /// Substitutes `{name}` tokens in a single pass so user text is never re-scanned.
    pub fn render(&self, values: &PromptValues) -> String {
        let mut prompt = String::with_capacity(self.template.len() + 256);
        let mut rest = self.template;

        while let Some(open) = rest.find('{') {
            prompt.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let substituted = after.find('}').and_then(|close| {
                let key = &after[..close];
                values
                    .iter()
                    .find(|(name, _)| *name == key)
                    .map(|(_, value)| (value, close))
            });
            match substituted {
                Some((value, close)) => {
                    prompt.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    prompt.push('{');
                    rest = after;
                }
            }
        }
        prompt.push_str(rest);

        prompt.push('\n');
        prompt.push_str(JSON_ONLY_INSTRUCTION);
        prompt
    }

    /// Expected keys the parsed reply lacks. Non-object replies lack all of them.
    pub fn missing_keys(&self, reply: &Value) -> Vec<&'static str> {
        match reply.as_object() {
            Some(object) => self
                .expected_keys
                .iter()
                .copied()
                .filter(|key| !object.contains_key(*key))
                .collect(),
            None => self.expected_keys.to_vec(),
        }
    }
}

fn field_value(field: &Field, value: &Value) -> Option<String> {
    match (field.kind, value) {
        (FieldKind::Text, Value::String(s)) if !s.is_empty() => Some(s.clone()),
        (FieldKind::List, Value::Array(items)) if !items.is_empty() => Some(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        _ => None,
    }
}
