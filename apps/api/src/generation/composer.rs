//! Prompt Composer — builds the two-message payload from resume and job text.
//!
//! Pure: the same inputs always give the same payload. Inputs are embedded
//! verbatim, in one pass, with no escaping.

use crate::generation::prompts::{COVER_LETTER_SYSTEM, CV_INTRO, JOB_REQUIREMENTS_INTRO};
use crate::generation::request::UserRequest;
use crate::llm_client::{PromptMessage, PromptPayload, Role};

pub fn compose_prompt(document_text: &str, request: &UserRequest) -> PromptPayload {
    PromptPayload {
        messages: vec![
            PromptMessage {
                role: Role::System,
                content: COVER_LETTER_SYSTEM.to_string(),
            },
            PromptMessage {
                role: Role::User,
                content: user_message(request.as_str(), document_text),
            },
        ],
    }
}

fn user_message(job_requirements: &str, cv_text: &str) -> String {
    format!("{JOB_REQUIREMENTS_INTRO}\n{job_requirements}\n\n{CV_INTRO}\n{cv_text}")
}
