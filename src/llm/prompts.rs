//! Fixed screening prompt and chat request construction

use serde::Serialize;

/// Model used for every analysis
pub const MODEL: &str = "gpt-4o-mini";

/// Low sampling temperature, favouring repeatable scores
pub const TEMPERATURE: f32 = 0.2;

pub const JOB_OFFER_HEADER: &str = "--- OFFRE D'EMPLOI ---";
pub const CANDIDATE_RESUME_HEADER: &str = "--- CV CANDIDAT ---";

/// Recruiter persona and the JSON contract the model must follow
pub const SYSTEM_INSTRUCTION: &str = r#"Tu es un Expert en Recrutement (DRH) avec 15 ans d'expérience.
Ta mission est d'analyser un candidat par rapport à une offre d'emploi.

Tu dois répondre UNIQUEMENT au format JSON strict avec la structure suivante :
{
    "score_match": (entier de 0 à 100, sois sévère),
    "synthese": "Un résumé en 2 phrases du profil par rapport au besoin",
    "points_forts": ["Point 1", "Point 2", "Point 3"],
    "points_vigilance": ["Attention 1", "Lacune 2", "Incohérence 3"],
    "questions_entretien": [
        "Question 1 (précise)",
        "Question 2 (technique)",
        "Question 3 (culture)"
    ]
}

Ne renvoie rien d'autre que cet objet JSON : aucun texte autour, aucun bloc Markdown."#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    JsonObject,
}

/// Body of a chat-completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub response_format: ResponseFormat,
}

impl ChatRequest {
    pub fn user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

/// Frame the job offer and the resume as two distinct blocks
pub fn render_user_message(job_description: &str, extracted_text: &str) -> String {
    format!(
        "{}\n{}\n\n{}\n{}\n",
        JOB_OFFER_HEADER, job_description, CANDIDATE_RESUME_HEADER, extracted_text
    )
}

/// Build the request for one analysis. Inputs are copied verbatim, never trimmed.
pub fn build(system_instruction: &str, job_description: &str, extracted_text: &str) -> ChatRequest {
    ChatRequest {
        model: MODEL.to_string(),
        messages: vec![
            ChatMessage {
                role: Role::System,
                content: system_instruction.to_string(),
            },
            ChatMessage {
                role: Role::User,
                content: render_user_message(job_description, extracted_text),
            },
        ],
        temperature: TEMPERATURE,
        response_format: ResponseFormat::JsonObject,
    }
}
