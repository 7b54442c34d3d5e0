//! AI tutor: a thin proxy to a chat completion endpoint.
//!
//! The tutor never fails from the caller's point of view. Any upstream
//! problem is logged and answered with one of a few canned replies.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::TutorConfig;
use crate::models::{ChatRole, ConversationTurn, TutorRequest};

pub const FALLBACK_RESPONSES: [&str; 4] = [
    "Tuyệt vời! 🎉 Bạn làm rất tốt. Hãy tiếp tục cố gắng!",
    "Hay lắm! 🌟 Bạn thông minh quá!",
    "Nối câu tiếp theo được không? 💭",
    "Bạn nói rất đúng! 👍 Giờ thử cái này xem sao?",
];

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 100;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum TutorError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("upstream reply had no content")]
    EmptyReply,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ConversationTurn>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct TutorService {
    client: reqwest::Client,
    config: TutorConfig,
}

impl TutorService {
    pub fn new(config: TutorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client, config }
    }

    /// Reply to a student message. Falls back to a canned reply on any error.
    pub async fn respond(&self, request: &TutorRequest) -> String {
        match self.complete(request).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("AI tutor unavailable, using fallback reply: {}", e);
                fallback_response().to_string()
            }
        }
    }

    async fn complete(&self, request: &TutorRequest) -> Result<String, TutorError> {
        let body = CompletionRequest {
            model: &self.config.model,
            messages: build_messages(request),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let mut builder = self.client.post(&self.config.endpoint).json(&body);
        if let Some(token) = &self.config.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        if !response.status().is_success() {
            return Err(TutorError::Status(response.status().as_u16()));
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(TutorError::EmptyReply)
    }
}

/// System prompt, then the prior conversation, then the new message.
pub fn build_messages(request: &TutorRequest) -> Vec<ConversationTurn> {
    let mut messages = Vec::with_capacity(request.conversation_history.len() + 2);
    messages.push(ConversationTurn {
        role: ChatRole::System,
        content: system_prompt(request),
    });
    messages.extend(request.conversation_history.iter().cloned());
    messages.push(ConversationTurn {
        role: ChatRole::User,
        content: request.message.clone(),
    });
    messages
}

pub fn system_prompt(request: &TutorRequest) -> String {
    format!(
        "{context}\n\n\
         Student Name: {name}\n\
         Student Age: {age}\n\n\
         Guidelines:\n\
         - Keep responses SHORT (1-2 sentences maximum)\n\
         - Use simple vocabulary appropriate for a {age}-year-old\n\
         - Mix Vietnamese and English naturally\n\
         - Be encouraging and playful\n\
         - Always end with an emoji\n\
         - Ask engaging follow-up questions\n\
         - Gently correct mistakes with examples",
        context = request.context,
        name = request.student_name,
        age = request.student_age,
    )
}

pub fn fallback_response() -> &'static str {
    FALLBACK_RESPONSES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_RESPONSES[0])
}
