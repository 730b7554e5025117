use std::str::FromStr;

use tracing::instrument;

use crate::domain::error::DomainError;
use crate::infrastructure::llm::{ChatMessage, LlmClient, RelayStream};

pub const MAX_CONTEXT_CHARS: usize = 6000;
pub const TRUNCATION_MARKER: &str = "\n\n[... document truncated to fit the model context ...]";

const ACADEMIC_SYSTEM_PROMPT: &str = "You are a strict academic assistant for students.\n\
RULES:\n\
1. ONLY answer questions related to studies, assignments, exams, or academic materials.\n\
2. If a user asks about anything else (movies, games, jokes, general chat), politely decline and steer them back to studying.\n\
3. Be encouraging but focused.\n\
4. Use Markdown for clear formatting.";

const EXPLAIN_SYSTEM_PROMPT: &str = "You are a study assistant. Your task is to explain and help people learn. \
Study the received data and explain what it is about. Also answer follow-up questions from the user. \
Use Markdown formatting for readability.";

const QUIZ_SYSTEM_PROMPT: &str = "You are a strict output generator. You must generate a JSON array of 10 multiple choice questions.\n\n\
IMPORTANT: Questions must be about the SUBJECT MATTER and LEARNING CONTENT inside the document - test the student's \
understanding of the concepts, definitions, facts, and ideas presented in the text. Do NOT ask meta-questions about \
the document itself (e.g. \"What format is this document?\" or \"How many sections does this have?\").\n\n\
The output must be a valid JSON array of objects. NO markdown, NO code blocks, just raw JSON.\n\
Each object must have:\n\
- \"question\": string (tests knowledge from the content)\n\
- \"options\": array of 4 strings\n\
- \"correctAnswer\": string (must match one of the options exactly)\n\
- \"explanation\": string (brief explanation referring to the document content)\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    Explain,
    Quiz,
}

impl FromStr for GenerationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "explain" => Ok(GenerationKind::Explain),
            "quiz" => Ok(GenerationKind::Quiz),
            _ => Err(DomainError::validation("Invalid generation type")),
        }
    }
}

/// Cuts the document down to the context budget, counting characters rather
/// than bytes so multi-byte text is never split.
pub fn truncate_for_context(text: &str) -> String {
    match text.char_indices().nth(MAX_CONTEXT_CHARS) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
    }
}

fn require_context(document_text: Option<&str>, missing: &str) -> Result<String, DomainError> {
    let text = document_text.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(DomainError::validation(missing));
    }
    Ok(truncate_for_context(text))
}

fn require_messages(messages: &[ChatMessage]) -> Result<(), DomainError> {
    if messages.is_empty() {
        return Err(DomainError::validation("Messages array is required"));
    }
    Ok(())
}

pub fn chat_messages(messages: Vec<ChatMessage>) -> Result<Vec<ChatMessage>, DomainError> {
    require_messages(&messages)?;
    let mut out = Vec::with_capacity(messages.len() + 1);
    out.push(ChatMessage::system(ACADEMIC_SYSTEM_PROMPT));
    out.extend(messages);
    Ok(out)
}

pub fn generation_messages(
    kind: GenerationKind,
    document_text: Option<&str>,
) -> Result<Vec<ChatMessage>, DomainError> {
    let context = require_context(
        document_text,
        "No document content available. Please upload a document first.",
    )?;

    let (system, user) = match kind {
        GenerationKind::Explain => (
            EXPLAIN_SYSTEM_PROMPT,
            format!(
                "Study the following document and explain what it is about:\n\n{}",
                context
            ),
        ),
        GenerationKind::Quiz => (
            QUIZ_SYSTEM_PROMPT,
            format!(
                "Generate exactly 10 multiple choice questions that test understanding of the material in this document:\n\n{}",
                context
            ),
        ),
    };

    Ok(vec![ChatMessage::system(system), ChatMessage::user(user)])
}

pub fn document_chat_messages(
    messages: Vec<ChatMessage>,
    document_text: Option<&str>,
) -> Result<Vec<ChatMessage>, DomainError> {
    require_messages(&messages)?;
    let context = require_context(
        document_text,
        "No document context. Please upload and process a document first.",
    )?;

    let system = format!(
        "You are a helpful academic tutor assisting a student with a document.\n\
Use the following context to answer the student's questions.\n\
If the answer is not in the context, say you don't find it in the document but try to answer from general knowledge \
if relevant (and mark it as general knowledge).\n\n\
CONTEXT:\n{}\n\n\
RULES:\n\
1. Be concise and clear.\n\
2. Use Markdown formatting.\n\
3. Maintain a professional, encouraging tone.",
        context
    );

    let mut out = Vec::with_capacity(messages.len() + 1);
    out.push(ChatMessage::system(system));
    out.extend(messages);
    Ok(out)
}

#[derive(Clone)]
pub struct AiService {
    client: LlmClient,
}

impl AiService {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    #[instrument(skip_all, fields(messages = messages.len()))]
    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<RelayStream, DomainError> {
        let prompt = chat_messages(messages)?;
        self.client
            .relay(&prompt, "Failed to connect to AI service.")
            .await
    }

    #[instrument(skip(self, document_text))]
    pub async fn generate(
        &self,
        kind: GenerationKind,
        document_text: Option<&str>,
    ) -> Result<RelayStream, DomainError> {
        let prompt = generation_messages(kind, document_text)?;
        self.client
            .relay(&prompt, "Failed to generate content")
            .await
    }

    #[instrument(skip_all, fields(messages = messages.len()))]
    pub async fn document_chat(
        &self,
        messages: Vec<ChatMessage>,
        document_text: Option<&str>,
    ) -> Result<RelayStream, DomainError> {
        let prompt = document_chat_messages(messages, document_text)?;
        self.client.relay(&prompt, "Failed to process chat").await
    }
}
