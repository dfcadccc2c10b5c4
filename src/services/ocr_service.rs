//! OCR / structuring service
//!
//! Sends exam page images to a vision-capable chat model and returns either
//! a raw transcription or a structured question draft. The draft is
//! best-effort output: it must go through the assembler's import path before
//! anything is accepted into a document.

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImage,
        ChatCompletionRequestMessageContentPartText, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContent,
        ChatCompletionRequestUserMessageContentPart, CreateChatCompletionRequestArgs, ImageDetail,
        ImageUrl,
    },
    Client,
};
use regex::Regex;
use tracing::{debug, warn};

use crate::config::Config;

/// OCR service
///
/// Responsibilities:
/// - call the vision model on one exam's page images
/// - return raw text or a structured JSON draft, nothing validated
/// - no knowledge of documents, sessions, or flow ordering
pub struct OcrService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl OcrService {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
        }
    }

    /// Low-level model call with optional system message and page images
    ///
    /// Every other method is built on this one. Page images are appended to
    /// the user message as image-URL content parts.
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
        page_images: &[String],
    ) -> Result<String> {
        debug!("calling vision model {}", self.model_name);
        debug!(
            "user message: {} chars, {} page images",
            user_message.len(),
            page_images.len()
        );

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = if !page_images.is_empty() {
            let mut content_parts: Vec<ChatCompletionRequestUserMessageContentPart> = Vec::new();

            content_parts.push(ChatCompletionRequestUserMessageContentPart::Text(
                ChatCompletionRequestMessageContentPartText {
                    text: user_message.to_string(),
                },
            ));

            for url in page_images.iter() {
                content_parts.push(ChatCompletionRequestUserMessageContentPart::ImageUrl(
                    ChatCompletionRequestMessageContentPartImage {
                        image_url: ImageUrl {
                            url: url.clone(),
                            detail: Some(ImageDetail::High),
                        },
                    },
                ));
            }

            ChatCompletionRequestUserMessageArgs::default()
                .content(ChatCompletionRequestUserMessageContent::Array(content_parts))
                .build()?
        } else {
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_message)
                .build()?
        };

        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(0.0)
            .max_tokens(4096u32)
            .build()?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("vision model call failed: {}", e);
            anyhow::anyhow!("vision model call failed: {}", e)
        })?;

        debug!("vision model call succeeded");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("vision model returned empty content"))?;

        Ok(content.trim().to_string())
    }

    /// Transcribe exam pages to raw text
    pub async fn extract_text(&self, page_images: &[String]) -> Result<String> {
        let system_message = "You transcribe scanned exam pages. Return the text exactly as \
                              printed, keeping question numbering and option letters. Do not \
                              translate, summarise, or add commentary.";

        self.send_to_llm(
            "Transcribe every question on these exam pages.",
            Some(system_message),
            page_images,
        )
        .await
    }

    /// Draft a structured question list from exam pages
    ///
    /// Returns a JSON array string in the import shape
    /// (`question` / `options` / `correct_answers`), extracted from whatever
    /// fencing or prose the model wraps around it. The caller feeds it to the
    /// assembler's import path, which does all validation.
    pub async fn structure_questions(&self, page_images: &[String]) -> Result<String> {
        let system_message = "You convert scanned multiple-choice exam pages into JSON. Answer \
                              with a JSON array only. Each element has a \"question\" string, an \
                              \"options\" object keyed by the letters A to E, and a \
                              \"correct_answers\" array of letters (empty when the key is not \
                              marked on the page). Never invent questions that are not on the \
                              page.";

        let response = self
            .send_to_llm(
                "Extract every multiple-choice question on these pages as JSON.",
                Some(system_message),
                page_images,
            )
            .await?;

        let json = extract_json_array(&response)
            .ok_or_else(|| anyhow::anyhow!("no JSON array found in model response"))?;

        Ok(json)
    }
}

/// Pull the first JSON array out of a model response
///
/// Handles ```json fenced blocks as well as bare arrays surrounded by
/// prose.
fn extract_json_array(response: &str) -> Option<String> {
    let fence = Regex::new(r"(?s)```(?:json)?\s*(\[.*?\])\s*```").ok()?;
    if let Some(captures) = fence.captures(response) {
        return captures.get(1).map(|m| m.as_str().to_string());
    }

    let start = response.find('[')?;
    let end = response.rfind(']')?;
    if end > start {
        Some(response[start..=end].to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::exam_assembler::merge_imported_questions;

    fn create_test_service() -> OcrService {
        let mut config = Config::default();
        config.llm_model_name = "gpt-4o".to_string();
        OcrService::new(&config)
    }

    #[test]
    fn extracts_fenced_json_array() {
        let response = "Here you go:\n```json\n[{\"question\": \"q\", \"options\": {}}]\n```\nDone.";
        let json = extract_json_array(response).unwrap();
        assert!(json.starts_with('['));
        assert!(json.ends_with(']'));
        assert!(json.contains("\"question\""));
    }

    #[test]
    fn extracts_bare_json_array_from_prose() {
        let response = "The pages contain: [{\"question\": \"q\", \"options\": {\"A\": \"x\"}}] as requested.";
        let json = extract_json_array(response).unwrap();
        assert_eq!(
            json,
            "[{\"question\": \"q\", \"options\": {\"A\": \"x\"}}]"
        );
    }

    #[test]
    fn no_array_means_none() {
        assert_eq!(extract_json_array("no structured data here"), None);
        assert_eq!(extract_json_array("only a ] stray bracket ["), None);
    }

    #[test]
    fn extracted_draft_feeds_the_import_path() {
        let response = "```json\n[{\"question\": \"Which?\", \"options\": {\"A\": \"x\", \"B\": \"y\"}, \"correct_answers\": [\"B\"]}]\n```";
        let json = extract_json_array(response).unwrap();

        let mut questions = Vec::new();
        let report = merge_imported_questions(&mut questions, &json);
        assert_eq!(report.accepted, 1);
        assert!(questions[0].is_answered);
    }

    /// Needs network access and a real key:
    /// `cargo test test_extract_text -- --ignored --nocapture`
    #[tokio::test]
    #[ignore]
    async fn test_extract_text() {
        let _ = tracing_subscriber::fmt::try_init();

        let service = create_test_service();
        let pages = vec![
            "https://upload.wikimedia.org/wikipedia/commons/3/3a/Exam_paper.jpg".to_string(),
        ];

        let result = service.extract_text(&pages).await;
        match result {
            Ok(text) => {
                println!("transcription:\n{}", text);
                assert!(!text.is_empty());
            }
            Err(e) => panic!("extract_text failed: {}", e),
        }
    }

    #[tokio::test]
    #[ignore]
    async fn test_structure_questions() {
        let _ = tracing_subscriber::fmt::try_init();

        let service = create_test_service();
        let pages = vec![
            "https://upload.wikimedia.org/wikipedia/commons/3/3a/Exam_paper.jpg".to_string(),
        ];

        let result = service.structure_questions(&pages).await;
        match result {
            Ok(json) => {
                println!("draft:\n{}", json);
                let mut questions = Vec::new();
                let report = merge_imported_questions(&mut questions, &json);
                assert!(!report.is_rejected());
            }
            Err(e) => panic!("structure_questions failed: {}", e),
        }
    }
}
