use crate::config::GeneratorConfig;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

const ARTICLE_INSTRUCTIONS: &str = "You receive an article draft. Produce a title, a meta \
description, an image prompt, and the content formatted as markdown. Do not change what the \
content says. If the draft opens with an H1, remove it from the content and use it as the title. \
Group related paragraphs under H2 headings. The image prompt must be specific to the article.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    pub description: String,
    pub content_markdown: String,
    pub image_prompt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub image_url: String,
    pub revised_prompt: Option<String>,
}

/// Text and image generation, consumed as opaque calls.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage>;
    async fn complement_article(&self, content: &str) -> Result<ArticleDraft>;
}

/// Talks to an OpenAI-compatible API.
pub struct OpenAiGenerator {
    pub client: Client,
    pub config: GeneratorConfig,
}

impl OpenAiGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post_json(&self, path: &str, body: serde_json::Value) -> Result<serde_json::Value> {
        let url = self.endpoint(path);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("{} answered {}: {}", url, status, detail);
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ContentGenerator for OpenAiGenerator {
    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage> {
        let prompt = match &self.config.image_style {
            Some(style) => format!("{}\n\nStyle: {}", prompt, style),
            None => prompt.to_string(),
        };

        let body = json!({
            "model": self.config.image_model,
            "prompt": prompt,
            "n": 1,
        });
        let response = self.post_json("images/generations", body).await?;

        let image = parse_image_response(&response)?;
        tracing::info!("Generated image {}", image.image_url);
        Ok(image)
    }

    async fn complement_article(&self, content: &str) -> Result<ArticleDraft> {
        let mut instructions = ARTICLE_INSTRUCTIONS.to_string();
        if let Some(style) = &self.config.image_style {
            instructions.push_str("\n\nApply this base style to the image prompt: ");
            instructions.push_str(style);
        }

        let body = json!({
            "model": self.config.copywriter_model,
            "messages": [
                { "role": "system", "content": instructions },
                { "role": "user", "content": content },
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "article_draft",
                    "strict": true,
                    "schema": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "description": { "type": "string" },
                            "content_markdown": { "type": "string" },
                            "image_prompt": { "type": "string" },
                        },
                        "required": ["title", "description", "content_markdown", "image_prompt"],
                        "additionalProperties": false,
                    },
                },
            },
        });
        let response = self.post_json("chat/completions", body).await?;

        parse_article_response(&response)
    }
}

/// Reads the first entry of an `images/generations` answer.
pub fn parse_image_response(response: &serde_json::Value) -> Result<GeneratedImage> {
    let first = response
        .get("data")
        .and_then(|d| d.get(0))
        .ok_or_else(|| anyhow!("Image response carried no data"))?;
    let image_url = first
        .get("url")
        .and_then(|u| u.as_str())
        .ok_or_else(|| anyhow!("Image response carried no url"))?
        .to_string();
    let revised_prompt = first
        .get("revised_prompt")
        .and_then(|p| p.as_str())
        .map(str::to_string);

    Ok(GeneratedImage {
        image_url,
        revised_prompt,
    })
}

/// The completion message is itself a JSON document matching `ArticleDraft`.
pub fn parse_article_response(response: &serde_json::Value) -> Result<ArticleDraft> {
    let message = response
        .pointer("/choices/0/message/content")
        .and_then(|c| c.as_str())
        .ok_or_else(|| anyhow!("Completion response carried no message"))?;

    serde_json::from_str(message).context("Completion was not a valid article draft")
}
