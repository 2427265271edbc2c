// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gemini client for training advice and run photo analysis.
//!
//! Both features degrade silently: any failure (missing key, transport,
//! HTTP status, unparsable output) is logged and replaced with a fixed
//! fallback, so callers only ever see content.

use crate::config::Config;
use crate::models::RunAnalysis;
use crate::services::http::{build_client, check_response_json, ClientError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Advice shown when the service call fails.
pub const ADVICE_FALLBACK: &str = "Отличная работа на этой неделе!";

/// Advice shown when the service answers with no text.
pub const ADVICE_EMPTY: &str = "Продолжай в том же духе!";

/// Instruction sent along with a run photo.
const ANALYSIS_PROMPT: &str = "Ты — профессиональный тренер по бегу. Проанализируй это изображение.

1. Если это фото экрана беговой дорожки или смарт-часов, попытайся извлечь:
   - Дистанцию (в километрах).
   - Время (в минутах).
2. Если данных нет, оцени место пробежки (лес, город, стадион) по фото.
3. Напиши короткий, мотивирующий комментарий на русском языке (максимум 2 предложения), основываясь на увиденном.

Верни ответ строго в формате JSON.";

/// Photos are always sent as JPEG.
const ANALYSIS_IMAGE_MIME: &str = "image/jpeg";

// ─── API Request/Response Types ──────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if it has any.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| match p {
                Part::Text { text } => Some(text.as_str()),
                Part::InlineData { .. } => None,
            })
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Output schema declared for photo analysis. Every field is optional.
fn analysis_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "distance": { "type": "NUMBER", "description": "Distance in km if visible, else null" },
            "duration": { "type": "NUMBER", "description": "Duration in minutes if visible, else null" },
            "notes": { "type": "STRING", "description": "Short description of the environment or context" },
            "feedback": { "type": "STRING", "description": "Motivational feedback in Russian" }
        }
    })
}

fn advice_prompt(total_distance: f64, run_count: usize) -> String {
    format!(
        "У бегуна за эту неделю такая статистика: {total_distance} км за {run_count} пробежек.\n\
         Дай очень краткий совет (одно предложение) на следующую неделю на русском языке."
    )
}

// ─── Client ──────────────────────────────────────────────────

/// Gemini REST client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(base_url: String, model: String, api_key: Option<String>) -> Self {
        Self {
            http: build_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.gemini_base_url.clone(),
            config.gemini_model.clone(),
            config.gemini_api_key.clone(),
        )
    }

    /// One sentence of advice for the coming week.
    ///
    /// Never fails; see [`ADVICE_FALLBACK`] and [`ADVICE_EMPTY`].
    pub async fn weekly_advice(&self, total_distance: f64, run_count: usize) -> String {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part::Text {
                    text: advice_prompt(total_distance, run_count),
                }],
            }],
            generation_config: None,
        };

        match self.generate(&request).await {
            Ok(Some(text)) => text.trim().to_string(),
            Ok(None) => ADVICE_EMPTY.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Advice request failed, using fallback");
                ADVICE_FALLBACK.to_string()
            }
        }
    }

    /// Extract run data and a comment from a photo.
    ///
    /// Never fails: on error the result carries only the fallback feedback.
    pub async fn analyze_run_image(&self, image: &[u8]) -> RunAnalysis {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: ANALYSIS_IMAGE_MIME.to_string(),
                            data: STANDARD.encode(image),
                        },
                    },
                    Part::Text {
                        text: ANALYSIS_PROMPT.to_string(),
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: analysis_schema(),
            }),
        };

        let result = self.generate(&request).await.and_then(|text| match text {
            Some(text) => serde_json::from_str::<RunAnalysis>(&text)
                .map_err(|e| ClientError::Parse(format!("analysis is not valid JSON: {e}"))),
            None => Ok(RunAnalysis::default()),
        });

        match result {
            Ok(analysis) => {
                tracing::debug!(
                    distance = ?analysis.distance,
                    duration = ?analysis.duration,
                    "Photo analyzed"
                );
                analysis
            }
            Err(e) => {
                tracing::warn!(error = %e, "Photo analysis failed, using fallback");
                RunAnalysis::fallback()
            }
        }
    }

    /// Call `generateContent` and return the first candidate's text.
    async fn generate(&self, request: &GenerateRequest) -> Result<Option<String>, ClientError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ClientError::NotConfigured("GEMINI_API_KEY"))?;

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await?;

        let body: GenerateResponse = check_response_json(response).await?;
        Ok(body.text())
    }
}
