//! services/console/src/adapters/classifier_http.rs
//!
//! This module contains the adapter for the email classification service.
//! It implements the `ClassifierGateway` port from the `assistant_core` crate.

use async_trait::async_trait;
use assistant_core::{
    domain::{ClassifierResponse, EmailInput},
    ports::{ClassifierGateway, GatewayResult},
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{read_json, transport_error};

#[derive(Debug, Serialize)]
struct ClassifyBody<'a> {
    subject: &'a str,
    text: &'a str,
    from_email: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    classification: Classification,
    reply_text: String,
    #[serde(default)]
    used_tools: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct Classification {
    label_id: String,
    #[serde(default)]
    gmail_label: String,
    confidence: f64,
    #[serde(default)]
    category: String,
}

/// An adapter that implements `ClassifierGateway` over the service's REST API.
#[derive(Clone)]
pub struct HttpClassifierGateway {
    client: Client,
    base_url: String,
}

impl HttpClassifierGateway {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ClassifierGateway for HttpClassifierGateway {
    async fn classify_email(&self, email: &EmailInput) -> GatewayResult<ClassifierResponse> {
        let url = format!("{}/api/v1/email/classify", self.base_url);
        let body = ClassifyBody {
            subject: &email.subject,
            text: &email.text,
            from_email: email.from_email.as_deref().filter(|from| !from.is_empty()),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        let classified: ClassifyResponse = read_json(response).await?;

        debug!(
            label = %classified.classification.label_id,
            confidence = classified.classification.confidence,
            "Classifier responded."
        );
        Ok(ClassifierResponse {
            label_id: classified.classification.label_id,
            gmail_label: classified.classification.gmail_label,
            confidence: classified.classification.confidence,
            category: classified.classification.category,
            reply_text: classified.reply_text,
            used_tools: classified.used_tools.unwrap_or_default(),
        })
    }
}
