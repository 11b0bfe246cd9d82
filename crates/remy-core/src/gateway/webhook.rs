//! HTTP client for the recipe parsing webhook.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

use super::{ParseOutcome, RecipeParser};
use crate::{
    error::{CookingError, Result},
    models::Recipe,
};

/// Posts `{ "url": ... }` to the parsing webhook and interprets its answer.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: Client,
    endpoint: String,
}

impl WebhookClient {
    /// Create a client for the given webhook endpoint.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CookingError::gateway("Failed to create HTTP client", e))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Submit a URL and return the raw JSON answer (`null` for an empty or
    /// non-JSON body).
    pub async fn submit_raw(&self, url: &str) -> Result<Value> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "url": url }))
            .send()
            .await
            .map_err(|e| CookingError::gateway("Failed to reach recipe webhook", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CookingError::Gateway {
                message: format!("recipe webhook answered {status}"),
                source: None,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CookingError::gateway("Failed to read recipe webhook response", e))?;

        Ok(serde_json::from_str(&body).unwrap_or(Value::Null))
    }
}

/// Classifies a webhook answer.
///
/// A body carrying `recipe_steps` is a full recipe (a single-element array
/// is unwrapped, as row-returning backends answer with arrays); one carrying
/// `id` or `recipe_id` is a reference; anything else is a bare
/// acknowledgement.
pub fn interpret_response(value: Value, submitted_url: &str) -> Result<ParseOutcome> {
    let value = match value {
        Value::Array(mut items) if items.len() == 1 => items.remove(0),
        other => other,
    };

    let Value::Object(fields) = &value else {
        return Ok(ParseOutcome::Accepted);
    };

    if fields.contains_key("recipe_steps") {
        let mut recipe: Recipe = serde_json::from_value(value).map_err(|e| CookingError::Gateway {
            message: format!("recipe webhook returned a malformed recipe: {e}"),
            source: None,
        })?;
        if recipe.source_url.trim().is_empty() {
            recipe.source_url = submitted_url.to_string();
        }
        return Ok(ParseOutcome::Parsed(recipe));
    }

    let reference = ["id", "recipe_id"]
        .iter()
        .filter_map(|key| fields.get(*key))
        .find_map(|id| match id {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

    Ok(match reference {
        Some(id) => ParseOutcome::Reference(id),
        None => ParseOutcome::Accepted,
    })
}

#[async_trait]
impl RecipeParser for WebhookClient {
    async fn submit(&self, url: &str) -> Result<ParseOutcome> {
        debug!("Submitting {url} to recipe webhook");
        let value = self.submit_raw(url).await?;
        interpret_response(value, url)
    }
}
