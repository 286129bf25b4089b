//! Saved request templates.
//!
//! Templates are immutable once created: the only mutations are create and
//! delete. Each template is stored as JSON under its id in the
//! `request_templates` hash.

use crate::ids::{compare_ids, next_id};
use crate::proxy::normalize_method;
use crate::store::{KvStore, StoreError, TEMPLATES_KEY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// A reusable request definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub method: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when saving a template.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NewTemplate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<Value>,
}

impl NewTemplate {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            url: Some(url.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Name and URL are required")]
    MissingField,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Store-backed template collection.
#[derive(Clone)]
pub struct TemplateRepository {
    store: Arc<dyn KvStore>,
}

impl TemplateRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Validate and persist a new template.
    pub async fn create(&self, fields: NewTemplate) -> Result<Template, TemplateError> {
        let name = required(fields.name).ok_or(TemplateError::MissingField)?;
        let url = required(fields.url).ok_or(TemplateError::MissingField)?;

        let created_at = Utc::now();
        let template = Template {
            id: next_id(created_at),
            name,
            method: normalize_method(fields.method.as_deref()),
            url,
            headers: fields.headers,
            body: fields.body.filter(|b| !b.is_null()),
            created_at,
        };

        let payload = serde_json::to_string(&template).map_err(StoreError::from)?;
        self.store
            .hash_set(TEMPLATES_KEY, &template.id, payload)
            .await?;

        tracing::debug!(id = %template.id, name = %template.name, "Template created");
        Ok(template)
    }

    /// Look up one template.
    pub async fn get(&self, id: &str) -> Result<Option<Template>, TemplateError> {
        let raw = self.store.hash_get(TEMPLATES_KEY, id).await?;
        Ok(raw.and_then(|r| decode(&r)))
    }

    /// Every stored template in creation order. Unreadable records are skipped.
    pub async fn list(&self) -> Result<Vec<Template>, TemplateError> {
        let raw = self.store.hash_values(TEMPLATES_KEY).await?;
        let mut templates: Vec<Template> = raw.iter().filter_map(|r| decode(r)).collect();
        templates.sort_by(|a, b| compare_ids(&a.id, &b.id));
        Ok(templates)
    }

    /// Remove a template. Removing an unknown id succeeds.
    ///
    /// Groups that list the id keep it.
    pub async fn delete(&self, id: &str) -> Result<(), TemplateError> {
        let removed = self.store.hash_delete(TEMPLATES_KEY, id).await?;
        tracing::debug!(id = %id, removed, "Template delete");
        Ok(())
    }
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn decode(raw: &str) -> Option<Template> {
    match serde_json::from_str(raw) {
        Ok(template) => Some(template),
        Err(e) => {
            tracing::warn!(error = %e, "Skipping malformed template record");
            None
        }
    }
}
