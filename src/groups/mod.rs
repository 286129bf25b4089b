//! Template groups.
//!
//! A group is a named, ordered list of template ids. The ids are weak
//! references: nothing checks them against the template collection on write,
//! and deleting a template leaves every group that lists it untouched.
//! Readers resolve ids with [`resolve_templates`], which drops ids that no
//! longer match a template.

use crate::ids::{compare_ids, next_id};
use crate::store::{KvStore, StoreError, GROUPS_KEY};
use crate::templates::Template;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// A named collection of template ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub template_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating a group.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroup {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub template_ids: Option<Vec<String>>,
}

/// Full replacement of a group's mutable fields.
///
/// An omitted `templateIds` replaces the list with an empty one.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub template_ids: Vec<String>,
}

#[derive(Error, Debug)]
pub enum GroupError {
    #[error("Name is required")]
    MissingName,

    #[error("Group not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Store-backed group collection.
#[derive(Clone)]
pub struct GroupRepository {
    store: Arc<dyn KvStore>,
}

impl GroupRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Validate and persist a new group.
    pub async fn create(&self, fields: NewGroup) -> Result<Group, GroupError> {
        let name = required(fields.name).ok_or(GroupError::MissingName)?;

        let created_at = Utc::now();
        let group = Group {
            id: next_id(created_at),
            name,
            template_ids: fields.template_ids.unwrap_or_default(),
            created_at,
        };

        self.store
            .hash_set(GROUPS_KEY, &group.id, encode(&group)?)
            .await?;

        tracing::debug!(id = %group.id, name = %group.name, "Group created");
        Ok(group)
    }

    /// Every stored group in creation order. Unreadable records are skipped.
    pub async fn list(&self) -> Result<Vec<Group>, GroupError> {
        let raw = self.store.hash_values(GROUPS_KEY).await?;
        let mut groups: Vec<Group> = raw.iter().filter_map(|r| decode(r)).collect();
        groups.sort_by(|a, b| compare_ids(&a.id, &b.id));
        Ok(groups)
    }

    /// Replace the name and template list of an existing group.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::NotFound` if no group with `id` exists, including
    /// when it is deleted while the update is in flight.
    pub async fn update(&self, id: &str, update: GroupUpdate) -> Result<Group, GroupError> {
        let name = required(update.name).ok_or(GroupError::MissingName)?;

        let existing = self
            .store
            .hash_get(GROUPS_KEY, id)
            .await?
            .ok_or_else(|| GroupError::NotFound(id.to_string()))?;
        let existing: Group = serde_json::from_str(&existing).map_err(StoreError::from)?;

        let group = Group {
            id: existing.id,
            name,
            template_ids: update.template_ids,
            created_at: existing.created_at,
        };

        let written = self
            .store
            .hash_replace(GROUPS_KEY, id, encode(&group)?)
            .await?;
        if !written {
            return Err(GroupError::NotFound(id.to_string()));
        }

        tracing::debug!(id = %id, templates = group.template_ids.len(), "Group updated");
        Ok(group)
    }

    /// Remove a group. Removing an unknown id succeeds. Templates are never
    /// touched.
    pub async fn delete(&self, id: &str) -> Result<(), GroupError> {
        let removed = self.store.hash_delete(GROUPS_KEY, id).await?;
        tracing::debug!(id = %id, removed, "Group delete");
        Ok(())
    }
}

/// Map a group's template ids to templates, in group order.
///
/// Ids with no matching template are dropped; repeated ids yield repeated
/// entries.
pub fn resolve_templates<'a>(group: &Group, templates: &'a [Template]) -> Vec<&'a Template> {
    let by_id: HashMap<&str, &Template> = templates.iter().map(|t| (t.id.as_str(), t)).collect();
    group
        .template_ids
        .iter()
        .filter_map(|id| by_id.get(id.as_str()).copied())
        .collect()
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn encode(group: &Group) -> Result<String, StoreError> {
    Ok(serde_json::to_string(group)?)
}

fn decode(raw: &str) -> Option<Group> {
    match serde_json::from_str(raw) {
        Ok(group) => Some(group),
        Err(e) => {
            tracing::warn!(error = %e, "Skipping malformed group record");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::templates::{NewTemplate, TemplateRepository};

    fn repositories() -> (GroupRepository, TemplateRepository) {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        (
            GroupRepository::new(store.clone()),
            TemplateRepository::new(store),
        )
    }

    fn new_group(name: &str, template_ids: &[&str]) -> NewGroup {
        NewGroup {
            name: Some(name.to_string()),
            template_ids: Some(template_ids.iter().map(|s| s.to_string()).collect()),
        }
    }

    #[tokio::test]
    async fn test_create_defaults_to_empty_template_ids() {
        let (groups, _) = repositories();
        let group = groups
            .create(NewGroup {
                name: Some("Empty".to_string()),
                template_ids: None,
            })
            .await
            .unwrap();

        assert!(group.template_ids.is_empty());
        assert_eq!(groups.list().await.unwrap(), vec![group]);
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let (groups, _) = repositories();
        let result = groups.create(new_group("  ", &["1"])).await;

        assert!(matches!(result, Err(GroupError::MissingName)));
        assert!(groups.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_allows_unknown_and_duplicate_ids() {
        let (groups, _) = repositories();
        let group = groups
            .create(new_group("G", &["missing", "missing"]))
            .await
            .unwrap();

        assert_eq!(group.template_ids, vec!["missing", "missing"]);
    }

    #[tokio::test]
    async fn test_template_delete_does_not_cascade() {
        let (groups, templates) = repositories();
        let template = templates
            .create(NewTemplate::new("T", "http://x"))
            .await
            .unwrap();
        let group = groups
            .create(new_group("G", &[template.id.as_str()]))
            .await
            .unwrap();

        templates.delete(&template.id).await.unwrap();

        let all = groups.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, group.id);
        assert_eq!(all[0].template_ids, vec![template.id]);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let (groups, _) = repositories();
        let group = groups.create(new_group("G1", &["a", "b"])).await.unwrap();

        let updated = groups
            .update(
                &group.id,
                GroupUpdate {
                    name: Some("G2".to_string()),
                    template_ids: vec![],
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "G2");
        assert!(updated.template_ids.is_empty());
        assert_eq!(updated.created_at, group.created_at);
        assert_eq!(groups.list().await.unwrap(), vec![updated]);
    }

    #[tokio::test]
    async fn test_update_missing_group_is_not_found() {
        let (groups, _) = repositories();
        let result = groups
            .update(
                "nope",
                GroupUpdate {
                    name: Some("G".to_string()),
                    template_ids: vec![],
                },
            )
            .await;

        assert!(matches!(result, Err(GroupError::NotFound(ref id)) if id == "nope"));
        assert!(groups.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_requires_name() {
        let (groups, _) = repositories();
        let group = groups.create(new_group("G1", &["a"])).await.unwrap();

        let result = groups.update(&group.id, GroupUpdate::default()).await;
        assert!(matches!(result, Err(GroupError::MissingName)));
        assert_eq!(groups.list().await.unwrap(), vec![group]);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_and_keeps_templates() {
        let (groups, templates) = repositories();
        let template = templates
            .create(NewTemplate::new("T", "http://x"))
            .await
            .unwrap();
        let group = groups
            .create(new_group("G", &[template.id.as_str()]))
            .await
            .unwrap();

        groups.delete(&group.id).await.unwrap();
        groups.delete(&group.id).await.unwrap();

        assert!(groups.list().await.unwrap().is_empty());
        assert_eq!(templates.list().await.unwrap(), vec![template]);
    }

    #[tokio::test]
    async fn test_resolve_templates_drops_dangling_ids() {
        let (groups, templates) = repositories();
        let first = templates
            .create(NewTemplate::new("first", "http://x/1"))
            .await
            .unwrap();
        let second = templates
            .create(NewTemplate::new("second", "http://x/2"))
            .await
            .unwrap();
        let group = groups
            .create(new_group(
                "G",
                &[
                    second.id.as_str(),
                    "gone",
                    first.id.as_str(),
                    second.id.as_str(),
                ],
            ))
            .await
            .unwrap();

        let all = templates.list().await.unwrap();
        let names: Vec<_> = resolve_templates(&group, &all)
            .into_iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["second", "first", "second"]);
    }
}
