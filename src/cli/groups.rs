//! Groups command implementation

use crate::cli::output::{format_groups_json, format_groups_table, GroupView};
use crate::cli::ListArgs;
use crate::groups::GroupRepository;
use crate::store::KvStore;
use crate::templates::TemplateRepository;
use std::sync::Arc;

/// Handle `courier groups list` command
pub async fn handle_groups_list(args: &ListArgs) -> Result<String, Box<dyn std::error::Error>> {
    let store = args.store.connect().await?;
    let views = group_views(store).await?;

    if args.json {
        Ok(format_groups_json(&views)?)
    } else {
        Ok(format_groups_table(&views))
    }
}

/// Load every group and resolve its template ids against the saved templates.
async fn group_views(store: Arc<dyn KvStore>) -> Result<Vec<GroupView>, Box<dyn std::error::Error>> {
    let templates = TemplateRepository::new(Arc::clone(&store)).list().await?;
    let groups = GroupRepository::new(store).list().await?;
    Ok(groups
        .iter()
        .map(|g| GroupView::new(g, &templates))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::NewGroup;
    use crate::store::MemoryStore;
    use crate::templates::NewTemplate;

    #[tokio::test]
    async fn test_group_views_resolve_after_template_delete() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        let templates = TemplateRepository::new(Arc::clone(&store));
        let keep = templates
            .create(NewTemplate::new("keep", "http://x/1"))
            .await
            .unwrap();
        let drop = templates
            .create(NewTemplate::new("drop", "http://x/2"))
            .await
            .unwrap();
        GroupRepository::new(Arc::clone(&store))
            .create(NewGroup {
                name: Some("G".to_string()),
                template_ids: Some(vec![keep.id.clone(), drop.id.clone()]),
            })
            .await
            .unwrap();
        templates.delete(&drop.id).await.unwrap();

        let views = group_views(store).await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].templates, vec!["keep"]);
        assert_eq!(views[0].template_ids.len(), 2);
        assert_eq!(views[0].dangling, 1);
    }
}
