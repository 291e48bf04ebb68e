//! File-backed catalog tests using only types exported from the crate root.

use anyhow::Result;
use catalog::{CatalogError, CatalogService, Database, NewResource, ResourceId, UserId};
use tempfile::tempdir;

fn seed_user(service: &CatalogService, id: i64, name: &str) -> Result<()> {
    service.database().connection().execute(
        "INSERT INTO users (user_id, name) VALUES (?1, ?2)",
        rusqlite::params![id, name],
    )?;
    Ok(())
}

fn submission(user_id: i64) -> NewResource {
    NewResource {
        resource_name: "Crafting Interpreters".to_string(),
        author_name: "Nystrom".to_string(),
        url: "https://craftinginterpreters.com".to_string(),
        description: "Build two interpreters".to_string(),
        content_type: "book".to_string(),
        build_stage: "week 8".to_string(),
        opinion: "recommended".to_string(),
        opinion_reason: "great depth".to_string(),
        user_id: UserId::new(user_id),
    }
}

#[test]
fn catalog_survives_reopen() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("catalog.db");

    let resource_id = {
        let service = CatalogService::new(Database::open(&path)?);
        seed_user(&service, 1, "Ada")?;
        let resource = service.create_resource(&submission(1))?;
        service.set_vote(UserId::new(1), resource.resource_id, true)?;
        service.add_to_study_list(UserId::new(1), resource.resource_id)?;
        service.create_tag("compilers")?;
        resource.resource_id
    };

    let service = CatalogService::new(Database::open(&path)?);
    let resource = service.get_resource(resource_id)?;

    assert!(resource.matches(&submission(1)));
    assert_eq!(service.vote_tally(resource_id)?.likes, 1);
    assert_eq!(service.list_study_list(UserId::new(1))?.len(), 1);
    assert_eq!(service.list_tags()?.len(), 1);
    Ok(())
}

#[test]
fn foreign_keys_enforced_on_reopened_file() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("catalog.db");
    drop(Database::open(&path)?);

    let service = CatalogService::new(Database::open(&path)?);
    let result = service.create_comment(ResourceId::new(1), "orphan", UserId::new(1));

    assert!(matches!(result, Err(CatalogError::Invalid(_))));
    Ok(())
}
