use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use tracing::{info, warn};
use uuid::Uuid;

use models::cooking_challenge as challenge;
use crate::errors::ServiceError;
use crate::storage::{already_claimed, commit, discard, prepare_image, retire, FileStore, ImageChange, Upload};

pub async fn list_challenges(db: &DatabaseConnection) -> Result<Vec<challenge::Model>, ServiceError> {
    Ok(challenge::Entity::find().all(db).await?)
}

pub async fn get_challenge(db: &DatabaseConnection, id: Uuid) -> Result<challenge::Model, ServiceError> {
    challenge::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("challenge", id))
}

fn check_dates(fields: &challenge::ChallengeFields) {
    if fields.end_date < fields.start_date {
        warn!(start = %fields.start_date, end = %fields.end_date, "challenge ends before it starts");
    }
}

async fn resolve_image(
    db: &DatabaseConnection,
    store: &FileStore,
    owner: Option<Uuid>,
    upload: Option<&Upload>,
    referenced: Option<&str>,
) -> Result<ImageChange, ServiceError> {
    let change = prepare_image(store, upload, referenced).await?;
    if let ImageChange::Referenced(name) = &change {
        let mut others = challenge::Entity::find().filter(challenge::Column::ChallengeImage.eq(name.as_str()));
        if let Some(id) = owner {
            others = others.filter(challenge::Column::Id.ne(id));
        }
        if others.count(db).await? > 0 {
            return Err(already_claimed(name));
        }
    }
    Ok(change)
}

/// Create a challenge with an optional image.
pub async fn create_challenge(
    db: &DatabaseConnection,
    store: &FileStore,
    mut fields: challenge::ChallengeFields,
    image: Option<Upload>,
) -> Result<challenge::Model, ServiceError> {
    check_dates(&fields);
    let referenced = fields.challenge_image.take();
    let change = resolve_image(db, store, None, image.as_ref(), referenced.as_deref()).await?;
    let created = commit(store, &change, challenge::create(db, fields, change.or_keep(None))).await?;
    info!(id = %created.id, image = ?created.challenge_image, "challenge created");
    Ok(created)
}

/// Full replace; the image only changes when a new one is supplied.
pub async fn update_challenge(
    db: &DatabaseConnection,
    store: &FileStore,
    id: Uuid,
    mut fields: challenge::ChallengeFields,
    image: Option<Upload>,
) -> Result<challenge::Model, ServiceError> {
    let existing = get_challenge(db, id).await?;
    check_dates(&fields);
    let referenced = fields.challenge_image.take();
    let change = resolve_image(db, store, Some(id), image.as_ref(), referenced.as_deref()).await?;
    let next_image = change.or_keep(existing.challenge_image.as_deref());

    let updated = commit(store, &change, fields.into_active_model(id, next_image).update(db)).await?;
    retire(store, existing.challenge_image.as_deref(), updated.challenge_image.as_deref()).await;
    info!(id = %id, "challenge updated");
    Ok(updated)
}

pub async fn delete_challenge(db: &DatabaseConnection, store: &FileStore, id: Uuid) -> Result<(), ServiceError> {
    let existing = get_challenge(db, id).await?;
    if let Some(name) = existing.challenge_image.as_deref() {
        discard(store, name).await;
    }
    challenge::Entity::delete_by_id(id).exec(db).await?;
    info!(id = %id, "challenge deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::storage::{load_image, store_image, StorageError};
    use crate::test_support::{cleanup, get_db, temp_store};

    fn fields(title: &str) -> challenge::ChallengeFields {
        challenge::ChallengeFields {
            title: title.into(),
            details: "Cook something green every day".into(),
            rules: "No frozen vegetables".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
            challenge_image: None,
        }
    }

    #[tokio::test]
    async fn challenge_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let store = temp_store("challenges");

        let created = create_challenge(&db, &store, fields("Green April"), Some(Upload::new("leaf.webp", b"w".to_vec()))).await?;
        let image = created.challenge_image.clone().expect("image stored");
        assert_eq!(get_challenge(&db, created.id).await?, created);

        let mut next = fields("Greener April");
        next.end_date = NaiveDate::from_ymd_opt(2025, 5, 2).unwrap();
        let updated = update_challenge(&db, &store, created.id, next, None).await?;
        assert_eq!(updated.title, "Greener April");
        assert_eq!(updated.end_date, NaiveDate::from_ymd_opt(2025, 5, 2).unwrap());
        assert_eq!(updated.challenge_image.as_deref(), Some(image.as_str()));

        delete_challenge(&db, &store, created.id).await?;
        assert!(matches!(get_challenge(&db, created.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(load_image(&store, &image).await, Err(ServiceError::NotFound(_))));
        cleanup(&store).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_challenge_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let store = temp_store("challenges");
        let res = update_challenge(&db, &store, Uuid::new_v4(), fields("x"), None).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        assert!(list_challenges(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn invalid_image_names_are_rejected() {
        let store = temp_store("challenges");
        assert!(matches!(
            load_image(&store, "../etc/passwd").await,
            Err(ServiceError::Storage(StorageError::InvalidName(_)))
        ));
    }

    #[tokio::test]
    async fn referenced_image_cannot_be_shared() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let store = temp_store("challenges");

        let name = store_image(&store, &Upload::new("bake.png", b"png".to_vec()), "challenge").await?;
        let mut with_image = fields("Bake Off");
        with_image.challenge_image = Some(name.clone());
        create_challenge(&db, &store, with_image.clone(), None).await?;

        let res = create_challenge(&db, &store, with_image, None).await;
        assert!(matches!(res, Err(ServiceError::Validation(msg)) if msg.contains("already used")));
        assert_eq!(list_challenges(&db).await?.len(), 1);
        cleanup(&store).await;
        Ok(())
    }
}
