use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait};
use tracing::info;
use uuid::Uuid;

use models::favorite;
use crate::errors::ServiceError;

pub async fn list_favorites(db: &DatabaseConnection) -> Result<Vec<favorite::Model>, ServiceError> {
    Ok(favorite::Entity::find().all(db).await?)
}

pub async fn get_favorite(db: &DatabaseConnection, id: Uuid) -> Result<favorite::Model, ServiceError> {
    favorite::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("favorite", id))
}

pub async fn create_favorite(
    db: &DatabaseConnection,
    fields: favorite::FavoriteFields,
) -> Result<favorite::Model, ServiceError> {
    let created = favorite::create(db, fields).await?;
    info!(id = %created.id, "favorite created");
    Ok(created)
}

/// Replace name and reminder time; a missing time clears it.
pub async fn update_favorite(
    db: &DatabaseConnection,
    id: Uuid,
    fields: favorite::FavoriteFields,
) -> Result<favorite::Model, ServiceError> {
    get_favorite(db, id).await?;
    let updated = fields.into_active_model(id).update(db).await?;
    info!(id = %id, "favorite updated");
    Ok(updated)
}

pub async fn delete_favorite(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    get_favorite(db, id).await?;
    favorite::Entity::delete_by_id(id).exec(db).await?;
    info!(id = %id, "favorite deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn favorite_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let at = Utc.with_ymd_and_hms(2025, 7, 4, 12, 0, 0).unwrap();
        let f = create_favorite(
            &db,
            favorite::FavoriteFields { recipe_name: "Paella".into(), reminder_date_time: Some(at.into()) },
        )
        .await?;
        assert_eq!(get_favorite(&db, f.id).await?, f);

        let cleared = update_favorite(
            &db,
            f.id,
            favorite::FavoriteFields { recipe_name: "Seafood Paella".into(), reminder_date_time: None },
        )
        .await?;
        assert_eq!(cleared.recipe_name, "Seafood Paella");
        assert!(cleared.reminder_date_time.is_none());

        assert_eq!(list_favorites(&db).await?.len(), 1);
        delete_favorite(&db, f.id).await?;
        assert!(list_favorites(&db).await?.is_empty());
        assert!(matches!(delete_favorite(&db, f.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_favorite_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let res = update_favorite(
            &db,
            Uuid::new_v4(),
            favorite::FavoriteFields { recipe_name: "x".into(), reminder_date_time: None },
        )
        .await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        assert!(list_favorites(&db).await?.is_empty());
        Ok(())
    }
}
