use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;

use models::review;
use crate::errors::ServiceError;

pub async fn list_reviews(db: &DatabaseConnection) -> Result<Vec<review::Model>, ServiceError> {
    Ok(review::Entity::find().order_by_asc(review::Column::CreatedAt).all(db).await?)
}

/// Reviews attached to one recipe, oldest first.
pub async fn list_by_recipe(db: &DatabaseConnection, recipe_id: &str) -> Result<Vec<review::Model>, ServiceError> {
    let rows = review::Entity::find()
        .filter(review::Column::RecipeId.eq(recipe_id))
        .order_by_asc(review::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn get_review(db: &DatabaseConnection, id: Uuid) -> Result<review::Model, ServiceError> {
    review::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("review", id))
}

pub async fn create_review(db: &DatabaseConnection, fields: review::ReviewFields) -> Result<review::Model, ServiceError> {
    if fields.recipe_id.trim().is_empty() {
        return Err(ServiceError::Validation("recipeId is required".into()));
    }
    let created = review::create(db, fields).await?;
    info!(id = %created.id, recipe_id = %created.recipe_id, rating = created.rating, "review created");
    Ok(created)
}

/// Create a review bound to `recipe_id`, ignoring any id in the body.
pub async fn create_for_recipe(
    db: &DatabaseConnection,
    recipe_id: &str,
    mut fields: review::ReviewFields,
) -> Result<review::Model, ServiceError> {
    fields.recipe_id = recipe_id.to_string();
    create_review(db, fields).await
}

/// Replace reviewer, rating and text. The recipe link and `createdAt` stay.
pub async fn update_review(
    db: &DatabaseConnection,
    id: Uuid,
    fields: review::ReviewFields,
) -> Result<review::Model, ServiceError> {
    let existing = get_review(db, id).await?;
    review::validate_rating(fields.rating)?;

    let mut am: review::ActiveModel = existing.into();
    am.reviewer_name = Set(fields.reviewer_name);
    am.rating = Set(fields.rating);
    am.review_text = Set(fields.review_text);
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;
    info!(id = %id, "review updated");
    Ok(updated)
}

pub async fn delete_review(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    get_review(db, id).await?;
    review::Entity::delete_by_id(id).exec(db).await?;
    info!(id = %id, "review deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn fields(recipe_id: &str, rating: i32) -> review::ReviewFields {
        review::ReviewFields {
            recipe_id: recipe_id.into(),
            reviewer_name: "Sam".into(),
            rating,
            review_text: "Tasty".into(),
        }
    }

    #[tokio::test]
    async fn review_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let r = create_review(&db, fields("r1", 4)).await?;
        assert_eq!(get_review(&db, r.id).await?, r);

        let mut next = fields("other", 2);
        next.review_text = "Too salty".into();
        let updated = update_review(&db, r.id, next).await?;
        assert_eq!(updated.rating, 2);
        assert_eq!(updated.review_text, "Too salty");
        assert_eq!(updated.recipe_id, "r1");
        assert_eq!(updated.created_at, r.created_at);
        assert!(updated.updated_at >= r.updated_at);

        delete_review(&db, r.id).await?;
        assert!(matches!(get_review(&db, r.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(delete_review(&db, r.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn reviews_filter_by_recipe() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        create_review(&db, fields("a", 5)).await?;
        create_for_recipe(&db, "b", fields("ignored", 3)).await?;
        create_for_recipe(&db, "a", fields("", 1)).await?;

        let a = list_by_recipe(&db, "a").await?;
        assert_eq!(a.len(), 2);
        assert!(a.iter().all(|r| r.recipe_id == "a"));
        assert_eq!(list_by_recipe(&db, "b").await?.len(), 1);
        assert!(list_by_recipe(&db, "zzz").await?.is_empty());
        assert_eq!(list_reviews(&db).await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_reviews_are_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        assert!(matches!(create_review(&db, fields("", 3)).await, Err(ServiceError::Validation(_))));
        assert!(matches!(create_review(&db, fields("a", 9)).await, Err(ServiceError::Model(_))));

        let ok = create_review(&db, fields("a", 3)).await?;
        assert!(update_review(&db, ok.id, fields("a", 0)).await.is_err());
        assert_eq!(get_review(&db, ok.id).await?.rating, 3);
        assert!(matches!(update_review(&db, Uuid::new_v4(), fields("a", 3)).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
