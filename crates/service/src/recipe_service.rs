use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use tracing::info;
use uuid::Uuid;

use models::recipe;
use crate::errors::ServiceError;
use crate::storage::{already_claimed, commit, discard, prepare_image, retire, FileStore, ImageChange, Upload};

/// List every recipe.
pub async fn list_recipes(db: &DatabaseConnection) -> Result<Vec<recipe::Model>, ServiceError> {
    Ok(recipe::Entity::find().all(db).await?)
}

/// Get recipe by id, `NotFound` when absent.
pub async fn get_recipe(db: &DatabaseConnection, id: Uuid) -> Result<recipe::Model, ServiceError> {
    recipe::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("recipe", id))
}

/// Resolve the request's image; a referenced file must not belong to another recipe.
async fn resolve_image(
    db: &DatabaseConnection,
    store: &FileStore,
    owner: Option<Uuid>,
    upload: Option<&Upload>,
    referenced: Option<&str>,
) -> Result<ImageChange, ServiceError> {
    let change = prepare_image(store, upload, referenced).await?;
    if let ImageChange::Referenced(name) = &change {
        let mut others = recipe::Entity::find().filter(recipe::Column::RecipeImage.eq(name.as_str()));
        if let Some(id) = owner {
            others = others.filter(recipe::Column::Id.ne(id));
        }
        if others.count(db).await? > 0 {
            return Err(already_claimed(name));
        }
    }
    Ok(change)
}

/// Create a recipe, storing `image` first when one was uploaded.
pub async fn create_recipe(
    db: &DatabaseConnection,
    store: &FileStore,
    mut fields: recipe::RecipeFields,
    image: Option<Upload>,
) -> Result<recipe::Model, ServiceError> {
    let referenced = fields.recipe_image.take();
    let change = resolve_image(db, store, None, image.as_ref(), referenced.as_deref()).await?;
    let created = commit(store, &change, recipe::create(db, fields, change.or_keep(None))).await?;
    info!(id = %created.id, image = ?created.recipe_image, "recipe created");
    Ok(created)
}

/// Replace every field of an existing recipe.
///
/// The stored image is kept unless the request carries a new one, in which
/// case the old file is removed once the record points at the new one.
pub async fn update_recipe(
    db: &DatabaseConnection,
    store: &FileStore,
    id: Uuid,
    mut fields: recipe::RecipeFields,
    image: Option<Upload>,
) -> Result<recipe::Model, ServiceError> {
    let existing = get_recipe(db, id).await?;
    let referenced = fields.recipe_image.take();
    let change = resolve_image(db, store, Some(id), image.as_ref(), referenced.as_deref()).await?;
    let next_image = change.or_keep(existing.recipe_image.as_deref());

    let updated = commit(store, &change, fields.into_active_model(id, next_image).update(db)).await?;
    retire(store, existing.recipe_image.as_deref(), updated.recipe_image.as_deref()).await;
    info!(id = %id, "recipe updated");
    Ok(updated)
}

/// Delete a recipe and its image file.
pub async fn delete_recipe(db: &DatabaseConnection, store: &FileStore, id: Uuid) -> Result<(), ServiceError> {
    let existing = get_recipe(db, id).await?;
    if let Some(name) = existing.recipe_image.as_deref() {
        discard(store, name).await;
    }
    recipe::Entity::delete_by_id(id).exec(db).await?;
    info!(id = %id, "recipe deleted");
    Ok(())
}
