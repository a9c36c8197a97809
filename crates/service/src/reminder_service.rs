use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::info;
use uuid::Uuid;

use models::reminder;
use crate::errors::ServiceError;

pub async fn list_reminders(db: &DatabaseConnection) -> Result<Vec<reminder::Model>, ServiceError> {
    Ok(reminder::Entity::find().order_by_asc(reminder::Column::RemindAt).all(db).await?)
}

/// Reminders of one user, soonest first.
pub async fn list_by_user(db: &DatabaseConnection, user_id: &str) -> Result<Vec<reminder::Model>, ServiceError> {
    let rows = reminder::Entity::find()
        .filter(reminder::Column::UserId.eq(user_id))
        .order_by_asc(reminder::Column::RemindAt)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn get_reminder(db: &DatabaseConnection, id: Uuid) -> Result<reminder::Model, ServiceError> {
    reminder::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("reminder", id))
}

pub async fn create_reminder(
    db: &DatabaseConnection,
    fields: reminder::ReminderFields,
) -> Result<reminder::Model, ServiceError> {
    if fields.user_id.trim().is_empty() || fields.challenge_id.trim().is_empty() {
        return Err(ServiceError::Validation("userId and challengeId are required".into()));
    }
    let created = reminder::create(db, fields).await?;
    info!(id = %created.id, user_id = %created.user_id, "reminder created");
    Ok(created)
}

pub async fn update_reminder(
    db: &DatabaseConnection,
    id: Uuid,
    fields: reminder::ReminderFields,
) -> Result<reminder::Model, ServiceError> {
    get_reminder(db, id).await?;
    let updated = fields.into_active_model(id).update(db).await?;
    info!(id = %id, "reminder updated");
    Ok(updated)
}

pub async fn delete_reminder(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    get_reminder(db, id).await?;
    reminder::Entity::delete_by_id(id).exec(db).await?;
    info!(id = %id, "reminder deleted");
    Ok(())
}
