use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reminder")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub user_id: String,
    #[sea_orm(column_type = "Text")]
    pub challenge_id: String,
    pub remind_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderFields {
    #[serde(deserialize_with = "crate::serde_ext::opaque_id")]
    pub user_id: String,
    #[serde(deserialize_with = "crate::serde_ext::opaque_id")]
    pub challenge_id: String,
    pub remind_at: DateTimeWithTimeZone,
}

impl ReminderFields {
    pub fn into_active_model(self, id: Uuid) -> ActiveModel {
        ActiveModel {
            id: Set(id),
            user_id: Set(self.user_id),
            challenge_id: Set(self.challenge_id),
            remind_at: Set(self.remind_at),
        }
    }
}

pub async fn create(db: &DatabaseConnection, fields: ReminderFields) -> Result<Model, errors::ModelError> {
    fields
        .into_active_model(Uuid::new_v4())
        .insert(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
