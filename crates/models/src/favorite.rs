use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "favorite")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub recipe_name: String,
    pub reminder_date_time: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteFields {
    pub recipe_name: String,
    #[serde(default)]
    pub reminder_date_time: Option<DateTimeWithTimeZone>,
}

impl FavoriteFields {
    pub fn into_active_model(self, id: Uuid) -> ActiveModel {
        ActiveModel {
            id: Set(id),
            recipe_name: Set(self.recipe_name),
            reminder_date_time: Set(self.reminder_date_time),
        }
    }
}

pub async fn create(db: &DatabaseConnection, fields: FavoriteFields) -> Result<Model, errors::ModelError> {
    fields
        .into_active_model(Uuid::new_v4())
        .insert(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
