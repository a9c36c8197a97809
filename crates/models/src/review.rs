use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub recipe_id: String,
    #[sea_orm(column_type = "Text")]
    pub reviewer_name: String,
    pub rating: i32,
    #[sea_orm(column_type = "Text")]
    pub review_text: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFields {
    /// Parent recipe; may be omitted when the route already names it.
    #[serde(default, deserialize_with = "crate::serde_ext::opaque_id")]
    pub recipe_id: String,
    #[serde(alias = "author")]
    pub reviewer_name: String,
    pub rating: i32,
    #[serde(alias = "text", alias = "comment")]
    pub review_text: String,
}

pub fn validate_rating(rating: i32) -> Result<(), errors::ModelError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(errors::ModelError::Validation(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )));
    }
    Ok(())
}

impl ReviewFields {
    pub fn into_active_model(
        self,
        id: Uuid,
        created_at: DateTimeWithTimeZone,
        updated_at: DateTimeWithTimeZone,
    ) -> ActiveModel {
        ActiveModel {
            id: Set(id),
            recipe_id: Set(self.recipe_id),
            reviewer_name: Set(self.reviewer_name),
            rating: Set(self.rating),
            review_text: Set(self.review_text),
            created_at: Set(created_at),
            updated_at: Set(updated_at),
        }
    }
}

pub async fn create(db: &DatabaseConnection, fields: ReviewFields) -> Result<Model, errors::ModelError> {
    validate_rating(fields.rating)?;
    let now: DateTimeWithTimeZone = Utc::now().into();
    let am = fields.into_active_model(Uuid::new_v4(), now, now);
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
