use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub ingredients: String,
    #[sea_orm(column_type = "Text")]
    pub steps: String,
    #[sea_orm(column_type = "Text")]
    pub time: String,
    #[sea_orm(column_type = "Text")]
    #[serde(rename = "type")]
    pub recipe_type: String,
    #[sea_orm(column_type = "Text")]
    pub category: String,
    /// Generated name of a file in the recipe upload directory.
    pub recipe_image: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Every client-writable recipe field. Create and update both take the full set.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFields {
    pub title: String,
    pub description: String,
    pub ingredients: String,
    pub steps: String,
    pub time: String,
    #[serde(rename = "type")]
    pub recipe_type: String,
    pub category: String,
    /// Name of an image already uploaded through the standalone image endpoint.
    #[serde(default)]
    pub recipe_image: Option<String>,
}

impl RecipeFields {
    /// Active model with every column set, ready for insert or full-replace update.
    pub fn into_active_model(self, id: Uuid, recipe_image: Option<String>) -> ActiveModel {
        ActiveModel {
            id: Set(id),
            title: Set(self.title),
            description: Set(self.description),
            ingredients: Set(self.ingredients),
            steps: Set(self.steps),
            time: Set(self.time),
            recipe_type: Set(self.recipe_type),
            category: Set(self.category),
            recipe_image: Set(recipe_image),
        }
    }
}

pub async fn create(
    db: &DatabaseConnection,
    fields: RecipeFields,
    recipe_image: Option<String>,
) -> Result<Model, errors::ModelError> {
    let am = fields.into_active_model(Uuid::new_v4(), recipe_image);
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
