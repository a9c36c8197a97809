use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorBody { pub error: String, pub message: Option<String> }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct StoredImageDoc { pub file_name: String }

/// Any file part; the first non-empty one is stored.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ImageUploadDoc {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Recipe body. Sent as JSON, or as multipart text parts plus an
/// `image`/`recipeImage` file part.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct RecipeInputDoc {
    pub title: String,
    pub description: String,
    pub ingredients: String,
    pub steps: String,
    pub time: String,
    #[schema(rename = "type")]
    pub recipe_type: String,
    pub category: String,
    /// Name returned by `POST /recipes/images`
    pub recipe_image: Option<String>,
}

/// Challenge body; the image part may be named `image`, `challengeImage` or `file`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ChallengeInputDoc {
    pub title: String,
    pub details: String,
    pub rules: String,
    #[schema(example = "2025-03-01")]
    pub start_date: String,
    #[schema(example = "2025-03-07")]
    pub end_date: String,
    pub challenge_image: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ReviewInputDoc {
    pub recipe_id: Option<String>,
    pub reviewer_name: String,
    /// 1 to 5
    pub rating: i32,
    pub review_text: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct FavoriteInputDoc {
    pub recipe_name: String,
    pub reminder_date_time: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ReminderInputDoc {
    pub user_id: String,
    pub challenge_id: String,
    pub remind_at: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::recipes::list,
        crate::routes::recipes::create,
        crate::routes::recipes::get,
        crate::routes::recipes::update,
        crate::routes::recipes::delete,
        crate::routes::recipes::upload_image,
        crate::routes::recipes::get_image,
        crate::routes::recipes::list_reviews,
        crate::routes::recipes::create_review,
        crate::routes::challenges::list,
        crate::routes::challenges::create,
        crate::routes::challenges::get,
        crate::routes::challenges::update,
        crate::routes::challenges::delete,
        crate::routes::challenges::upload_image,
        crate::routes::challenges::get_image,
        crate::routes::reviews::list,
        crate::routes::reviews::list_by_recipe,
        crate::routes::reviews::create,
        crate::routes::reviews::get,
        crate::routes::reviews::update,
        crate::routes::reviews::delete,
        crate::routes::favorites::list,
        crate::routes::favorites::create,
        crate::routes::favorites::get,
        crate::routes::favorites::update,
        crate::routes::favorites::delete,
        crate::routes::reminders::list,
        crate::routes::reminders::list_by_user,
        crate::routes::reminders::create,
        crate::routes::reminders::get,
        crate::routes::reminders::update,
        crate::routes::reminders::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            StoredImageDoc,
            ImageUploadDoc,
            RecipeInputDoc,
            ChallengeInputDoc,
            ReviewInputDoc,
            FavoriteInputDoc,
            ReminderInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "recipes"),
        (name = "challenges"),
        (name = "reviews"),
        (name = "favorites"),
        (name = "reminders")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/health",
            "/recipes",
            "/recipes/{id}",
            "/recipes/images/{filename}",
            "/challenges/{id}",
            "/reviews/recipe/{recipe_id}",
            "/favorites/{id}",
            "/reminders/user/{user_id}",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {expected}");
        }
    }
}
