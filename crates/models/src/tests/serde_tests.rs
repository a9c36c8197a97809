use serde_json::json;
use uuid::Uuid;

use crate::{cooking_challenge, recipe, reminder, review};

#[test]
fn recipe_uses_camel_case_and_type_key() {
    let m = recipe::Model {
        id: Uuid::nil(),
        title: "Soup".into(),
        description: "d".into(),
        ingredients: "i".into(),
        steps: "s".into(),
        time: "10 min".into(),
        recipe_type: "veg".into(),
        category: "soup".into(),
        recipe_image: Some("x.png".into()),
    };
    let v = serde_json::to_value(&m).unwrap();
    assert_eq!(v["type"], "veg");
    assert_eq!(v["recipeImage"], "x.png");
    assert!(v.get("recipe_type").is_none());
}

#[test]
fn recipe_fields_image_is_optional() {
    let f: recipe::RecipeFields = serde_json::from_value(json!({
        "title": "Soup", "description": "d", "ingredients": "i", "steps": "s",
        "time": "10 min", "type": "veg", "category": "soup"
    }))
    .unwrap();
    assert!(f.recipe_image.is_none());
}

#[test]
fn recipe_fields_require_every_text_field() {
    let res = serde_json::from_value::<recipe::RecipeFields>(json!({"title": "Soup"}));
    assert!(res.is_err());
}

#[test]
fn challenge_fields_accept_legacy_form_names() {
    let f: cooking_challenge::ChallengeFields = serde_json::from_value(json!({
        "ChallengeTitle": "Bake Off",
        "challengeDetails": "Bread",
        "Rules": "No machines",
        "startDate": "2025-01-10",
        "endDate": "2025-01-20"
    }))
    .unwrap();
    assert_eq!(f.title, "Bake Off");
    assert_eq!(f.details, "Bread");
    assert_eq!(f.rules, "No machines");
    assert_eq!(f.end_date.to_string(), "2025-01-20");
}

#[test]
fn review_fields_accept_comment_aliases() {
    let f: review::ReviewFields = serde_json::from_value(json!({
        "author": "Ana", "text": "Lovely", "rating": 4
    }))
    .unwrap();
    assert_eq!(f.reviewer_name, "Ana");
    assert_eq!(f.review_text, "Lovely");
    assert_eq!(f.recipe_id, "");
}

#[test]
fn reminder_fields_accept_numeric_ids() {
    let f: reminder::ReminderFields = serde_json::from_value(json!({
        "userId": 12, "challengeId": 3, "remindAt": "2025-06-02T09:00:00.000Z"
    }))
    .unwrap();
    assert_eq!(f.user_id, "12");
    assert_eq!(f.challenge_id, "3");
}
