//! Serde helpers shared by the entity field types.

use serde::{Deserialize, Deserializer};

/// Accept an opaque reference id given either as a JSON string or an integer.
pub fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Wrapped {
        #[serde(deserialize_with = "super::opaque_id")]
        id: String,
    }

    #[test]
    fn accepts_strings_and_integers() {
        let a: Wrapped = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        let b: Wrapped = serde_json::from_str(r#"{"id":42}"#).unwrap();
        assert_eq!(a.id, "abc");
        assert_eq!(b.id, "42");
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(serde_json::from_str::<Wrapped>(r#"{"id":true}"#).is_err());
    }
}
