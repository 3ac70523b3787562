//! Serde support for partial updates.

use serde::{Deserialize, Deserializer};

/// Deserializes a present field (including `null`) into `Some(..)`.
///
/// Used with `#[serde(default)]` on `Option<Option<T>>` fields: an absent
/// field stays `None`, an explicit `null` becomes `Some(None)`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "super::deserialize_some")]
        note: Option<Option<String>>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"note": null}"#).unwrap();
        let set: Patch = serde_json::from_str(r#"{"note": "hi"}"#).unwrap();

        assert_eq!(absent.note, None);
        assert_eq!(null.note, Some(None));
        assert_eq!(set.note, Some(Some("hi".to_string())));
    }
}
