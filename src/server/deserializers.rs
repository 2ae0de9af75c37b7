use serde::{Deserialize, Deserializer};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::quiz::CategorySelector;

// the web client sends ids sometimes as numbers and sometimes as strings
#[derive(Deserialize)]
pub struct LooseId(#[serde(deserialize_with = "deserialize_number_from_string")] pub i64);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSelector {
    Id(LooseId),
    // {"type": "Science", "id": "1"}, the label is ignored
    Object { id: LooseId },
}

pub fn deserialize_category_selector<'de, D>(deserializer: D) -> Result<CategorySelector, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match Option::<RawSelector>::deserialize(deserializer)? {
        Some(RawSelector::Id(id)) | Some(RawSelector::Object { id }) => id.0,
        None => 0,
    };
    Ok(CategorySelector::from(id))
}

pub fn deserialize_ids<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids = Option::<Vec<LooseId>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(ids.into_iter().map(|id| id.0).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "deserialize_category_selector")]
        category: CategorySelector,
        #[serde(default, deserialize_with = "deserialize_ids")]
        ids: Vec<i64>,
    }

    fn parse(value: serde_json::Value) -> Result<Body, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn selector_accepts_all_client_shapes() {
        assert_eq!(parse(json!({"category": 3})).unwrap().category, CategorySelector::Category(3));
        assert_eq!(parse(json!({"category": "4"})).unwrap().category, CategorySelector::Category(4));
        assert_eq!(
            parse(json!({"category": {"type": "Art", "id": "2"}})).unwrap().category,
            CategorySelector::Category(2)
        );
        assert_eq!(
            parse(json!({"category": {"type": "click", "id": 0}})).unwrap().category,
            CategorySelector::All
        );
        assert_eq!(parse(json!({})).unwrap().category, CategorySelector::All);
    }

    #[test]
    fn null_means_default() {
        let body = parse(json!({"category": null, "ids": null})).unwrap();
        assert_eq!(body.category, CategorySelector::All);
        assert!(body.ids.is_empty());
    }

    #[test]
    fn selector_rejects_garbage() {
        assert!(parse(json!({"category": "science"})).is_err());
        assert!(parse(json!({"category": {"type": "Art"}})).is_err());
    }

    #[test]
    fn ids_accept_numbers_and_strings() {
        assert_eq!(parse(json!({"ids": [1, "2", 3]})).unwrap().ids, [1, 2, 3]);
        assert!(parse(json!({})).unwrap().ids.is_empty());
        assert!(parse(json!({"ids": ["x"]})).is_err());
    }
}
