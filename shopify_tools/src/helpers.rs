use serde::{Deserialize, Deserializer};

/// Shopify sends `null` for a lot of fields that are documented as strings or arrays. This treats `null` the same as
/// a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Splits a comma-separated list, trimming entries and dropping empty ones.
pub fn split_comma_list(s: &str) -> Vec<String> {
    s.split(',').map(str::trim).filter(|t| !t.is_empty()).map(String::from).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn comma_lists() {
        assert_eq!(split_comma_list("pre-order, vip ,, wholesale"), vec!["pre-order", "vip", "wholesale"]);
        assert!(split_comma_list("  ").is_empty());
    }

    #[test]
    fn nulls_become_defaults() {
        #[derive(Deserialize)]
        struct Thing {
            #[serde(default, deserialize_with = "null_as_default")]
            items: Vec<u32>,
            #[serde(default, deserialize_with = "null_as_default")]
            name: String,
        }
        let t: Thing = serde_json::from_str(r#"{"items": null, "name": null}"#).unwrap();
        assert!(t.items.is_empty());
        assert!(t.name.is_empty());
        let t: Thing = serde_json::from_str(r#"{"items": [1, 2]}"#).unwrap();
        assert_eq!(t.items, vec![1, 2]);
    }
}
