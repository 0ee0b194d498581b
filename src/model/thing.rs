use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A persisted Thing.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Thing {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Permitted request parameters. HTML forms send `thing[name]`, JSON bodies send `name`;
/// anything else in the request is dropped during decoding.
///
/// `description` is `None` when absent and `Some(None)` for an explicit JSON `null`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ThingParams {
    #[serde(default, alias = "thing[name]")]
    pub name: Option<String>,
    #[serde(default, alias = "thing[description]", deserialize_with = "present")]
    pub description: Option<Option<String>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Attribute values about to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThingAttrs {
    pub name: String,
    pub description: Option<String>,
}

impl ThingParams {
    /// Attributes for a new record; a missing name becomes empty and fails presence.
    pub fn into_new_attrs(self) -> ThingAttrs {
        ThingAttrs {
            name: self.name.unwrap_or_default(),
            description: self.description.flatten(),
        }
    }

    /// Attributes for an existing record: provided fields replace, absent fields keep their value.
    pub fn apply_to(self, thing: &Thing) -> ThingAttrs {
        ThingAttrs {
            name: self.name.unwrap_or_else(|| thing.name.clone()),
            description: match self.description {
                Some(description) => description,
                None => thing.description.clone(),
            },
        }
    }
}

impl From<&Thing> for ThingAttrs {
    fn from(thing: &Thing) -> Self {
        ThingAttrs {
            name: thing.name.clone(),
            description: thing.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thing() -> Thing {
        let now = Utc::now();
        Thing {
            id: 4,
            name: "lamp".into(),
            description: Some("brass".into()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn apply_keeps_absent_fields() {
        let params = ThingParams {
            name: None,
            description: Some(Some("copper".into())),
        };
        assert_eq!(
            params.apply_to(&thing()),
            ThingAttrs {
                name: "lamp".into(),
                description: Some("copper".into())
            }
        );
    }

    #[test]
    fn new_attrs_default_to_empty_name() {
        let attrs = ThingParams::default().into_new_attrs();
        assert_eq!(attrs.name, "");
        assert_eq!(attrs.description, None);
    }

    #[test]
    fn json_params_ignore_unknown_keys() {
        let params: ThingParams =
            serde_json::from_str(r#"{"name":"lamp","id":99,"admin":true}"#).unwrap();
        assert_eq!(params.name.as_deref(), Some("lamp"));
        assert_eq!(params.description, None);
    }

    #[test]
    fn json_null_clears_description() {
        let params: ThingParams = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(params.description, Some(None));
        let attrs = params.apply_to(&thing());
        assert_eq!(attrs.name, "lamp");
        assert_eq!(attrs.description, None);

        let params: ThingParams = serde_json::from_str(r#"{"name":"desk"}"#).unwrap();
        assert_eq!(params.apply_to(&thing()).description.as_deref(), Some("brass"));
    }
}
