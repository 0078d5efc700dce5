use serde::{Deserialize, Serialize};

/// A named party with an address and optional tax identifier.
///
/// The same shape is used for saved contacts and for the sender and
/// recipient of an invoice draft. `id` is assigned by the store when a
/// contact is first saved and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BusinessEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst: Option<String>,
}

impl BusinessEntity {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            address: address.into(),
            gst: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_gst(mut self, gst: impl Into<String>) -> Self {
        self.gst = Some(gst.into());
        self
    }

    /// Key used to tell list rows apart. Names are not unique, so the
    /// position is part of the key.
    pub fn list_key(&self, position: usize) -> String {
        format!("{}{}", self.name, position)
    }
}

/// An invoice that is still being put together by the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DraftInvoice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<BusinessEntity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<BusinessEntity>,
}

/// Raw, unvalidated form values for a [`BusinessEntity`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityInput {
    pub id: Option<String>,
    pub name: String,
    pub address: String,
    pub gst: String,
}

impl From<&BusinessEntity> for EntityInput {
    fn from(entity: &BusinessEntity) -> Self {
        Self {
            id: entity.id.clone(),
            name: entity.name.clone(),
            address: entity.address.clone(),
            gst: entity.gst.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let entity = BusinessEntity::new("Acme", "1 Main St");
        let json = serde_json::to_string(&entity).unwrap();
        assert_eq!(json, r#"{"name":"Acme","address":"1 Main St"}"#);
    }

    #[test]
    fn test_missing_optional_fields_deserialize_as_none() {
        let entity: BusinessEntity =
            serde_json::from_str(r#"{"name":"Acme","address":"1 Main St"}"#).unwrap();
        assert!(entity.id.is_none());
        assert!(entity.gst.is_none());
    }

    #[test]
    fn test_list_key_includes_position() {
        let entity = BusinessEntity::new("Acme", "1 Main St");
        assert_eq!(entity.list_key(0), "Acme0");
        assert_eq!(entity.list_key(3), "Acme3");
    }

    #[test]
    fn test_entity_input_from_entity() {
        let entity = BusinessEntity::new("X", "Y").with_id("c1").with_gst("GST1");
        let input = EntityInput::from(&entity);
        assert_eq!(input.id.as_deref(), Some("c1"));
        assert_eq!(input.name, "X");
        assert_eq!(input.address, "Y");
        assert_eq!(input.gst, "GST1");

        let input = EntityInput::from(&BusinessEntity::new("X", "Y"));
        assert_eq!(input.gst, "");
    }
}
