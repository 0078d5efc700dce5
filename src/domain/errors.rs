use std::collections::BTreeMap;
use std::fmt;

/// Names of the fields a [`BusinessEntity`](super::BusinessEntity) form exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityField {
    Name,
    Address,
    Gst,
}

impl EntityField {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityField::Name => "name",
            EntityField::Address => "address",
            EntityField::Gst => "gst",
        }
    }
}

impl fmt::Display for EntityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level validation failures, keyed by field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    fields: BTreeMap<EntityField, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: EntityField, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: EntityField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn clear(&mut self, field: EntityField) {
        self.fields.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityField, &str)> {
        self.fields.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&summary)
    }
}

impl std::error::Error for ValidationErrors {}

pub type ValidationResult<T> = Result<T, ValidationErrors>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add(EntityField::Name, "Name is required");
        errors.add(EntityField::Name, "something else");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(EntityField::Name), Some("Name is required"));
    }

    #[test]
    fn test_display_lists_fields_in_order() {
        let mut errors = ValidationErrors::new();
        errors.add(EntityField::Address, "Address is required");
        errors.add(EntityField::Name, "Name is required");
        assert_eq!(
            errors.to_string(),
            "name: Name is required, address: Address is required"
        );
    }

    #[test]
    fn test_clear_field() {
        let mut errors = ValidationErrors::new();
        errors.add(EntityField::Name, "Name is required");
        errors.clear(EntityField::Name);
        assert!(errors.is_empty());
        assert!(errors.get(EntityField::Name).is_none());
    }
}
