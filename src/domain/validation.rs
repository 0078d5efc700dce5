//! Validation schema for business entities.
//!
//! Turns raw form input into a [`BusinessEntity`] or a set of
//! field-level messages suitable for showing next to each input.

use super::errors::{EntityField, ValidationErrors, ValidationResult};
use super::models::{BusinessEntity, EntityInput};

/// Schema shared by the sender form and contact import.
///
/// # Examples
///
/// ```
/// use tinvoice::domain::{BusinessEntitySchema, EntityField, EntityInput};
///
/// let input = EntityInput {
///     name: "Acme".to_string(),
///     address: "1 Main St".to_string(),
///     ..Default::default()
/// };
/// let entity = BusinessEntitySchema::validate(&input).unwrap();
/// assert_eq!(entity.name, "Acme");
/// assert!(entity.gst.is_none());
///
/// let errors = BusinessEntitySchema::validate(&EntityInput::default()).unwrap_err();
/// assert!(errors.get(EntityField::Name).is_some());
/// ```
pub struct BusinessEntitySchema;

impl BusinessEntitySchema {
    pub const NAME_REQUIRED: &'static str = "Name is required";
    pub const ADDRESS_REQUIRED: &'static str = "Address is required";

    /// Validates `input`, trimming every field. A blank GST becomes `None`.
    pub fn validate(input: &EntityInput) -> ValidationResult<BusinessEntity> {
        let mut errors = ValidationErrors::new();

        let name = input.name.trim();
        if name.is_empty() {
            errors.add(EntityField::Name, Self::NAME_REQUIRED);
        }

        let address = input.address.trim();
        if address.is_empty() {
            errors.add(EntityField::Address, Self::ADDRESS_REQUIRED);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let gst = input.gst.trim();
        Ok(BusinessEntity {
            id: input.id.clone(),
            name: name.to_string(),
            address: address.to_string(),
            gst: if gst.is_empty() { None } else { Some(gst.to_string()) },
        })
    }
}
