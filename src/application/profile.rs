//! Sender profile form, the first step of the invoice wizard.

use super::router::{Route, Router};
use super::store::{Store, StoreCommand};
use crate::domain::{BusinessEntitySchema, EntityField, EntityInput, ValidationErrors, ValidationResult};
use tracing::{debug, info};

/// Focusable elements of the form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileFocus {
    #[default]
    Name,
    Address,
    Gst,
    Next,
}

impl ProfileFocus {
    pub fn next(self) -> Self {
        match self {
            ProfileFocus::Name => ProfileFocus::Address,
            ProfileFocus::Address => ProfileFocus::Gst,
            ProfileFocus::Gst => ProfileFocus::Next,
            ProfileFocus::Next => ProfileFocus::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            ProfileFocus::Name => ProfileFocus::Next,
            ProfileFocus::Address => ProfileFocus::Name,
            ProfileFocus::Gst => ProfileFocus::Address,
            ProfileFocus::Next => ProfileFocus::Gst,
        }
    }

    pub fn field(self) -> Option<EntityField> {
        match self {
            ProfileFocus::Name => Some(EntityField::Name),
            ProfileFocus::Address => Some(EntityField::Address),
            ProfileFocus::Gst => Some(EntityField::Gst),
            ProfileFocus::Next => None,
        }
    }
}

/// Static description of one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: EntityField,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub multiline: bool,
}

pub const PROFILE_FIELDS: [FieldSpec; 3] = [
    FieldSpec {
        field: EntityField::Name,
        label: "Name",
        placeholder: "Enter your name",
        multiline: false,
    },
    FieldSpec {
        field: EntityField::Address,
        label: "Address",
        placeholder: "Enter your address",
        multiline: true,
    },
    FieldSpec {
        field: EntityField::Gst,
        label: "GST No.",
        placeholder: "Enter your GST number",
        multiline: false,
    },
];

/// State of the "Sender Info" form.
///
/// Values are kept as typed; trimming and the blank-GST rule are applied
/// by [`BusinessEntitySchema`] on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub values: EntityInput,
    pub errors: ValidationErrors,
    pub focus: ProfileFocus,
    /// Whether a field is taking text input (the on-screen keyboard is up).
    pub editing: bool,
    /// Cursor within the focused field, counted in characters.
    pub cursor_position: usize,
}

impl ProfileForm {
    /// Builds the form with defaults taken from the draft sender.
    pub fn from_store(store: &dyn Store) -> Self {
        let mut form = Self::default();
        form.reload(store);
        form
    }

    /// Re-enters the screen: discards local edits and errors and pre-fills
    /// from the draft sender, or blanks when there is none.
    pub fn reload(&mut self, store: &dyn Store) {
        self.values = match store.sender() {
            Some(sender) => EntityInput {
                id: None,
                ..EntityInput::from(sender)
            },
            None => EntityInput::default(),
        };
        self.errors = ValidationErrors::new();
        self.focus = ProfileFocus::default();
        self.editing = false;
        self.cursor_position = 0;
    }

    pub fn value(&self, field: EntityField) -> &str {
        match field {
            EntityField::Name => &self.values.name,
            EntityField::Address => &self.values.address,
            EntityField::Gst => &self.values.gst,
        }
    }

    fn value_mut(&mut self, field: EntityField) -> &mut String {
        match field {
            EntityField::Name => &mut self.values.name,
            EntityField::Address => &mut self.values.address,
            EntityField::Gst => &mut self.values.gst,
        }
    }

    pub fn error(&self, field: EntityField) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn focused_field(&self) -> Option<FieldSpec> {
        let field = self.focus.field()?;
        PROFILE_FIELDS.iter().copied().find(|spec| spec.field == field)
    }

    pub fn focus_next(&mut self) {
        self.editing = false;
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.editing = false;
        self.focus = self.focus.previous();
    }

    /// Shows the input method for the focused field. Does nothing when
    /// the Next button has focus.
    pub fn start_editing(&mut self) {
        if let Some(field) = self.focus.field() {
            self.editing = true;
            self.cursor_position = self.value(field).chars().count();
        }
    }

    pub fn stop_editing(&mut self) {
        self.editing = false;
    }

    pub fn insert_char(&mut self, c: char) {
        let Some(field) = self.editing_field() else {
            return;
        };
        let cursor = self.cursor_position;
        let value = self.value_mut(field);
        let at = byte_index(value, cursor);
        value.insert(at, c);
        self.cursor_position += 1;
        self.errors.clear(field);
    }

    /// Inserts a line break, only in multi-line fields.
    pub fn insert_newline(&mut self) {
        if self.focused_field().is_some_and(|spec| spec.multiline) {
            self.insert_char('\n');
        }
    }

    pub fn backspace(&mut self) {
        let Some(field) = self.editing_field() else {
            return;
        };
        if self.cursor_position == 0 {
            return;
        }
        let cursor = self.cursor_position - 1;
        let value = self.value_mut(field);
        let at = byte_index(value, cursor);
        value.remove(at);
        self.cursor_position = cursor;
        self.errors.clear(field);
    }

    pub fn delete(&mut self) {
        let Some(field) = self.editing_field() else {
            return;
        };
        let cursor = self.cursor_position;
        let value = self.value_mut(field);
        if cursor < value.chars().count() {
            let at = byte_index(value, cursor);
            value.remove(at);
            self.errors.clear(field);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(field) = self.editing_field() {
            if self.cursor_position < self.value(field).chars().count() {
                self.cursor_position += 1;
            }
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        if let Some(field) = self.editing_field() {
            self.cursor_position = self.value(field).chars().count();
        }
    }

    fn editing_field(&self) -> Option<EntityField> {
        if self.editing { self.focus.field() } else { None }
    }

    /// Validates and, on success, stores the sender and moves on to
    /// recipient selection. On failure the store and router are untouched
    /// and the field errors are kept on the form.
    pub fn submit(&mut self, store: &mut dyn Store, router: &mut dyn Router) -> ValidationResult<()> {
        match BusinessEntitySchema::validate(&self.values) {
            Ok(sender) => {
                self.editing = false;
                self.errors = ValidationErrors::new();
                info!(name = %sender.name, "sender info saved");
                store.dispatch(StoreCommand::AddSenderInfo(sender));
                router.navigate(Route::SelectRecipient);
                Ok(())
            }
            Err(errors) => {
                debug!(%errors, "sender form rejected");
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }
}

fn byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices().nth(char_index).map(|(i, _)| i).unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::store::MemoryStore;
    use crate::application::testing::{RecordingRouter, RecordingStore};
    use crate::domain::BusinessEntity;

    fn type_text(form: &mut ProfileForm, text: &str) {
        for c in text.chars() {
            form.insert_char(c);
        }
    }

    #[test]
    fn test_blank_form_without_sender() {
        let store = MemoryStore::default();
        let form = ProfileForm::from_store(&store);
        assert_eq!(form.values, EntityInput::default());
        assert!(form.errors.is_empty());
        assert_eq!(form.focus, ProfileFocus::Name);
    }

    #[test]
    fn test_prefill_from_existing_sender() {
        let mut store = MemoryStore::default();
        store.dispatch(StoreCommand::AddSenderInfo(BusinessEntity::new("X", "Y")));

        let form = ProfileForm::from_store(&store);
        assert_eq!(form.value(EntityField::Name), "X");
        assert_eq!(form.value(EntityField::Address), "Y");
        assert_eq!(form.value(EntityField::Gst), "");
    }

    #[test]
    fn test_valid_submit_writes_sender_and_navigates() {
        let mut store = RecordingStore::new(MemoryStore::default());
        let mut router = RecordingRouter::default();
        let mut form = ProfileForm::from_store(&store);

        form.start_editing();
        type_text(&mut form, "Acme");
        form.focus_next();
        form.start_editing();
        type_text(&mut form, "1 Main St");

        assert!(form.submit(&mut store, &mut router).is_ok());

        assert_eq!(store.sender(), Some(&BusinessEntity::new("Acme", "1 Main St")));
        assert_eq!(store.sender().and_then(|s| s.gst.clone()), None);
        assert_eq!(router.paths(), vec!["/invoices/generate/recipient"]);
        assert!(!form.editing);
    }

    #[test]
    fn test_empty_name_blocks_submit() {
        let mut store = RecordingStore::new(MemoryStore::default());
        let mut router = RecordingRouter::default();
        let mut form = ProfileForm::from_store(&store);
        form.values.address = "1 Main St".to_string();

        let errors = form.submit(&mut store, &mut router).unwrap_err();

        assert_eq!(errors.get(EntityField::Name), Some(BusinessEntitySchema::NAME_REQUIRED));
        assert_eq!(form.error(EntityField::Name), Some(BusinessEntitySchema::NAME_REQUIRED));
        assert!(form.error(EntityField::Address).is_none());
        assert!(store.commands.is_empty());
        assert!(router.routes.is_empty());
    }

    #[test]
    fn test_retry_after_fixing_errors() {
        let mut store = RecordingStore::new(MemoryStore::default());
        let mut router = RecordingRouter::default();
        let mut form = ProfileForm::from_store(&store);

        assert!(form.submit(&mut store, &mut router).is_err());
        assert_eq!(form.errors.len(), 2);

        form.start_editing();
        type_text(&mut form, "Acme");
        assert!(form.error(EntityField::Name).is_none());
        assert!(form.error(EntityField::Address).is_some());

        form.values.address = "1 Main St".to_string();
        assert!(form.submit(&mut store, &mut router).is_ok());
        assert!(form.errors.is_empty());
        assert_eq!(store.commands.len(), 1);
    }

    #[test]
    fn test_gst_is_trimmed_and_kept() {
        let mut store = MemoryStore::default();
        let mut router = RecordingRouter::default();
        let mut form = ProfileForm::from_store(&store);
        form.values = EntityInput {
            id: None,
            name: "Acme".to_string(),
            address: "1 Main St".to_string(),
            gst: " 27ABCDE1234F1Z5 ".to_string(),
        };

        form.submit(&mut store, &mut router).unwrap();
        assert_eq!(store.sender().and_then(|s| s.gst.as_deref()), Some("27ABCDE1234F1Z5"));
    }

    #[test]
    fn test_reload_discards_local_edits() {
        let mut store = MemoryStore::default();
        store.dispatch(StoreCommand::AddSenderInfo(BusinessEntity::new("X", "Y")));
        let mut form = ProfileForm::from_store(&store);

        form.start_editing();
        type_text(&mut form, "zz");
        assert_eq!(form.value(EntityField::Name), "Xzz");

        form.reload(&store);
        assert_eq!(form.value(EntityField::Name), "X");
        assert!(!form.editing);
    }

    #[test]
    fn test_typing_requires_editing() {
        let store = MemoryStore::default();
        let mut form = ProfileForm::from_store(&store);
        form.insert_char('a');
        assert_eq!(form.value(EntityField::Name), "");
    }

    #[test]
    fn test_newline_only_in_address() {
        let store = MemoryStore::default();
        let mut form = ProfileForm::from_store(&store);

        form.start_editing();
        type_text(&mut form, "A");
        form.insert_newline();
        assert_eq!(form.value(EntityField::Name), "A");

        form.focus_next();
        form.start_editing();
        type_text(&mut form, "1 Main St");
        form.insert_newline();
        type_text(&mut form, "Springfield");
        assert_eq!(form.value(EntityField::Address), "1 Main St\nSpringfield");
    }

    #[test]
    fn test_cursor_editing_with_multibyte_text() {
        let store = MemoryStore::default();
        let mut form = ProfileForm::from_store(&store);

        form.start_editing();
        type_text(&mut form, "Zürich");
        form.move_cursor_home();
        form.move_cursor_right();
        form.move_cursor_right();
        form.backspace();
        assert_eq!(form.value(EntityField::Name), "Zrich");
        form.delete();
        assert_eq!(form.value(EntityField::Name), "Zich");
        form.move_cursor_end();
        form.insert_char('!');
        assert_eq!(form.value(EntityField::Name), "Zich!");
    }

    #[test]
    fn test_focus_cycle_and_next_button() {
        let store = MemoryStore::default();
        let mut form = ProfileForm::from_store(&store);

        form.focus_previous();
        assert_eq!(form.focus, ProfileFocus::Next);
        form.start_editing();
        assert!(!form.editing);
        assert!(form.focused_field().is_none());

        form.focus_next();
        assert_eq!(form.focus, ProfileFocus::Name);
        assert_eq!(form.focused_field().map(|f| f.label), Some("Name"));
    }
}
