//! Contact list screen and its per-item actions.
//!
//! Each item owns the transient state of its delete confirmation: the
//! pending-deletion candidate and whether the dialog is open. Both are
//! reset on every path that closes the dialog.

use super::router::{Route, Router};
use super::store::{Store, StoreCommand};
use crate::domain::BusinessEntity;
use tracing::{info, warn};

pub const EMPTY_TITLE: &str = "No Contacts Yet";
pub const EMPTY_MESSAGE: &str = "Your contacts will appear here after you create invoices.";
pub const DIALOG_TITLE: &str = "Are you sure?";
pub const DIALOG_MESSAGE: &str = "Do you want to delete contact?";

/// Which confirmation button has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogButton {
    #[default]
    Cancel,
    Delete,
}

impl DialogButton {
    pub fn toggle(self) -> Self {
        match self {
            DialogButton::Cancel => DialogButton::Delete,
            DialogButton::Delete => DialogButton::Cancel,
        }
    }
}

/// One row of the contact list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactListItem {
    pub key: String,
    pub contact: BusinessEntity,
    /// Id of the contact marked for deletion, if any.
    pub pending_delete: Option<String>,
    pub dialog_open: bool,
    pub focused_button: DialogButton,
}

impl ContactListItem {
    pub fn new(contact: BusinessEntity, position: usize) -> Self {
        Self {
            key: contact.list_key(position),
            contact,
            pending_delete: None,
            dialog_open: false,
            focused_button: DialogButton::default(),
        }
    }

    /// Opens the edit screen for this contact.
    pub fn edit(&self, router: &mut dyn Router) {
        match &self.contact.id {
            Some(id) => router.navigate(Route::EditContact(id.clone())),
            None => warn!(name = %self.contact.name, "cannot edit contact without id"),
        }
    }

    /// Starts a new invoice addressed to this contact.
    pub fn start_invoice(&self, store: &mut dyn Store, router: &mut dyn Router) {
        store.dispatch(StoreCommand::StartNewInvoice);
        store.dispatch(StoreCommand::AddRecipientInfo(self.contact.clone()));
        router.navigate(Route::GenerateInvoice);
    }

    /// The long-press gesture: mark this contact and ask for confirmation.
    pub fn long_press(&mut self) {
        self.pending_delete = self.contact.id.clone();
        self.dialog_open = true;
        self.focused_button = DialogButton::Cancel;
    }

    pub fn cancel_delete(&mut self) {
        self.close_dialog();
    }

    /// Tapping outside the dialog behaves like Cancel.
    pub fn dismiss(&mut self) {
        self.cancel_delete();
    }

    /// Deletes the marked contact. With no candidate marked this only
    /// closes the dialog.
    pub fn confirm_delete(&mut self, store: &mut dyn Store) {
        if let Some(id) = self.pending_delete.take() {
            info!(%id, name = %self.contact.name, "deleting contact");
            store.dispatch(StoreCommand::DeleteContact(id));
        }
        self.close_dialog();
    }

    /// Runs whichever dialog button has focus.
    pub fn press_focused(&mut self, store: &mut dyn Store) {
        match self.focused_button {
            DialogButton::Cancel => self.cancel_delete(),
            DialogButton::Delete => self.confirm_delete(store),
        }
    }

    fn close_dialog(&mut self) {
        self.pending_delete = None;
        self.dialog_open = false;
        self.focused_button = DialogButton::default();
    }
}

/// What the contact list shows for the current store contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactListView<'a> {
    Empty { title: &'static str, message: &'static str },
    Items(&'a [ContactListItem]),
}

/// The contacts tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactListScreen {
    items: Vec<ContactListItem>,
    pub selected: usize,
}

impl ContactListScreen {
    pub fn new(store: &dyn Store) -> Self {
        let mut screen = Self::default();
        screen.sync(store);
        screen
    }

    /// Rebuilds the rows from the store, in store order. Rows whose key
    /// survives keep their dialog state.
    pub fn sync(&mut self, store: &dyn Store) {
        let mut previous = std::mem::take(&mut self.items);
        self.items = store
            .contacts()
            .iter()
            .enumerate()
            .map(|(position, contact)| {
                let mut item = ContactListItem::new(contact.clone(), position);
                if let Some(old) = previous.iter_mut().find(|old| old.key == item.key) {
                    if old.contact.id == item.contact.id {
                        item.pending_delete = old.pending_delete.take();
                        item.dialog_open = old.dialog_open;
                        item.focused_button = old.focused_button;
                    }
                }
                item
            })
            .collect();

        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    pub fn view(&self) -> ContactListView<'_> {
        if self.items.is_empty() {
            ContactListView::Empty {
                title: EMPTY_TITLE,
                message: EMPTY_MESSAGE,
            }
        } else {
            ContactListView::Items(&self.items)
        }
    }

    pub fn items(&self) -> &[ContactListItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_item(&self) -> Option<&ContactListItem> {
        self.items.get(self.selected)
    }

    pub fn selected_item_mut(&mut self) -> Option<&mut ContactListItem> {
        self.items.get_mut(self.selected)
    }

    /// The item whose confirmation dialog is open.
    pub fn open_dialog(&self) -> Option<&ContactListItem> {
        self.items.iter().find(|item| item.dialog_open)
    }

    pub fn open_dialog_mut(&mut self) -> Option<&mut ContactListItem> {
        self.items.iter_mut().find(|item| item.dialog_open)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn edit_selected(&self, router: &mut dyn Router) {
        if let Some(item) = self.selected_item() {
            item.edit(router);
        }
    }

    pub fn start_invoice_for_selected(&self, store: &mut dyn Store, router: &mut dyn Router) {
        if let Some(item) = self.selected_item() {
            item.start_invoice(store, router);
        }
    }

    /// Long-press on the selected row. Any other open dialog is closed
    /// first so at most one is open.
    pub fn long_press_selected(&mut self) {
        if self.items.is_empty() {
            return;
        }
        for item in self.items.iter_mut().filter(|item| item.dialog_open) {
            item.dismiss();
        }
        if let Some(item) = self.selected_item_mut() {
            item.long_press();
        }
    }

    /// Confirms the open dialog and resyncs with the store.
    pub fn confirm_open_dialog(&mut self, store: &mut dyn Store) {
        if let Some(item) = self.open_dialog_mut() {
            item.confirm_delete(store);
        }
        self.sync(store);
    }

    /// Presses the focused button of the open dialog and resyncs.
    pub fn press_open_dialog(&mut self, store: &mut dyn Store) {
        if let Some(item) = self.open_dialog_mut() {
            item.press_focused(store);
        }
        self.sync(store);
    }

    pub fn cancel_open_dialog(&mut self) {
        if let Some(item) = self.open_dialog_mut() {
            item.cancel_delete();
        }
    }

    pub fn dismiss_open_dialog(&mut self) {
        if let Some(item) = self.open_dialog_mut() {
            item.dismiss();
        }
    }

    pub fn toggle_dialog_focus(&mut self) {
        if let Some(item) = self.open_dialog_mut() {
            item.focused_button = item.focused_button.toggle();
        }
    }
}
