//! Application state for the terminal invoicing UI.
//!
//! `App` owns the store and the navigation stack and hands them to the
//! screens as explicit dependencies for every action.

use super::contacts::ContactListScreen;
use super::profile::ProfileForm;
use super::router::{NavigationStack, Route};
use super::store::MemoryStore;
use std::path::PathBuf;
use tracing::error;

/// How key presses are currently interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Navigation between screens and list rows.
    Normal,
    /// A profile field is taking text input.
    Editing,
    /// The delete confirmation dialog is open.
    ConfirmDelete,
    /// Help overlay is shown.
    Help,
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use tinvoice::application::{App, AppMode, Route};
///
/// let app = App::default();
/// assert_eq!(app.current_route(), &Route::Contacts);
/// assert_eq!(app.mode(), AppMode::Normal);
/// ```
#[derive(Debug)]
pub struct App {
    pub store: MemoryStore,
    pub router: NavigationStack,
    pub contacts: ContactListScreen,
    pub profile: ProfileForm,
    /// Where the store is saved after each change, if anywhere.
    pub data_file: Option<PathBuf>,
    /// Temporary status message to display
    pub status_message: Option<String>,
    pub show_help: bool,
    pub help_scroll: usize,
    saved_revision: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new(MemoryStore::default(), None)
    }
}

impl App {
    pub fn new(store: MemoryStore, data_file: Option<PathBuf>) -> Self {
        let contacts = ContactListScreen::new(&store);
        let profile = ProfileForm::from_store(&store);
        let saved_revision = store.revision();
        Self {
            store,
            router: NavigationStack::default(),
            contacts,
            profile,
            data_file,
            status_message: None,
            show_help: false,
            help_scroll: 0,
            saved_revision,
        }
    }

    pub fn mode(&self) -> AppMode {
        if self.show_help {
            AppMode::Help
        } else if self.contacts.open_dialog().is_some() && self.current_route() == &Route::Contacts {
            AppMode::ConfirmDelete
        } else if self.profile.editing && self.current_route() == &Route::Profile {
            AppMode::Editing
        } else {
            AppMode::Normal
        }
    }

    pub fn current_route(&self) -> &Route {
        self.router.current()
    }

    /// Switches tabs. Entering a tab re-reads the store, so the profile
    /// form is pre-filled from the current draft sender.
    pub fn switch_tab(&mut self, tab: Route) {
        if !tab.is_tab_root() {
            return;
        }
        self.status_message = None;
        self.contacts.dismiss_open_dialog();
        match tab {
            Route::Contacts => self.contacts.sync(&self.store),
            Route::Profile => self.profile.reload(&self.store),
            _ => {}
        }
        self.router.switch_tab(tab);
    }

    pub fn next_tab(&mut self) {
        let next = match self.router.root() {
            Route::Contacts => Route::Profile,
            _ => Route::Contacts,
        };
        self.switch_tab(next);
    }

    /// Leaves a pushed screen, returning to where it was opened from.
    pub fn go_back(&mut self) {
        if self.router.back() && self.current_route() == &Route::Contacts {
            self.contacts.sync(&self.store);
        }
    }

    pub fn edit_selected_contact(&mut self) {
        self.contacts.edit_selected(&mut self.router);
    }

    pub fn start_invoice_for_selected(&mut self) {
        self.contacts.start_invoice_for_selected(&mut self.store, &mut self.router);
    }

    pub fn long_press_selected(&mut self) {
        self.contacts.long_press_selected();
    }

    pub fn confirm_delete(&mut self) {
        self.contacts.confirm_open_dialog(&mut self.store);
    }

    pub fn press_dialog_button(&mut self) {
        self.contacts.press_open_dialog(&mut self.store);
    }

    pub fn cancel_delete(&mut self) {
        self.contacts.cancel_open_dialog();
    }

    pub fn dismiss_dialog(&mut self) {
        self.contacts.dismiss_open_dialog();
    }

    /// Submits the sender form. Validation problems stay on the form; the
    /// status line only points at them.
    pub fn submit_profile(&mut self) {
        match self.profile.submit(&mut self.store, &mut self.router) {
            Ok(()) => self.status_message = None,
            Err(errors) => {
                self.status_message = Some(format!(
                    "Please fix {} field{}",
                    errors.len(),
                    if errors.len() == 1 { "" } else { "s" }
                ));
            }
        }
    }

    pub fn open_help(&mut self) {
        self.show_help = true;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    /// Whether the store changed since it was last saved.
    pub fn needs_save(&self) -> bool {
        self.data_file.is_some() && self.store.revision() != self.saved_revision
    }

    /// Records the outcome of saving the store. Failures are shown on the
    /// status line and retried on the next change.
    pub fn set_save_result<E: std::fmt::Display>(&mut self, result: Result<(), E>) {
        match result {
            Ok(()) => {
                self.saved_revision = self.store.revision();
            }
            Err(err) => {
                error!(error = %err, "saving data file failed");
                self.status_message = Some(format!("Save failed: {}", err));
            }
        }
    }
}
