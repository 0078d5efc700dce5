//! Shared state store for contacts and the invoice draft.
//!
//! Views never reach into the store directly: they read through the
//! [`Store`] accessors and change state only by dispatching a
//! [`StoreCommand`]. That keeps every mutation a named, loggable event.

use crate::domain::{BusinessEntity, DraftInvoice};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A named mutation of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand {
    /// Replaces any draft with an empty one.
    StartNewInvoice,
    /// Sets the draft recipient, creating a draft when none exists.
    AddRecipientInfo(BusinessEntity),
    /// Sets the draft sender, creating a draft when none exists.
    AddSenderInfo(BusinessEntity),
    /// Removes the contact with this id. Unknown ids are ignored.
    DeleteContact(String),
    /// Inserts a contact (assigning an id when it has none) or replaces
    /// the contact with the same id in place.
    SaveContact(BusinessEntity),
}

impl StoreCommand {
    pub fn name(&self) -> &'static str {
        match self {
            StoreCommand::StartNewInvoice => "start_new_invoice",
            StoreCommand::AddRecipientInfo(_) => "add_recipient_info",
            StoreCommand::AddSenderInfo(_) => "add_sender_info",
            StoreCommand::DeleteContact(_) => "delete_contact",
            StoreCommand::SaveContact(_) => "save_contact",
        }
    }
}

/// Read and mutate surface consumed by the views.
pub trait Store {
    /// Contacts in display order.
    fn contacts(&self) -> &[BusinessEntity];

    /// The in-progress invoice, if a flow has been started.
    fn new_invoice(&self) -> Option<&DraftInvoice>;

    /// Applies `command` synchronously. Returns whether anything changed.
    /// Never fails.
    fn dispatch(&mut self, command: StoreCommand) -> bool;

    fn sender(&self) -> Option<&BusinessEntity> {
        self.new_invoice().and_then(|draft| draft.sender.as_ref())
    }

    fn recipient(&self) -> Option<&BusinessEntity> {
        self.new_invoice().and_then(|draft| draft.recipient.as_ref())
    }

    fn contact(&self, id: &str) -> Option<&BusinessEntity> {
        self.contacts().iter().find(|c| c.id.as_deref() == Some(id))
    }
}

/// Serializable layout of the store, used for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub contacts: Vec<BusinessEntity>,
    #[serde(default, rename = "newInvoice", skip_serializing_if = "Option::is_none")]
    pub new_invoice: Option<DraftInvoice>,
}

/// In-memory [`Store`].
///
/// # Examples
///
/// ```
/// use tinvoice::application::{MemoryStore, Store, StoreCommand};
/// use tinvoice::domain::BusinessEntity;
///
/// let mut store = MemoryStore::default();
/// store.dispatch(StoreCommand::SaveContact(BusinessEntity::new("Acme", "1 Main St")));
/// assert_eq!(store.contacts().len(), 1);
/// assert!(store.contacts()[0].id.is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    contacts: Vec<BusinessEntity>,
    new_invoice: Option<DraftInvoice>,
    revision: u64,
}

impl MemoryStore {
    pub fn with_contacts(contacts: Vec<BusinessEntity>) -> Self {
        Self {
            contacts,
            new_invoice: None,
            revision: 0,
        }
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            contacts: snapshot.contacts,
            new_invoice: snapshot.new_invoice,
            revision: 0,
        }
    }

    /// Number of state-changing dispatches applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            contacts: self.contacts.clone(),
            new_invoice: self.new_invoice.clone(),
        }
    }

    fn draft_mut(&mut self) -> &mut DraftInvoice {
        self.new_invoice.get_or_insert_with(DraftInvoice::default)
    }

    fn save_contact(&mut self, mut contact: BusinessEntity) {
        let existing = contact
            .id
            .as_deref()
            .and_then(|id| self.contacts.iter().position(|c| c.id.as_deref() == Some(id)));

        match existing {
            Some(index) => self.contacts[index] = contact,
            None => {
                if contact.id.is_none() {
                    contact.id = Some(uuid::Uuid::new_v4().to_string());
                }
                self.contacts.push(contact);
            }
        }
    }
}

impl Store for MemoryStore {
    fn contacts(&self) -> &[BusinessEntity] {
        &self.contacts
    }

    fn new_invoice(&self) -> Option<&DraftInvoice> {
        self.new_invoice.as_ref()
    }

    fn dispatch(&mut self, command: StoreCommand) -> bool {
        debug!(command = command.name(), "store dispatch");
        let changed = match command {
            StoreCommand::StartNewInvoice => {
                self.new_invoice = Some(DraftInvoice::default());
                true
            }
            StoreCommand::AddRecipientInfo(entity) => {
                self.draft_mut().recipient = Some(entity);
                true
            }
            StoreCommand::AddSenderInfo(entity) => {
                self.draft_mut().sender = Some(entity);
                true
            }
            StoreCommand::DeleteContact(id) => {
                let before = self.contacts.len();
                self.contacts.retain(|c| c.id.as_deref() != Some(id.as_str()));
                let removed = self.contacts.len() != before;
                if !removed {
                    debug!(%id, "delete ignored, no such contact");
                }
                removed
            }
            StoreCommand::SaveContact(contact) => {
                self.save_contact(contact);
                true
            }
        };
        if changed {
            self.revision += 1;
        }
        changed
    }
}
