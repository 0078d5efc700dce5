//! Store and router doubles that record what the views asked for.

use super::router::{Route, Router};
use super::store::{MemoryStore, Store, StoreCommand};
use crate::domain::{BusinessEntity, DraftInvoice};

/// Wraps a [`MemoryStore`] and keeps every dispatched command in order.
#[derive(Debug, Default)]
pub struct RecordingStore {
    pub inner: MemoryStore,
    pub commands: Vec<StoreCommand>,
}

impl RecordingStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            commands: Vec::new(),
        }
    }
}

impl Store for RecordingStore {
    fn contacts(&self) -> &[BusinessEntity] {
        self.inner.contacts()
    }

    fn new_invoice(&self) -> Option<&DraftInvoice> {
        self.inner.new_invoice()
    }

    fn dispatch(&mut self, command: StoreCommand) -> bool {
        self.commands.push(command.clone());
        self.inner.dispatch(command)
    }
}

#[derive(Debug, Default)]
pub struct RecordingRouter {
    pub routes: Vec<Route>,
}

impl RecordingRouter {
    pub fn paths(&self) -> Vec<String> {
        self.routes.iter().map(Route::path).collect()
    }
}

impl Router for RecordingRouter {
    fn navigate(&mut self, route: Route) {
        self.routes.push(route);
    }
}
