//! Navigation between screens.

use std::fmt;
use tracing::debug;

/// A screen the application can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Contacts tab root.
    Contacts,
    /// Profile (sender info) tab root.
    Profile,
    /// Edit form for the contact with this id.
    EditContact(String),
    /// First step of invoice generation.
    GenerateInvoice,
    /// Recipient selection step of invoice generation.
    SelectRecipient,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Contacts => "/contacts".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::EditContact(id) => format!("/contacts/{}/edit", id),
            Route::GenerateInvoice => "/invoices/generate".to_string(),
            Route::SelectRecipient => "/invoices/generate/recipient".to_string(),
        }
    }

    /// Inverse of [`Route::path`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tinvoice::application::Route;
    ///
    /// assert_eq!(Route::parse("/contacts/abc/edit"), Some(Route::EditContact("abc".to_string())));
    /// assert_eq!(Route::parse("/invoices/generate/recipient"), Some(Route::SelectRecipient));
    /// assert_eq!(Route::parse("/nowhere"), None);
    /// ```
    pub fn parse(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path.trim_end_matches('/').split('/').skip(1).collect();
        match segments.as_slice() {
            ["contacts"] => Some(Route::Contacts),
            ["profile"] => Some(Route::Profile),
            ["contacts", id, "edit"] if !id.is_empty() => Some(Route::EditContact(id.to_string())),
            ["invoices", "generate"] => Some(Route::GenerateInvoice),
            ["invoices", "generate", "recipient"] => Some(Route::SelectRecipient),
            _ => None,
        }
    }

    /// Tab roots are the screens reachable from the tab bar.
    pub fn is_tab_root(&self) -> bool {
        matches!(self, Route::Contacts | Route::Profile)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Fire-and-forget navigation sink.
pub trait Router {
    fn navigate(&mut self, route: Route);
}

/// Push-style history with a tab root at the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStack {
    stack: Vec<Route>,
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(Route::Contacts)
    }
}

impl NavigationStack {
    pub fn new(root: Route) -> Self {
        Self { stack: vec![root] }
    }

    pub fn current(&self) -> &Route {
        // The stack is never empty: `back` refuses to pop the root.
        &self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The tab the current screen was opened from.
    pub fn root(&self) -> &Route {
        &self.stack[0]
    }

    /// Pops the current screen. Returns `false` at the root.
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            let popped = self.stack.pop();
            debug!(from = ?popped, to = %self.current(), "navigate back");
            true
        } else {
            false
        }
    }

    /// Resets history to a tab root.
    pub fn switch_tab(&mut self, tab: Route) {
        debug!(%tab, "switch tab");
        self.stack.clear();
        self.stack.push(tab);
    }
}

impl Router for NavigationStack {
    fn navigate(&mut self, route: Route) {
        debug!(%route, "navigate");
        if route.is_tab_root() {
            self.switch_tab(route);
        } else if self.current() != &route {
            self.stack.push(route);
        }
    }
}
