use crate::application::{App, AppMode, ProfileFocus, Route};
use crate::infrastructure::FileRepository;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode() {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Editing => Self::handle_editing_mode(app, key, modifiers),
            AppMode::ConfirmDelete => Self::handle_dialog_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
        Self::save_if_changed(app);
    }

    fn save_if_changed(app: &mut App) {
        if !app.needs_save() {
            return;
        }
        if let Some(path) = app.data_file.clone() {
            let result = FileRepository::save_store(&app.store.snapshot(), &path);
            app.set_save_result(result);
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Char('1') => {
                app.switch_tab(Route::Contacts);
                return;
            }
            KeyCode::Char('2') => {
                app.switch_tab(Route::Profile);
                return;
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.open_help();
                return;
            }
            _ => {}
        }

        app.status_message = None;

        match app.current_route().clone() {
            Route::Contacts => Self::handle_contacts(app, key),
            Route::Profile => Self::handle_profile(app, key, modifiers),
            Route::EditContact(_) | Route::GenerateInvoice | Route::SelectRecipient => match key {
                KeyCode::Esc | KeyCode::Backspace => app.go_back(),
                _ => {}
            },
        }
    }

    fn handle_contacts(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.contacts.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.contacts.select_next(),
            KeyCode::Char('e') => app.edit_selected_contact(),
            KeyCode::Char('i') => app.start_invoice_for_selected(),
            KeyCode::Char('d') | KeyCode::Delete => app.long_press_selected(),
            KeyCode::Tab => app.next_tab(),
            _ => {}
        }
    }

    fn handle_profile(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if key == KeyCode::Char('s') {
                app.submit_profile();
            }
            return;
        }

        match key {
            KeyCode::Up | KeyCode::BackTab => app.profile.focus_previous(),
            KeyCode::Down | KeyCode::Tab => app.profile.focus_next(),
            KeyCode::Enter if app.profile.focus == ProfileFocus::Next => app.submit_profile(),
            KeyCode::Enter => app.profile.start_editing(),
            _ => {}
        }
    }

    fn handle_editing_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if key == KeyCode::Char('s') {
                app.submit_profile();
            }
            return;
        }

        let form = &mut app.profile;
        match key {
            KeyCode::Esc => form.stop_editing(),
            KeyCode::Enter => {
                if form.focused_field().is_some_and(|spec| spec.multiline) {
                    form.insert_newline();
                } else {
                    form.stop_editing();
                }
            }
            KeyCode::Tab => form.focus_next(),
            KeyCode::BackTab => form.focus_previous(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Delete => form.delete(),
            KeyCode::Left => form.move_cursor_left(),
            KeyCode::Right => form.move_cursor_right(),
            KeyCode::Home => form.move_cursor_home(),
            KeyCode::End => form.move_cursor_end(),
            KeyCode::Char(c) => form.insert_char(c),
            _ => {}
        }
    }

    fn handle_dialog_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => app.contacts.toggle_dialog_focus(),
            KeyCode::Enter => app.press_dialog_button(),
            KeyCode::Char('y') => app.confirm_delete(),
            KeyCode::Char('c') => app.cancel_delete(),
            KeyCode::Esc => app.dismiss_dialog(),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}
