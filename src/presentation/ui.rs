use crate::application::{
    App, AppMode, ContactListItem, ContactListView, DialogButton, PROFILE_FIELDS, ProfileFocus, Route,
    Store, DIALOG_MESSAGE, DIALOG_TITLE,
};
use crate::domain::BusinessEntity;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

const ADDRESS_LINES: u16 = 3;

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.current_route() {
        Route::Contacts => render_contacts(f, app, chunks[1]),
        Route::Profile => render_profile(f, app, chunks[1]),
        Route::EditContact(id) => render_edit_contact(f, app, id, chunks[1]),
        Route::GenerateInvoice => render_draft(f, app, "New Invoice", chunks[1]),
        Route::SelectRecipient => render_draft(f, app, "Select Recipient", chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);

    if app.mode() == AppMode::ConfirmDelete {
        if let Some(item) = app.contacts.open_dialog() {
            render_delete_dialog(f, item);
        }
    }
    if app.mode() == AppMode::Help {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let selected: usize = match app.router.root() {
        Route::Profile => 1,
        _ => 0,
    };
    let tabs = Tabs::new(vec!["1 Contacts", "2 Profile"])
        .select(selected)
        .style(Style::default().fg(Color::Cyan))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow))
        .divider("|");
    f.render_widget(tabs, area);
}

fn render_contacts(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Contacts");

    match app.contacts.view() {
        ContactListView::Empty { title, message } => {
            let inner = block.inner(area);
            f.render_widget(block, area);

            let text = Text::from(vec![
                Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD))),
                Line::from(""),
                Line::from(Span::styled(message, Style::default().fg(Color::Gray))),
            ]);
            let vertical_pad = inner.height.saturating_sub(3) / 2;
            let centered = Rect {
                y: inner.y + vertical_pad,
                height: inner.height.saturating_sub(vertical_pad),
                ..inner
            };
            f.render_widget(
                Paragraph::new(text).alignment(Alignment::Center).wrap(Wrap { trim: true }),
                centered,
            );
        }
        ContactListView::Items(items) => {
            let rows: Vec<ListItem> = items.iter().map(contact_row).collect();
            let list = List::new(rows)
                .block(block)
                .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
                .highlight_symbol("> ");
            let mut state = ListState::default().with_selected(Some(app.contacts.selected));
            f.render_stateful_widget(list, area, &mut state);
        }
    }
}

fn contact_row(item: &ContactListItem) -> ListItem<'static> {
    let mut lines = vec![Line::from(Span::styled(
        item.contact.name.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for line in item.contact.address.lines() {
        lines.push(Line::from(Span::styled(line.to_string(), Style::default().fg(Color::Gray))));
    }
    ListItem::new(Text::from(lines))
}

fn render_delete_dialog(f: &mut Frame, item: &ContactListItem) {
    let popup_area = centered_rect(f.area(), 50, 8);
    f.render_widget(Clear, popup_area);

    let button = |label: &'static str, which: DialogButton| {
        let style = if item.focused_button == which {
            Style::default().bg(Color::Red).fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Span::styled(format!("[ {} ]", label), style)
    };

    let text = Text::from(vec![
        Line::from(Span::styled(DIALOG_TITLE, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(DIALOG_MESSAGE, Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(vec![
            button("Cancel", DialogButton::Cancel),
            Span::raw("    "),
            button("Delete", DialogButton::Delete),
        ]),
    ]);

    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(item.contact.name.clone()));
    f.render_widget(dialog, popup_area);
}

fn render_profile(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Sender Info");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut constraints = Vec::new();
    for spec in PROFILE_FIELDS.iter() {
        let height = if spec.multiline { ADDRESS_LINES } else { 1 };
        // label, bordered input, error line
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(height + 2));
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let form = &app.profile;
    for (index, spec) in PROFILE_FIELDS.iter().enumerate() {
        let label_area = rows[index * 3];
        let input_area = rows[index * 3 + 1];
        let error_area = rows[index * 3 + 2];
        let focused = form.focus.field() == Some(spec.field);
        let value = form.value(spec.field);

        f.render_widget(Paragraph::new(spec.label), label_area);

        let border_style = if focused && form.editing {
            Style::default().fg(Color::Green)
        } else if focused {
            Style::default().fg(Color::Yellow)
        } else if form.error(spec.field).is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        let content = if value.is_empty() {
            Text::from(Span::styled(spec.placeholder, Style::default().fg(Color::DarkGray)))
        } else {
            Text::from(value.to_string())
        };
        f.render_widget(
            Paragraph::new(content)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).border_style(border_style)),
            input_area,
        );

        if let Some(message) = form.error(spec.field) {
            f.render_widget(
                Paragraph::new(Span::styled(message, Style::default().fg(Color::Red))),
                error_area,
            );
        }

        if focused && form.editing {
            let (line, column) = cursor_line_column(value, form.cursor_position);
            let x = input_area.x + 1 + column as u16;
            let y = input_area.y + 1 + line as u16;
            if x < input_area.right().saturating_sub(1) && y < input_area.bottom().saturating_sub(1) {
                f.set_cursor_position(Position::new(x, y));
            }
        }
    }

    let next_style = if form.focus == ProfileFocus::Next {
        Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Blue)
    };
    f.render_widget(
        Paragraph::new(Span::styled("[ Next ]", next_style)).alignment(Alignment::Center),
        rows[rows.len() - 1],
    );
}

/// Line and column (in characters) of a cursor inside possibly
/// multi-line text.
fn cursor_line_column(value: &str, cursor: usize) -> (usize, usize) {
    let before: String = value.chars().take(cursor).collect();
    let line = before.matches('\n').count();
    let column = before.rsplit('\n').next().map(|s| s.chars().count()).unwrap_or(0);
    (line, column)
}

fn render_edit_contact(f: &mut Frame, app: &App, id: &str, area: Rect) {
    let text = match app.store.contact(id) {
        Some(contact) => entity_lines(contact),
        None => vec![Line::from(Span::styled(
            "Contact not found",
            Style::default().fg(Color::Red),
        ))],
    };
    f.render_widget(
        Paragraph::new(Text::from(text))
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Edit Contact")),
        area,
    );
}

fn render_draft(f: &mut Frame, app: &App, title: &str, area: Rect) {
    let mut lines = Vec::new();
    for (label, party) in [("Sender", app.store.sender()), ("Recipient", app.store.recipient())] {
        lines.push(Line::from(Span::styled(
            format!("{}:", label),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        match party {
            Some(entity) => lines.extend(entity_lines(entity)),
            None => lines.push(Line::from(Span::styled("  (not set)", Style::default().fg(Color::DarkGray)))),
        }
        lines.push(Line::from(""));
    }

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(title.to_string())),
        area,
    );
}

fn entity_lines(entity: &BusinessEntity) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("  {}", entity.name),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for line in entity.address.lines() {
        lines.push(Line::from(format!("  {}", line)));
    }
    if let Some(gst) = &entity.gst {
        lines.push(Line::from(format!("  GST No. {}", gst)));
    }
    lines
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let mode = app.mode();
    let input_text = match mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                match app.current_route() {
                    Route::Contacts if app.contacts.is_empty() => "1/2: tabs | ?: help | q: quit".to_string(),
                    Route::Contacts => {
                        "↑↓/jk: move | e: edit | i: new invoice | d: delete | 1/2: tabs | ?: help | q: quit".to_string()
                    }
                    Route::Profile => {
                        "↑↓/Tab: move | Enter: edit field / next | Ctrl+S: next | 1/2: tabs | q: quit".to_string()
                    }
                    _ => "Esc/Backspace: back | 1/2: tabs | q: quit".to_string(),
                }
            }
        }
        AppMode::Editing => {
            let multiline = app.profile.focused_field().is_some_and(|spec| spec.multiline);
            if multiline {
                "Editing (Enter: new line, Esc/Tab: done, Ctrl+S: next)".to_string()
            } else {
                "Editing (Enter/Esc/Tab: done, Ctrl+S: next)".to_string()
            }
        }
        AppMode::ConfirmDelete => "←→/Tab: choose | Enter: press | y: delete | c/Esc: cancel".to_string(),
        AppMode::Help => "↑↓/jk: scroll | Home: top | Esc/q: close help".to_string(),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match mode {
            AppMode::Normal => Style::default(),
            AppMode::Editing => Style::default().fg(Color::Green),
            AppMode::ConfirmDelete => Style::default().fg(Color::Red),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(input, area);
}

fn centered_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let scaled = u32::from(area.width) * u32::from(percent_x) / 100;
    let width = u16::try_from(scaled).unwrap_or(u16::MAX).max(34).min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width - area.width / 5,
        height: area.height - area.height / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("tinvoice Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

pub fn get_help_text() -> &'static str {
    r#"TINVOICE KEYS

=== TABS ===
1               Contacts
2               Profile (sender info)
Tab             Next tab (outside forms)
q               Quit
?  / F1         This help

=== CONTACTS ===
↑↓ or j/k       Move between contacts
e               Edit the selected contact
i               Start a new invoice for the selected contact
d / Delete      Ask to delete the selected contact

=== DELETE DIALOG ===
←→ / Tab        Switch between Cancel and Delete
Enter           Press the highlighted button
y               Delete
c / Esc         Cancel

=== PROFILE ===
↑↓ / Tab        Move between fields and the Next button
Enter           Edit the field, or press Next
Esc             Stop editing
Ctrl+S          Save sender and continue to recipient selection
                In the address field Enter starts a new line

=== INVOICE SCREENS ===
Esc/Backspace   Go back

=== DATA ===
Contacts and the invoice draft are saved to the data file after
every change. Use `tinvoice import <csv>` and `tinvoice export <csv>`
to move contacts in and out (columns: id,name,address,gst)."#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{MemoryStore, StoreCommand};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        render_sized(app, 80, 30)
    }

    fn render_sized(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app_with_contacts() -> App {
        App::new(
            MemoryStore::with_contacts(vec![
                BusinessEntity::new("Acme", "1 Main St").with_id("a"),
                BusinessEntity::new("Globex", "2 Side St").with_id("b"),
            ]),
            None,
        )
    }

    #[test]
    fn test_empty_state_rendered() {
        let screen = render(&App::default());
        assert!(screen.contains("No Contacts Yet"));
        assert!(screen.contains("Your contacts will appear here"));
    }

    #[test]
    fn test_contacts_rendered_in_order() {
        let screen = render(&app_with_contacts());
        let acme = screen.find("Acme").unwrap();
        let globex = screen.find("Globex").unwrap();
        assert!(acme < globex);
        assert!(screen.contains("1 Main St"));
        assert!(!screen.contains("No Contacts Yet"));
    }

    #[test]
    fn test_dialog_rendered_when_open() {
        let mut app = app_with_contacts();
        assert!(!render(&app).contains(DIALOG_TITLE));

        app.long_press_selected();
        let screen = render(&app);
        assert!(screen.contains(DIALOG_TITLE));
        assert!(screen.contains(DIALOG_MESSAGE));
        assert!(screen.contains("[ Cancel ]"));
        assert!(screen.contains("[ Delete ]"));
    }

    #[test]
    fn test_profile_shows_placeholders_and_errors() {
        let mut app = App::default();
        app.switch_tab(Route::Profile);
        let screen = render(&app);
        assert!(screen.contains("Sender Info"));
        assert!(screen.contains("Enter your name"));
        assert!(screen.contains("GST No."));

        app.submit_profile();
        let screen = render(&app);
        assert!(screen.contains("Name is required"));
        assert!(screen.contains("Address is required"));
    }

    #[test]
    fn test_profile_prefilled_values_rendered() {
        let mut app = App::default();
        app.store.dispatch(StoreCommand::AddSenderInfo(BusinessEntity::new("X Corp", "Y Street")));
        app.switch_tab(Route::Profile);
        let screen = render(&app);
        assert!(screen.contains("X Corp"));
        assert!(screen.contains("Y Street"));
        assert!(!screen.contains("Enter your name"));
    }

    #[test]
    fn test_draft_screen_shows_recipient() {
        let mut app = app_with_contacts();
        app.start_invoice_for_selected();
        let screen = render(&app);
        assert!(screen.contains("New Invoice"));
        assert!(screen.contains("Acme"));
        assert!(screen.contains("(not set)"));
    }

    #[test]
    fn test_cursor_line_column() {
        assert_eq!(cursor_line_column("abc", 2), (0, 2));
        assert_eq!(cursor_line_column("ab\ncd", 4), (1, 1));
        assert_eq!(cursor_line_column("ab\n", 3), (1, 0));
        assert_eq!(cursor_line_column("", 0), (0, 0));
    }

    #[test]
    fn test_help_popup_rendered() {
        let mut app = App::default();
        app.open_help();
        let screen = render(&app);
        assert!(screen.contains("tinvoice Help"));
    }

    #[test]
    fn test_popups_fit_very_wide_terminal() {
        let mut app = app_with_contacts();
        app.long_press_selected();
        let screen = render_sized(&app, 1400, 30);
        assert!(screen.contains("Do you want to delete contact?"));

        app.dismiss_dialog();
        app.open_help();
        let screen = render_sized(&app, 20000, 30);
        assert!(screen.contains("tinvoice Help"));
    }
}
