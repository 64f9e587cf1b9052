//! Persistent layout: navigation bar, landing page, footer and overlays

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::keybindings::{
    shortcuts_by_category_for_context, shortcuts_for_context, ShortcutContext,
};
use crate::ui::steps::StepForm;
use crate::wizard::Route;

pub const BRAND: &str = "App estudiantes";
pub const FOOTER_TEXT: &str = "© 2023 Copyright: MDBootstrap.com";

/// Split the screen into navigation bar, body and footer
pub fn layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Navbar
            Constraint::Min(10),   // Body
            Constraint::Length(2), // Footer
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Brand link on the left, current route on the right
pub fn render_navbar(frame: &mut Frame, area: Rect, route: Route) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let brand = Paragraph::new(Line::from(Span::styled(
        BRAND,
        Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(brand, halves[0]);

    let location = Paragraph::new(Line::from(vec![
        Span::styled(
            route.step_number().map_or(String::new(), |n| format!("{n}/3  ")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(route.path(), Style::default().fg(Color::Cyan)),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(location, halves[1]);
}

/// Attribution plus the global shortcut hints
pub fn render_footer(frame: &mut Frame, area: Rect) {
    let mut hints = Vec::new();
    for shortcut in shortcuts_for_context(ShortcutContext::Global) {
        hints.push(Span::styled(
            shortcut.key_display(),
            Style::default().fg(Color::Yellow),
        ));
        hints.push(Span::raw(format!(" {}  ", shortcut.description)));
    }

    let footer = Paragraph::new(vec![
        Line::from(Span::styled(FOOTER_TEXT, Style::default().fg(Color::Gray))),
        Line::from(hints),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

/// Welcome text with the call to action; the logo is shown by its alt text
pub fn render_landing(frame: &mut Frame, area: Rect, form: &StepForm) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Welcome
            Constraint::Length(2), // Prompt
            Constraint::Length(1), // CTA
            Constraint::Min(0),
        ])
        .split(columns[0]);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Bienvenido a nuestra aplicación",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        ))),
        left[0],
    );
    frame.render_widget(
        Paragraph::new("Por favor, regístrate para continuar."),
        left[1],
    );
    form.render_buttons(frame, left[2]);

    let logo = Paragraph::new(Line::from(Span::styled(
        "Logo de la empresa",
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(logo, columns[1]);
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Result of a key pressed in the address bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressBarEvent {
    /// Still editing
    Editing,
    /// A known route was entered
    Navigate(Route),
    /// Closed without navigating
    Closed,
}

/// Path prompt, the terminal's stand-in for typing a URL
#[derive(Debug, Default)]
pub struct AddressBar {
    pub visible: bool,
    input: String,
    error: Option<String>,
}

impl AddressBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open prefilled with the current path
    pub fn open(&mut self, current: Route) {
        self.visible = true;
        self.input = current.path().to_string();
        self.error = None;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.error = None;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn handle_key(&mut self, key: KeyCode) -> AddressBarEvent {
        match key {
            KeyCode::Esc => {
                self.close();
                AddressBarEvent::Closed
            }
            KeyCode::Enter => match Route::parse(&self.input) {
                Ok(route) => {
                    self.close();
                    AddressBarEvent::Navigate(route)
                }
                Err(err) => {
                    tracing::debug!(input = %self.input, "Address bar rejected path");
                    self.error = Some(err.to_string());
                    AddressBarEvent::Editing
                }
            },
            KeyCode::Backspace => {
                self.input.pop();
                self.error = None;
                AddressBarEvent::Editing
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                self.error = None;
                AddressBarEvent::Editing
            }
            _ => AddressBarEvent::Editing,
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.visible {
            return;
        }

        let area = centered_rect(60, 30, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Ir a ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Ruta: ", Style::default().fg(Color::Gray)),
                Span::styled(format!("{}|", self.input), Style::default().fg(Color::White)),
            ]),
            Line::from(""),
        ];
        match &self.error {
            Some(err) => lines.push(Line::from(Span::styled(
                err.clone(),
                Style::default().fg(Color::Red),
            ))),
            None => lines.push(Line::from(Span::styled(
                Route::all()
                    .iter()
                    .map(Route::path)
                    .collect::<Vec<_>>()
                    .join("  "),
                Style::default().fg(Color::DarkGray),
            ))),
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }
}

/// Keyboard shortcut overlay
#[derive(Debug, Default)]
pub struct HelpDialog {
    pub visible: bool,
}

impl HelpDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.visible {
            return;
        }

        let area = centered_rect(70, 80, frame.area());
        frame.render_widget(Clear, area);

        let mut help_text = vec![
            Line::from(Span::styled(
                "Atajos de teclado",
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::Cyan),
            )),
            Line::from(""),
        ];

        for context in ShortcutContext::all() {
            help_text.push(Line::from(Span::styled(
                context.display_name(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for (_, shortcuts) in shortcuts_by_category_for_context(*context) {
                for shortcut in shortcuts {
                    help_text.push(Line::from(vec![
                        Span::styled(
                            shortcut.key_display_padded(),
                            Style::default().fg(Color::Yellow),
                        ),
                        Span::raw(shortcut.description),
                    ]));
                }
            }
            help_text.push(Line::from(""));
        }

        let block = Block::default()
            .title(" Ayuda ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        frame.render_widget(
            Paragraph::new(help_text)
                .block(block)
                .wrap(Wrap { trim: false }),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_path(bar: &mut AddressBar, path: &str) {
        for c in path.chars() {
            bar.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn test_address_bar_opens_with_current_path() {
        let mut bar = AddressBar::new();
        bar.open(Route::Password);
        assert!(bar.visible);
        assert_eq!(bar.input(), "/step2");
    }

    #[test]
    fn test_address_bar_navigates_to_known_route() {
        let mut bar = AddressBar::new();
        bar.open(Route::Home);
        type_path(&mut bar, "step3");
        assert_eq!(
            bar.handle_key(KeyCode::Enter),
            AddressBarEvent::Navigate(Route::Summary)
        );
        assert!(!bar.visible);
    }

    #[test]
    fn test_address_bar_reports_unknown_route() {
        let mut bar = AddressBar::new();
        bar.open(Route::Home);
        type_path(&mut bar, "nope");
        assert_eq!(bar.handle_key(KeyCode::Enter), AddressBarEvent::Editing);
        assert!(bar.visible);
        assert_eq!(bar.error(), Some("unknown route '/nope'"));

        // Editing clears the error
        bar.handle_key(KeyCode::Backspace);
        assert_eq!(bar.error(), None);
    }

    #[test]
    fn test_address_bar_escape_closes() {
        let mut bar = AddressBar::new();
        bar.open(Route::Summary);
        assert_eq!(bar.handle_key(KeyCode::Esc), AddressBarEvent::Closed);
        assert!(!bar.visible);
    }

    #[test]
    fn test_help_toggle() {
        let mut help = HelpDialog::new();
        help.toggle();
        assert!(help.visible);
        help.toggle();
        assert!(!help.visible);
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 40, outer);
        assert!(inner.width <= 60 && inner.height <= 20);
        assert!(inner.x >= 20 && inner.y >= 15);
    }
}
