//! Step 3: read-only summary of the draft

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::registration::Field;
use crate::ui::steps::StepForm;
use crate::wizard::Wizard;

/// Fields shown on the summary. Passwords are left out.
pub(crate) const SUMMARY_FIELDS: &[Field] = &[Field::FirstName, Field::LastName, Field::Email];

impl StepForm {
    pub(crate) fn render_summary(&self, frame: &mut Frame, area: Rect, wizard: &Wizard) {
        let inner = self.step_panel(frame, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(SUMMARY_FIELDS.len() as u16 + 1), // Values
                Constraint::Min(2),                                  // Submission error
                Constraint::Length(1),                               // Buttons
            ])
            .split(inner);

        let draft = wizard.draft();
        let lines: Vec<Line> = SUMMARY_FIELDS
            .iter()
            .map(|field| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<12}", field.label()),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(
                        draft.get(*field).to_string(),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), chunks[0]);

        if let Some(err) = wizard.submit_error() {
            let mut text = vec![Line::from(Span::styled(
                format!("No se pudo enviar el formulario: {err}"),
                Style::default().fg(Color::Red),
            ))];
            if err.is_retryable() {
                text.push(Line::from(Span::styled(
                    "Pulsa Enviar para reintentar.",
                    Style::default().fg(Color::Yellow),
                )));
            }
            frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), chunks[1]);
        }

        self.render_buttons(frame, chunks[2]);
    }
}
