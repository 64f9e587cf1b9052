//! Confirmation shown after a successful submission

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::ui::steps::StepForm;

impl StepForm {
    pub(crate) fn render_submitted(&self, frame: &mut Frame, area: Rect) {
        let inner = self.step_panel(frame, area);

        let text = vec![
            Line::from(""),
            Line::from("Gracias por registrarte. Tus datos han sido enviados correctamente."),
            Line::from(""),
            Line::styled(
                "Esc vuelve al inicio",
                Style::default().fg(Color::DarkGray),
            ),
        ];
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            inner,
        );
    }
}
