//! Step 2: password and confirmation

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::registration::MIN_PASSWORD_LENGTH;
use crate::ui::steps::StepForm;
use crate::wizard::Wizard;

impl StepForm {
    pub(crate) fn render_password(&self, frame: &mut Frame, area: Rect, wizard: &Wizard, mask: char) {
        let inner = self.step_panel(frame, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Hint
                Constraint::Min(6),    // Contraseña, Confirmar contraseña
                Constraint::Length(1), // Buttons
            ])
            .split(inner);

        let hint = Paragraph::new(Line::from(format!(
            "Mínimo {MIN_PASSWORD_LENGTH} caracteres."
        )))
        .alignment(Alignment::Left)
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, chunks[0]);

        self.render_fields(frame, chunks[1], wizard, mask);
        self.render_buttons(frame, chunks[2]);
    }
}
