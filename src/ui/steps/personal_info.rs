//! Step 1: personal information

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::ui::steps::StepForm;
use crate::wizard::Wizard;

impl StepForm {
    pub(crate) fn render_personal_info(
        &self,
        frame: &mut Frame,
        area: Rect,
        wizard: &Wizard,
        mask: char,
    ) {
        let inner = self.step_panel(frame, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(9),    // Nombre, Apellido, Email
                Constraint::Length(1), // Buttons
            ])
            .split(inner);

        self.render_fields(frame, chunks[0], wizard, mask);
        self.render_buttons(frame, chunks[1]);
    }
}
