//! Step forms: the fields and buttons of the current route

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::registration::{Field, RegistrationDraft};
use crate::ui::form_field::FormField;
use crate::wizard::{Route, Wizard};

mod password;
mod personal_info;
mod submitted;
mod summary;

/// Buttons a step can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    /// Landing call to action
    Register,
    /// Step 1 submit
    Submit,
    /// Step 1 reset
    Cancel,
    /// Back one step, no validation
    Previous,
    /// Step 2 forward
    Next,
    /// Summary final submit
    Send,
}

impl StepAction {
    pub fn label(&self) -> &'static str {
        match self {
            StepAction::Register => "Registrarse",
            StepAction::Submit | StepAction::Next => "Siguiente",
            StepAction::Cancel => "Cancelar",
            StepAction::Previous => "Anterior",
            StepAction::Send => "Enviar",
        }
    }

    /// Buttons of a route, in display order
    pub fn for_route(route: Route) -> &'static [StepAction] {
        match route {
            Route::Home => &[StepAction::Register],
            Route::PersonalInfo => &[StepAction::Submit, StepAction::Cancel],
            Route::Password => &[StepAction::Previous, StepAction::Next],
            Route::Summary => &[StepAction::Previous, StepAction::Send],
            Route::Submitted => &[],
        }
    }

    /// Action triggered by Enter inside a field
    pub fn primary(route: Route) -> Option<StepAction> {
        match route {
            Route::Home => Some(StepAction::Register),
            Route::PersonalInfo => Some(StepAction::Submit),
            Route::Password => Some(StepAction::Next),
            Route::Summary => Some(StepAction::Send),
            Route::Submitted => None,
        }
    }

    fn color(&self) -> Color {
        match self {
            StepAction::Register | StepAction::Submit | StepAction::Next | StepAction::Send => {
                Color::Green
            }
            StepAction::Cancel => Color::Red,
            StepAction::Previous => Color::Gray,
        }
    }
}

/// What currently has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(usize),
    Action(StepAction),
}

/// Form for one route, seeded from the shared draft.
///
/// Focus runs over the fields first, then the buttons, and wraps.
pub struct StepForm {
    route: Route,
    fields: Vec<FormField>,
    actions: &'static [StepAction],
    focus: usize,
}

impl StepForm {
    pub fn new(route: Route, draft: &RegistrationDraft, max_length: Option<usize>) -> Self {
        let fields = route
            .fields()
            .iter()
            .map(|f| FormField::new(*f, draft.get(*f), max_length))
            .collect();

        Self {
            route,
            fields,
            actions: StepAction::for_route(route),
            focus: 0,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn actions(&self) -> &'static [StepAction] {
        self.actions
    }

    fn focus_len(&self) -> usize {
        self.fields.len() + self.actions.len()
    }

    pub fn focus(&self) -> Option<Focus> {
        if self.focus < self.fields.len() {
            Some(Focus::Field(self.focus))
        } else {
            self.actions
                .get(self.focus - self.fields.len())
                .map(|a| Focus::Action(*a))
        }
    }

    pub fn focused_field(&self) -> Option<Field> {
        self.fields.get(self.focus).map(FormField::field)
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focus)
    }

    pub fn focused_action(&self) -> Option<StepAction> {
        match self.focus() {
            Some(Focus::Action(action)) => Some(action),
            _ => None,
        }
    }

    pub fn primary_action(&self) -> Option<StepAction> {
        StepAction::primary(self.route)
    }

    /// Move focus forward; returns the field that lost focus, if any
    pub fn focus_next(&mut self) -> Option<Field> {
        let left = self.focused_field();
        let len = self.focus_len();
        if len > 0 {
            self.focus = (self.focus + 1) % len;
        }
        left
    }

    /// Move focus backward; returns the field that lost focus, if any
    pub fn focus_prev(&mut self) -> Option<Field> {
        let left = self.focused_field();
        let len = self.focus_len();
        if len > 0 {
            self.focus = if self.focus == 0 {
                len - 1
            } else {
                self.focus - 1
            };
        }
        left
    }

    /// Put focus on a field of this form
    pub fn focus_field(&mut self, field: Field) -> bool {
        match self.fields.iter().position(|f| f.field() == field) {
            Some(i) => {
                self.focus = i;
                true
            }
            None => false,
        }
    }

    /// Move between buttons; no-op while a field has focus
    pub fn cycle_action(&mut self, forward: bool) {
        if self.focused_action().is_none() || self.actions.is_empty() {
            return;
        }
        let idx = self.focus - self.fields.len();
        let len = self.actions.len();
        let next = if forward {
            (idx + 1) % len
        } else if idx == 0 {
            len - 1
        } else {
            idx - 1
        };
        self.focus = self.fields.len() + next;
    }

    /// Render the current route's form
    pub fn render(&self, frame: &mut Frame, area: Rect, wizard: &Wizard, mask: char) {
        match self.route {
            Route::PersonalInfo => self.render_personal_info(frame, area, wizard, mask),
            Route::Password => self.render_password(frame, area, wizard, mask),
            Route::Summary => self.render_summary(frame, area, wizard),
            Route::Submitted => self.render_submitted(frame, area),
            // Landing page belongs to the shell
            Route::Home => {}
        }
    }

    /// Panel with the step title, returning the inner area
    pub(crate) fn step_panel(&self, frame: &mut Frame, area: Rect) -> Rect {
        frame.render_widget(Clear, area);
        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    self.route.title(),
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        inner
    }

    /// Editable fields with their visible errors, stacked from the top
    pub(crate) fn render_fields(&self, frame: &mut Frame, area: Rect, wizard: &Wizard, mask: char) {
        let constraints: Vec<Constraint> = self
            .fields
            .iter()
            .map(|f| Constraint::Length(f.render_height()))
            .chain(std::iter::once(Constraint::Min(0)))
            .collect();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (i, field) in self.fields.iter().enumerate() {
            let focused = self.focus == i;
            field.render(
                frame,
                rows[i],
                focused,
                mask,
                wizard.visible_error(field.field()),
            );
        }
    }

    /// Button row, focused button highlighted
    pub(crate) fn render_buttons(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focused_action();
        let mut spans = Vec::new();
        for action in self.actions {
            let style = if focused == Some(*action) {
                Style::default()
                    .fg(Color::Black)
                    .bg(action.color())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(action.color())
            };
            spans.push(Span::raw("   "));
            spans.push(Span::styled(format!(" {} ", action.label()), style));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            area,
        );
    }
}
