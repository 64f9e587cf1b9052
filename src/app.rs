use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::registration::Field;
use crate::submission::RegistrationSubmitter;
use crate::ui::shell::{self, AddressBar, AddressBarEvent, HelpDialog};
use crate::ui::{KeyOutcome, StepAction, StepForm, TerminalGuard};
use crate::ui::terminal_guard::install_panic_hook;
use crate::wizard::{Navigation, Route, StepOutcome, Wizard};

pub struct App {
    config: Config,
    wizard: Wizard,
    /// Form of the current route, rebuilt whenever the route changes
    form: StepForm,
    submitter: Arc<dyn RegistrationSubmitter>,
    address_bar: AddressBar,
    help_dialog: HelpDialog,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, submitter: Arc<dyn RegistrationSubmitter>) -> Result<Self> {
        let mut wizard = Wizard::from_config(&config.wizard);
        let start = config.start_route()?;
        let navigation = wizard.navigate(start);

        tracing::info!(
            route = %navigation.route(),
            guarded = wizard.is_guarded(),
            submitter = submitter.name(),
            "Starting registration wizard"
        );

        let form = StepForm::new(
            wizard.route(),
            wizard.draft(),
            Self::max_length(&config),
        );

        Ok(Self {
            config,
            wizard,
            form,
            submitter,
            address_bar: AddressBar::new(),
            help_dialog: HelpDialog::new(),
            should_quit: false,
        })
    }

    fn max_length(config: &Config) -> Option<usize> {
        match config.ui.field_max_length {
            0 => None,
            n => Some(n),
        }
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn route(&self) -> Route {
        self.wizard.route()
    }

    pub fn form(&self) -> &StepForm {
        &self.form
    }

    pub fn address_bar(&self) -> &AddressBar {
        &self.address_bar
    }

    pub fn help_visible(&self) -> bool {
        self.help_dialog.visible
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self) -> Result<()> {
        install_panic_hook();
        let (_guard, mut terminal) = TerminalGuard::enter()?;

        let tick_rate = Duration::from_millis(self.config.ui.tick_rate_ms);

        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key).await?;
                    }
                }
            }
        }

        terminal.show_cursor()?;
        Ok(())
    }

    pub fn render(&self, frame: &mut Frame) {
        let (navbar, body, footer) = shell::layout(frame.area());

        shell::render_navbar(frame, navbar, self.wizard.route());

        if self.wizard.route() == Route::Home {
            shell::render_landing(frame, body, &self.form);
        } else {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(15),
                    Constraint::Percentage(70),
                    Constraint::Percentage(15),
                ])
                .split(body);
            self.form
                .render(frame, columns[1], &self.wizard, self.config.ui.mask_char());
        }

        shell::render_footer(frame, footer);

        // Overlays last
        self.address_bar.render(frame);
        self.help_dialog.render(frame);
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C')) {
            self.should_quit = true;
            return Ok(());
        }

        // Help overlay takes priority
        if self.help_dialog.visible {
            if matches!(key.code, KeyCode::F(1) | KeyCode::Esc) {
                self.help_dialog.toggle();
            }
            return Ok(());
        }

        if self.address_bar.visible {
            if let AddressBarEvent::Navigate(route) = self.address_bar.handle_key(key.code) {
                self.go_to(route);
            }
            return Ok(());
        }

        if ctrl {
            if matches!(key.code, KeyCode::Char('l') | KeyCode::Char('L')) {
                self.address_bar.open(self.wizard.route());
            }
            return Ok(());
        }

        match key.code {
            KeyCode::F(1) => self.help_dialog.toggle(),
            KeyCode::Esc => self.go_to(Route::Home),
            KeyCode::Tab | KeyCode::Down => {
                let left = self.form.focus_next();
                self.leave_field(left);
            }
            KeyCode::BackTab | KeyCode::Up => {
                let left = self.form.focus_prev();
                self.leave_field(left);
            }
            KeyCode::Enter => {
                let action = match self.form.focused_action() {
                    Some(action) => Some(action),
                    None => {
                        let left = self.form.focused_field();
                        self.leave_field(left);
                        self.form.primary_action()
                    }
                };
                if let Some(action) = action {
                    self.apply_action(action).await;
                }
            }
            KeyCode::Left | KeyCode::Right if self.form.focused_action().is_some() => {
                self.form.cycle_action(key.code == KeyCode::Right);
            }
            code => self.edit_focused_field(code),
        }

        Ok(())
    }

    /// Forward a key to the focused input and mirror edits into the draft
    fn edit_focused_field(&mut self, code: KeyCode) {
        let Some(input) = self.form.focused_field_mut() else {
            return;
        };
        if input.handle_key(code) == KeyOutcome::Edited {
            let field = input.field();
            let value = input.value().to_string();
            self.wizard.set_field(field, value);
        }
    }

    fn leave_field(&mut self, field: Option<Field>) {
        if let Some(field) = field {
            self.wizard.touch(field);
        }
    }

    /// Run a button of the current step
    pub async fn apply_action(&mut self, action: StepAction) {
        tracing::debug!(route = %self.wizard.route(), action = action.label(), "Step action");

        let outcome = match action {
            StepAction::Register | StepAction::Submit | StepAction::Next => self.wizard.advance(),
            StepAction::Previous => StepOutcome::Advanced(self.wizard.previous()),
            StepAction::Cancel => {
                self.wizard.reset();
                self.rebuild_form();
                return;
            }
            StepAction::Send => {
                let submitter = Arc::clone(&self.submitter);
                self.wizard.submit(submitter.as_ref()).await
            }
        };

        match outcome {
            StepOutcome::Advanced(_) => self.rebuild_form(),
            StepOutcome::Blocked { route, errors } => {
                if route != self.form.route() {
                    self.rebuild_form();
                }
                if let Some(field) = errors.first_field() {
                    self.form.focus_field(field);
                }
            }
            // Summary shows the error, focus stays on Enviar for a retry
            StepOutcome::Failed(_) | StepOutcome::Unchanged(_) => {}
        }
    }

    /// Navigate as if the path had been typed in the address bar
    pub fn go_to(&mut self, route: Route) {
        let navigation = self.wizard.navigate(route);
        self.rebuild_form();

        if let Navigation::Redirected { to, .. } = navigation {
            let failing = self.wizard.step_errors(to).first_field();
            if let Some(field) = failing {
                self.form.focus_field(field);
            }
        }
    }

    fn rebuild_form(&mut self) {
        self.form = StepForm::new(
            self.wizard.route(),
            self.wizard.draft(),
            Self::max_length(&self.config),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::LogSubmitter;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn new_app() -> App {
        App::new(Config::default(), Arc::new(LogSubmitter)).unwrap()
    }

    #[tokio::test]
    async fn test_starts_on_configured_route() {
        let mut config = Config::default();
        config.wizard.start_route = "/step2".to_string();
        let app = App::new(config, Arc::new(LogSubmitter)).unwrap();
        assert_eq!(app.route(), Route::Password);
    }

    #[test]
    fn test_invalid_start_route_is_an_error() {
        let mut config = Config::default();
        config.wizard.start_route = "/step9".to_string();
        assert!(App::new(config, Arc::new(LogSubmitter)).is_err());
    }

    #[tokio::test]
    async fn test_ctrl_c_quits() {
        let mut app = new_app();
        app.handle_key(ctrl('c')).await.unwrap();
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_enter_on_landing_opens_step_one() {
        let mut app = new_app();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.route(), Route::PersonalInfo);
        assert_eq!(app.form().focused_field(), Some(Field::FirstName));
    }

    #[tokio::test]
    async fn test_typing_writes_into_the_draft() {
        let mut app = new_app();
        app.go_to(Route::PersonalInfo);
        for c in "Ana".chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
        assert_eq!(app.wizard().draft().first_name, "Ana");
        assert!(!app.wizard().is_touched(Field::FirstName));

        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        assert!(app.wizard().is_touched(Field::FirstName));
        assert_eq!(app.form().focused_field(), Some(Field::LastName));
    }

    #[tokio::test]
    async fn test_blocked_step_focuses_first_failing_field() {
        let mut app = new_app();
        app.go_to(Route::PersonalInfo);
        for c in "Ana".chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(app.route(), Route::PersonalInfo);
        assert_eq!(app.form().focused_field(), Some(Field::LastName));
    }

    #[tokio::test]
    async fn test_address_bar_navigation() {
        let mut app = new_app();
        app.handle_key(ctrl('l')).await.unwrap();
        assert!(app.address_bar().visible);

        // Replace "/" with "/step3"
        app.handle_key(key(KeyCode::Backspace)).await.unwrap();
        for c in "/step3".chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert!(!app.address_bar().visible);
        assert_eq!(app.route(), Route::Summary);
    }

    #[tokio::test]
    async fn test_help_overlay_swallows_keys() {
        let mut app = new_app();
        app.handle_key(key(KeyCode::F(1))).await.unwrap();
        assert!(app.help_visible());

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.route(), Route::Home);

        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert!(!app.help_visible());
    }

    #[tokio::test]
    async fn test_escape_returns_home() {
        let mut app = new_app();
        app.go_to(Route::Password);
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.route(), Route::Home);
    }

    #[tokio::test]
    async fn test_cancel_clears_the_form() {
        let mut app = new_app();
        app.go_to(Route::PersonalInfo);
        for c in "Ana".chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
        app.apply_action(StepAction::Cancel).await;

        assert_eq!(app.route(), Route::PersonalInfo);
        assert!(app.wizard().draft().is_blank());
        assert_eq!(app.form().fields()[0].value(), "");
    }

    #[tokio::test]
    async fn test_left_right_switch_buttons() {
        let mut app = new_app();
        app.go_to(Route::Summary);
        assert_eq!(app.form().focused_action(), Some(StepAction::Previous));
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        assert_eq!(app.form().focused_action(), Some(StepAction::Send));
    }
}
