//! End-to-end tests of the registration wizard driven through the keyboard
//!
//! Each test builds an [`App`], feeds it key events the way the terminal loop
//! does, and renders into a `TestBackend` to check what the user would see.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};

use student_signup::app::App;
use student_signup::config::Config;
use student_signup::registration::{Field, RegistrationDraft};
use student_signup::submission::{
    LogSubmitter, RegistrationSubmitter, SubmissionReceipt, SubmitError,
};
use student_signup::ui::StepAction;
use student_signup::wizard::Route;

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Refuses everything until `fail_first` calls have been made
struct CountingSubmitter {
    fail_first: usize,
    calls: AtomicUsize,
}

impl CountingSubmitter {
    fn failing_once() -> Self {
        Self {
            fail_first: 1,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RegistrationSubmitter for CountingSubmitter {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn submit(&self, _draft: &RegistrationDraft) -> Result<SubmissionReceipt, SubmitError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) < self.fail_first {
            Err(SubmitError::Unavailable("timeout".to_string()))
        } else {
            Ok(SubmissionReceipt::new())
        }
    }
}

fn app_with(config: Config) -> App {
    App::new(config, Arc::new(LogSubmitter)).unwrap()
}

fn app() -> App {
    app_with(Config::default())
}

async fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
        .await
        .unwrap();
}

async fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c)).await;
    }
}

/// Render the app and return the screen as one string per row
fn screen(app: &App) -> String {
    let backend = TestBackend::new(100, 32);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();

    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

async fn complete_step_one(app: &mut App) {
    type_text(app, "Ana").await;
    press(app, KeyCode::Tab).await;
    type_text(app, "Díaz").await;
    press(app, KeyCode::Tab).await;
    type_text(app, "ana@x.com").await;
    press(app, KeyCode::Enter).await;
}

async fn complete_step_two(app: &mut App, password: &str, confirm: &str) {
    type_text(app, password).await;
    press(app, KeyCode::Tab).await;
    type_text(app, confirm).await;
    press(app, KeyCode::Enter).await;
}

// ─── Shell ───────────────────────────────────────────────────────────────────

#[test]
fn landing_page_shows_welcome_navbar_and_footer() {
    let app = app();
    let text = screen(&app);

    assert!(text.contains("Bienvenido a nuestra aplicación"));
    assert!(text.contains("Por favor, regístrate para continuar."));
    assert!(text.contains("Registrarse"));
    assert!(text.contains("Logo de la empresa"));
    assert!(text.contains("© 2023 Copyright: MDBootstrap.com"));
    assert_eq!(text.matches("App estudiantes").count(), 1);
}

#[tokio::test]
async fn help_overlay_lists_shortcuts() {
    let mut app = app();
    press(&mut app, KeyCode::F(1)).await;
    let text = screen(&app);
    assert!(text.contains("Atajos de teclado"));
    assert!(text.contains("Ir a una ruta"));
}

#[tokio::test]
async fn address_bar_reports_unknown_route() {
    let mut app = app();
    app.handle_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL))
        .await
        .unwrap();
    type_text(&mut app, "x").await;
    press(&mut app, KeyCode::Enter).await;

    assert!(app.address_bar().visible);
    assert_eq!(app.route(), Route::Home);
    assert!(screen(&app).contains("unknown route '/x'"));
}

// ─── Full flow ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn keyboard_walkthrough_reaches_confirmation() {
    let mut app = app();

    // Registrarse
    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.route(), Route::PersonalInfo);
    assert!(screen(&app).contains("Paso 1: Información personal"));

    complete_step_one(&mut app).await;
    assert_eq!(app.route(), Route::Password);
    assert!(screen(&app).contains("Paso 2: Contraseña"));

    complete_step_two(&mut app, "abcdef", "abcdef").await;
    assert_eq!(app.route(), Route::Summary);

    let summary = screen(&app);
    assert!(summary.contains("Paso 3: Resumen"));
    assert!(summary.contains("Ana"));
    assert!(summary.contains("Díaz"));
    assert!(summary.contains("ana@x.com"));

    // Anterior has focus first; move to Enviar
    press(&mut app, KeyCode::Right).await;
    assert_eq!(app.form().focused_action(), Some(StepAction::Send));
    press(&mut app, KeyCode::Enter).await;

    assert_eq!(app.route(), Route::Submitted);
    assert!(app.wizard().last_receipt().is_some());
    assert!(app.wizard().draft().is_blank());
    assert!(screen(&app).contains("Gracias por registrarte"));
}

#[tokio::test]
async fn values_survive_going_back_and_forth() {
    let mut app = app();
    app.go_to(Route::PersonalInfo);
    complete_step_one(&mut app).await;

    app.apply_action(StepAction::Previous).await;
    assert_eq!(app.route(), Route::PersonalInfo);
    let values: Vec<&str> = app.form().fields().iter().map(|f| f.value()).collect();
    assert_eq!(values, vec!["Ana", "Díaz", "ana@x.com"]);
}

// ─── Validation display ──────────────────────────────────────────────────────

#[tokio::test]
async fn errors_hidden_until_field_is_left() {
    let mut app = app();
    app.go_to(Route::PersonalInfo);
    assert!(!screen(&app).contains("Campo obligatorio"));

    // Leave the empty first name
    press(&mut app, KeyCode::Tab).await;
    assert_eq!(screen(&app).matches("Campo obligatorio").count(), 1);
}

#[tokio::test]
async fn invalid_email_blocks_step_one() {
    let mut app = app();
    app.go_to(Route::PersonalInfo);
    type_text(&mut app, "Ana").await;
    press(&mut app, KeyCode::Tab).await;
    type_text(&mut app, "Diaz").await;
    press(&mut app, KeyCode::Tab).await;
    type_text(&mut app, "not-an-email").await;
    press(&mut app, KeyCode::Enter).await;

    assert_eq!(app.route(), Route::PersonalInfo);
    assert_eq!(app.form().focused_field(), Some(Field::Email));
    assert!(screen(&app).contains("Email inválido"));
}

#[tokio::test]
async fn mismatching_passwords_stay_on_step_two() {
    let mut app = app();
    app.go_to(Route::Password);
    complete_step_two(&mut app, "abcdef", "abcdeg").await;

    assert_eq!(app.route(), Route::Password);
    assert_eq!(app.form().focused_field(), Some(Field::ConfirmPassword));
    assert!(screen(&app).contains("Las contraseñas no coinciden"));
}

#[tokio::test]
async fn short_password_is_reported() {
    let mut app = app();
    app.go_to(Route::Password);
    complete_step_two(&mut app, "abc", "abc").await;

    assert_eq!(app.route(), Route::Password);
    assert!(screen(&app).contains("La contraseña debe tener al menos 6 caracteres"));
}

#[tokio::test]
async fn passwords_are_never_rendered() {
    let mut app = app();
    app.go_to(Route::Password);
    type_text(&mut app, "secreto1").await;
    assert!(!screen(&app).contains("secreto1"));

    app.go_to(Route::Summary);
    let summary = screen(&app);
    assert!(!summary.contains("secreto1"));
    assert!(!summary.contains("Contraseña:"));
}

#[tokio::test]
async fn direct_summary_entry_shows_empty_values() {
    let mut app = app();
    app.go_to(Route::Summary);
    assert_eq!(app.route(), Route::Summary);

    // Enviar with an empty draft goes back to step 1 with every error shown
    app.apply_action(StepAction::Send).await;
    assert_eq!(app.route(), Route::PersonalInfo);
    assert_eq!(screen(&app).matches("Campo obligatorio").count(), 3);
}

// ─── Guard and submission ────────────────────────────────────────────────────

#[tokio::test]
async fn guarded_routes_redirect_to_first_incomplete_step() {
    let mut config = Config::default();
    config.wizard.guard_routes = true;
    let mut app = app_with(config);

    app.go_to(Route::Summary);
    assert_eq!(app.route(), Route::PersonalInfo);
    assert_eq!(app.form().focused_field(), Some(Field::FirstName));
    assert!(screen(&app).contains("Campo obligatorio"));
}

#[tokio::test]
async fn failed_submission_keeps_draft_and_can_retry() {
    let submitter = Arc::new(CountingSubmitter::failing_once());
    let mut app = App::new(Config::default(), submitter.clone()).unwrap();

    app.go_to(Route::PersonalInfo);
    complete_step_one(&mut app).await;
    complete_step_two(&mut app, "abcdef", "abcdef").await;
    assert_eq!(app.route(), Route::Summary);

    app.apply_action(StepAction::Send).await;
    assert_eq!(app.route(), Route::Summary);
    assert_eq!(app.wizard().draft().first_name, "Ana");
    let text = screen(&app);
    assert!(text.contains("No se pudo enviar el formulario"));
    assert!(text.contains("Pulsa Enviar para reintentar."));

    app.apply_action(StepAction::Send).await;
    assert_eq!(app.route(), Route::Submitted);
    assert_eq!(submitter.calls.load(Ordering::SeqCst), 2);
}
