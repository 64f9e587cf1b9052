use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use student_signup::app::App;
use student_signup::config::Config;
use student_signup::logging;
use student_signup::registration::{validate, validate_fields, Field, RegistrationDraft};
use student_signup::submission::LogSubmitter;
use student_signup::ui::keybindings::all_shortcuts_grouped;
use student_signup::wizard::Route;

#[derive(Parser)]
#[command(name = "student-signup")]
#[command(about = "Multi-step student registration wizard")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Route to open the wizard on (e.g. /step1)
    #[arg(short, long)]
    route: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the wizard routes
    Routes,

    /// Validate a registration draft without opening the UI
    Validate {
        /// Draft file (.json, .toml or .yaml) using camelCase keys
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        password: Option<String>,

        #[arg(long)]
        confirm_password: Option<String>,

        /// Only check the fields of one step (1 or 2; 3 checks everything)
        #[arg(short, long)]
        step: Option<usize>,

        /// Print errors as a JSON object keyed by field
        #[arg(long)]
        json: bool,
    },

    /// Show keyboard shortcuts
    Keys,

    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(route) = cli.route {
        config.wizard.start_route = route;
    }

    // No subcommand = TUI, which owns the terminal
    let is_tui_mode = cli.command.is_none();

    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Routes) => cmd_routes(),
        Some(Commands::Validate {
            file,
            first_name,
            last_name,
            email,
            password,
            confirm_password,
            step,
            json,
        }) => {
            let overrides = [
                (Field::FirstName, first_name),
                (Field::LastName, last_name),
                (Field::Email, email),
                (Field::Password, password),
                (Field::ConfirmPassword, confirm_password),
            ];
            cmd_validate(file, overrides, step, json)?;
        }
        Some(Commands::Keys) => cmd_keys(),
        Some(Commands::Config) => {
            print!("{}", config.to_toml()?);
        }
        None => {
            let mut app = App::new(config, Arc::new(LogSubmitter))?;
            let result = app.run().await;
            logging::report_log_file(logging_handle.log_file_path.as_deref());
            result?;
        }
    }

    Ok(())
}

fn cmd_routes() {
    for route in Route::all() {
        let step = route
            .step_number()
            .map_or_else(|| "-".to_string(), |n| n.to_string());
        let fields: Vec<&str> = route.fields().iter().map(Field::key).collect();
        println!(
            "{:<8} {:<3} {:<30} {}",
            route.path(),
            step,
            route.title(),
            fields.join(", ")
        );
    }
}

fn cmd_validate(
    file: Option<PathBuf>,
    overrides: [(Field, Option<String>); 5],
    step: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut draft = match file {
        Some(path) => RegistrationDraft::from_file(&path)?,
        None => RegistrationDraft::default(),
    };
    for (field, value) in overrides {
        if let Some(value) = value {
            draft.set(field, value);
        }
    }

    let errors = match step {
        Some(n @ 1..=2) => validate_fields(&draft, Route::steps()[n - 1].fields()),
        Some(3) | None => validate(&draft),
        Some(n) => anyhow::bail!("Unknown step {n}: expected 1, 2 or 3"),
    };

    tracing::debug!(failing = errors.len(), "Draft validated");

    if json {
        println!("{}", serde_json::to_string_pretty(&errors.messages())?);
    } else if errors.is_empty() {
        println!("OK");
    } else {
        for (field, error) in errors.iter() {
            println!("{:<16} {}", field.key(), error);
        }
    }

    if !errors.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_keys() {
    for (context, categories) in all_shortcuts_grouped() {
        println!("{}", context.display_name());
        for (_, shortcuts) in categories {
            for shortcut in shortcuts {
                println!("  {}{}", shortcut.key_display_padded(), shortcut.description);
            }
        }
        println!();
    }
}
