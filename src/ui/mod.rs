pub mod form_field;
pub mod keybindings;
pub mod shell;
pub mod steps;
pub mod terminal_guard;

pub use form_field::{FormField, KeyOutcome};
pub use shell::{AddressBar, AddressBarEvent, HelpDialog};
pub use steps::{Focus, StepAction, StepForm};
pub use terminal_guard::{install_panic_hook, TerminalGuard, Tui};
