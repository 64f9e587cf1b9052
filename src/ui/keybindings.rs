//! Centralized keyboard shortcuts registry.
//!
//! Single source of truth for the shortcuts of the registration TUI. It is
//! consumed by:
//! - the help overlay
//! - the footer hints of each screen
//! - the `keys` CLI command

use crossterm::event::KeyCode;

/// A keyboard shortcut definition
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// Primary key for this shortcut
    pub key: KeyCode,
    /// Alternative key
    pub alt_key: Option<KeyCode>,
    /// Whether Ctrl must be held
    pub ctrl: bool,
    /// Human-readable description of what this shortcut does
    pub description: &'static str,
    /// Category for grouping in help
    pub category: ShortcutCategory,
    /// Context where this shortcut is active
    pub context: ShortcutContext,
}

/// Categories for organizing shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutCategory {
    General,
    Navigation,
    Editing,
}

/// Contexts where shortcuts are active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutContext {
    /// Active on every screen
    Global,
    /// Active while a step form is shown
    Form,
    /// Active while the address bar is open
    AddressBar,
}

impl ShortcutCategory {
    /// Display name for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutCategory::General => "General",
            ShortcutCategory::Navigation => "Navegación",
            ShortcutCategory::Editing => "Edición",
        }
    }

    /// All categories in display order
    pub fn all() -> &'static [ShortcutCategory] {
        &[
            ShortcutCategory::General,
            ShortcutCategory::Navigation,
            ShortcutCategory::Editing,
        ]
    }
}

impl ShortcutContext {
    /// Display name for this context
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutContext::Global => "Global",
            ShortcutContext::Form => "Formulario",
            ShortcutContext::AddressBar => "Barra de dirección",
        }
    }

    /// All contexts in display order
    pub fn all() -> &'static [ShortcutContext] {
        &[
            ShortcutContext::Global,
            ShortcutContext::Form,
            ShortcutContext::AddressBar,
        ]
    }
}

impl Shortcut {
    /// Format key for display (e.g., "Ctrl+L", "Tab/↓")
    pub fn key_display(&self) -> String {
        let primary = format_keycode(&self.key);
        let keys = match &self.alt_key {
            Some(alt) => format!("{}/{}", primary, format_keycode(alt)),
            None => primary,
        };
        if self.ctrl {
            format!("Ctrl+{keys}")
        } else {
            keys
        }
    }

    /// Format key for help overlay (left-padded to 12 chars)
    pub fn key_display_padded(&self) -> String {
        format!("{:<12}", self.key_display())
    }
}

/// Format a `KeyCode` for display
fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(c) => c.to_uppercase().to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => format!("{key:?}"),
    }
}

/// Static registry of all keyboard shortcuts
pub static SHORTCUTS: &[Shortcut] = &[
    // === Global Context ===
    Shortcut {
        key: KeyCode::Char('c'),
        alt_key: None,
        ctrl: true,
        description: "Salir",
        category: ShortcutCategory::General,
        context: ShortcutContext::Global,
    },
    Shortcut {
        key: KeyCode::F(1),
        alt_key: None,
        ctrl: false,
        description: "Mostrar/ocultar ayuda",
        category: ShortcutCategory::General,
        context: ShortcutContext::Global,
    },
    Shortcut {
        key: KeyCode::Char('l'),
        alt_key: None,
        ctrl: true,
        description: "Ir a una ruta",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Global,
    },
    Shortcut {
        key: KeyCode::Esc,
        alt_key: None,
        ctrl: false,
        description: "Volver al inicio",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Global,
    },
    // === Form Context ===
    Shortcut {
        key: KeyCode::Tab,
        alt_key: Some(KeyCode::Down),
        ctrl: false,
        description: "Siguiente campo o botón",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Form,
    },
    Shortcut {
        key: KeyCode::BackTab,
        alt_key: Some(KeyCode::Up),
        ctrl: false,
        description: "Campo o botón anterior",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Form,
    },
    Shortcut {
        key: KeyCode::Enter,
        alt_key: None,
        ctrl: false,
        description: "Activar botón / enviar el paso",
        category: ShortcutCategory::General,
        context: ShortcutContext::Form,
    },
    Shortcut {
        key: KeyCode::Left,
        alt_key: Some(KeyCode::Right),
        ctrl: false,
        description: "Mover el cursor o cambiar de botón",
        category: ShortcutCategory::Editing,
        context: ShortcutContext::Form,
    },
    Shortcut {
        key: KeyCode::Backspace,
        alt_key: Some(KeyCode::Delete),
        ctrl: false,
        description: "Borrar carácter",
        category: ShortcutCategory::Editing,
        context: ShortcutContext::Form,
    },
    // === Address Bar Context ===
    Shortcut {
        key: KeyCode::Enter,
        alt_key: None,
        ctrl: false,
        description: "Navegar a la ruta",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::AddressBar,
    },
    Shortcut {
        key: KeyCode::Esc,
        alt_key: None,
        ctrl: false,
        description: "Cerrar la barra",
        category: ShortcutCategory::General,
        context: ShortcutContext::AddressBar,
    },
];

/// Get all shortcuts for a given context
pub fn shortcuts_for_context(context: ShortcutContext) -> impl Iterator<Item = &'static Shortcut> {
    SHORTCUTS.iter().filter(move |s| s.context == context)
}

/// Get shortcuts grouped by category for a given context
pub fn shortcuts_by_category_for_context(
    context: ShortcutContext,
) -> Vec<(ShortcutCategory, Vec<&'static Shortcut>)> {
    let mut result = Vec::new();
    for category in ShortcutCategory::all() {
        let shortcuts: Vec<&Shortcut> = SHORTCUTS
            .iter()
            .filter(|s| s.context == context && s.category == *category)
            .collect();
        if !shortcuts.is_empty() {
            result.push((*category, shortcuts));
        }
    }
    result
}

/// Grouped shortcuts by category
pub type GroupedByCategory = Vec<(ShortcutCategory, Vec<&'static Shortcut>)>;

/// Get all shortcuts grouped by context, then by category
pub fn all_shortcuts_grouped() -> Vec<(ShortcutContext, GroupedByCategory)> {
    ShortcutContext::all()
        .iter()
        .map(|ctx| (*ctx, shortcuts_by_category_for_context(*ctx)))
        .collect()
}
