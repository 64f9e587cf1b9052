//! Route table for the registration flow

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::registration::Field;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("unknown route '{0}'")]
    UnknownRoute(String),
}

/// A location in the app, addressed by its path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Route {
    /// Landing page
    Home,
    /// Step 1: first name, last name, email
    PersonalInfo,
    /// Step 2: password and confirmation
    Password,
    /// Step 3: read-only summary
    Summary,
    /// Confirmation shown after a successful submission
    Submitted,
}

impl Route {
    pub fn all() -> &'static [Route] {
        &[
            Route::Home,
            Route::PersonalInfo,
            Route::Password,
            Route::Summary,
            Route::Submitted,
        ]
    }

    /// The steps that collect or review data, in order
    pub fn steps() -> &'static [Route] {
        &[Route::PersonalInfo, Route::Password, Route::Summary]
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::PersonalInfo => "/step1",
            Route::Password => "/step2",
            Route::Summary => "/step3",
            Route::Submitted => "/submit",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Inicio",
            Route::PersonalInfo => "Paso 1: Información personal",
            Route::Password => "Paso 2: Contraseña",
            Route::Summary => "Paso 3: Resumen",
            Route::Submitted => "Formulario enviado",
        }
    }

    /// Editable fields owned by this route
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Route::PersonalInfo => &[Field::FirstName, Field::LastName, Field::Email],
            Route::Password => &[Field::Password, Field::ConfirmPassword],
            Route::Home | Route::Summary | Route::Submitted => &[],
        }
    }

    /// 1-based step number for the three form steps
    pub fn step_number(&self) -> Option<usize> {
        Route::steps()
            .iter()
            .position(|r| r == self)
            .map(|i| i + 1)
    }

    /// Step reached by the forward action
    pub fn next(&self) -> Option<Route> {
        match self {
            Route::Home => Some(Route::PersonalInfo),
            Route::PersonalInfo => Some(Route::Password),
            Route::Password => Some(Route::Summary),
            Route::Summary => Some(Route::Submitted),
            Route::Submitted => None,
        }
    }

    /// Step reached by the "Anterior" action
    pub fn previous(&self) -> Option<Route> {
        match self {
            Route::Password => Some(Route::PersonalInfo),
            Route::Summary => Some(Route::Password),
            Route::Home | Route::PersonalInfo | Route::Submitted => None,
        }
    }

    /// Form steps that come before this route
    pub fn prerequisites(&self) -> &'static [Route] {
        match self {
            Route::Home | Route::PersonalInfo => &[],
            Route::Password => &[Route::PersonalInfo],
            Route::Summary | Route::Submitted => &[Route::PersonalInfo, Route::Password],
        }
    }

    /// Parse a path. A trailing slash is tolerated.
    pub fn parse(path: &str) -> Result<Route, NavigationError> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        Route::all()
            .iter()
            .copied()
            .find(|r| r.path() == normalized)
            .ok_or_else(|| NavigationError::UnknownRoute(path.to_string()))
    }
}

impl FromStr for Route {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
