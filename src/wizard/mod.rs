//! Wizard state shared by every step.
//!
//! One [`RegistrationDraft`] lives here for the whole flow. Steps read from
//! and write into it, so values entered on step 1 show up on the summary.
//! Forward transitions are gated by the validation of the step being left.

use std::collections::BTreeSet;

use crate::config::WizardConfig;
use crate::registration::{
    validate, validate_field, validate_fields, Field, FieldError, RegistrationDraft,
    ValidationErrors,
};
use crate::submission::{RegistrationSubmitter, SubmissionReceipt, SubmitError};

pub mod route;

pub use route::{NavigationError, Route};


/// Result of a navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The requested route is now current
    Entered(Route),
    /// The guard sent the user somewhere else
    Redirected { requested: Route, to: Route },
}

impl Navigation {
    /// Route that ended up current
    pub fn route(&self) -> Route {
        match self {
            Navigation::Entered(route) => *route,
            Navigation::Redirected { to, .. } => *to,
        }
    }
}

/// Result of a step action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved forward to this route
    Advanced(Route),
    /// The action does not move this route
    Unchanged(Route),
    /// Validation failed; `route` is where the user must fix it
    Blocked {
        route: Route,
        errors: ValidationErrors,
    },
    /// The submitter refused the draft, which is kept for a retry
    Failed(SubmitError),
}

pub struct Wizard {
    draft: RegistrationDraft,
    /// Fields the user has left at least once, or tried to submit
    touched: BTreeSet<Field>,
    route: Route,
    guard_routes: bool,
    last_receipt: Option<SubmissionReceipt>,
    /// The current draft was accepted and has not been edited since
    submitted: bool,
    submit_error: Option<SubmitError>,
}

impl Wizard {
    pub fn new(guard_routes: bool) -> Self {
        Self {
            draft: RegistrationDraft::default(),
            touched: BTreeSet::new(),
            route: Route::Home,
            guard_routes,
            last_receipt: None,
            submitted: false,
            submit_error: None,
        }
    }

    pub fn from_config(config: &WizardConfig) -> Self {
        Self::new(config.guard_routes)
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn is_guarded(&self) -> bool {
        self.guard_routes
    }

    /// Receipt of the most recent successful submission
    pub fn last_receipt(&self) -> Option<&SubmissionReceipt> {
        self.last_receipt.as_ref()
    }

    /// Error from the last failed submission, cleared by the next attempt
    pub fn submit_error(&self) -> Option<&SubmitError> {
        self.submit_error.as_ref()
    }

    /// Store an edited value
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
        self.submitted = false;
        tracing::trace!(field = %field, "Field changed");
    }

    /// Mark a field as visited so its error becomes visible
    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
    }

    pub fn touch_all(&mut self, fields: &[Field]) {
        self.touched.extend(fields.iter().copied());
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Errors for the whole draft, touched or not
    pub fn errors(&self) -> ValidationErrors {
        validate(&self.draft)
    }

    /// Errors for the fields owned by one route
    pub fn step_errors(&self, route: Route) -> ValidationErrors {
        validate_fields(&self.draft, route.fields())
    }

    /// Error to display under a field: only once it has been touched
    pub fn visible_error(&self, field: Field) -> Option<FieldError> {
        if self.is_touched(field) {
            validate_field(&self.draft, field)
        } else {
            None
        }
    }

    /// First earlier step whose fields do not validate
    pub fn first_blocking_step(&self, route: Route) -> Option<Route> {
        route
            .prerequisites()
            .iter()
            .copied()
            .find(|step| !self.step_errors(*step).is_empty())
    }

    /// Go to a route. Without the guard any route is entered as is.
    pub fn navigate(&mut self, requested: Route) -> Navigation {
        self.submit_error = None;

        // A submitted draft is blank, so its confirmation skips the step checks
        let confirming = requested == Route::Submitted && self.submitted;

        if self.guard_routes && !confirming {
            if let Some(blocking) = self.first_blocking_step(requested) {
                self.touch_all(blocking.fields());
                self.route = blocking;
                tracing::debug!(
                    requested = %requested,
                    to = %blocking,
                    "Route guarded, earlier step incomplete"
                );
                return Navigation::Redirected {
                    requested,
                    to: blocking,
                };
            }
            if requested == Route::Submitted {
                self.route = Route::Summary;
                return Navigation::Redirected {
                    requested,
                    to: Route::Summary,
                };
            }
        }

        tracing::debug!(from = %self.route, to = %requested, "Navigate");
        self.route = requested;
        Navigation::Entered(requested)
    }

    /// Forward action of the current route, gated by its own fields
    pub fn advance(&mut self) -> StepOutcome {
        match self.route {
            Route::Home => StepOutcome::Advanced(self.navigate(Route::PersonalInfo).route()),
            Route::PersonalInfo | Route::Password => {
                let current = self.route;
                self.touch_all(current.fields());
                let errors = self.step_errors(current);
                if !errors.is_empty() {
                    tracing::debug!(route = %current, failing = errors.len(), "Step blocked");
                    return StepOutcome::Blocked {
                        route: current,
                        errors,
                    };
                }
                match current.next() {
                    Some(next) => {
                        self.route = next;
                        StepOutcome::Advanced(next)
                    }
                    None => StepOutcome::Unchanged(current),
                }
            }
            // Left through `submit`
            Route::Summary | Route::Submitted => StepOutcome::Unchanged(self.route),
        }
    }

    /// Back action. Never validates.
    pub fn previous(&mut self) -> Route {
        if let Some(previous) = self.route.previous() {
            self.submit_error = None;
            self.route = previous;
        }
        self.route
    }

    /// Clear every field and the touched state; the route stays
    pub fn reset(&mut self) {
        self.draft = RegistrationDraft::default();
        self.submitted = false;
        self.touched.clear();
        self.submit_error = None;
    }

    /// Final action of the summary.
    ///
    /// An invalid draft sends the user to the first step holding a failing
    /// field. A valid one goes to the submitter; on success the draft is
    /// dropped and the confirmation route becomes current.
    pub async fn submit(&mut self, submitter: &dyn RegistrationSubmitter) -> StepOutcome {
        self.submit_error = None;
        self.touch_all(Field::all());

        let errors = self.errors();
        if let Some(field) = errors.first_field() {
            let route = Route::steps()
                .iter()
                .copied()
                .find(|r| r.fields().contains(&field))
                .unwrap_or(Route::PersonalInfo);
            self.route = route;
            tracing::info!(route = %route, failing = errors.len(), "Submission blocked by validation");
            return StepOutcome::Blocked { route, errors };
        }

        match submitter.submit(&self.draft).await {
            Ok(receipt) => {
                tracing::info!(
                    submitter = submitter.name(),
                    id = %receipt.id,
                    "Registration accepted"
                );
                self.last_receipt = Some(receipt);
                self.draft = RegistrationDraft::default();
                self.submitted = true;
                self.touched.clear();
                self.route = Route::Submitted;
                StepOutcome::Advanced(Route::Submitted)
            }
            Err(err) => {
                tracing::warn!(
                    submitter = submitter.name(),
                    error = %err,
                    retryable = err.is_retryable(),
                    "Registration submission failed"
                );
                self.submit_error = Some(err.clone());
                StepOutcome::Failed(err)
            }
        }
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(false)
    }
}
