use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, trace, warn};
use tokio::sync::mpsc;

use super::banner::{Banner, BannerKind};
use super::{FormView, SubmissionStatus, UserGateway};
use crate::config::Config;
use crate::error::Error;
use crate::model::{Field, FormFields, UserRecord};
use crate::validation::{ValidationErrors, validate_fields};

/// Shown after a user is created.
pub const SUCCESS_MESSAGE: &str = "User created successfully!";

/// Shown for every failed submission, whatever the cause.
pub const GENERIC_ERROR_MESSAGE: &str =
    "An error occurred while creating the user. Please try again later.";

/// Inputs to the form state machine.
#[derive(Debug)]
pub enum FormEvent {
    /// The user changed a field.
    Edit(Field, String),
    /// The user asked to submit.
    Submit,
    /// The user closed the error banner.
    DismissError,
    /// The user closed the success banner.
    DismissSuccess,
    /// The create-user call completed.
    SubmitFinished(Result<UserRecord, Error>),
    /// A banner's display time ran out.
    BannerExpired { kind: BannerKind, generation: u64 },
}

/// Owns all mutable form state and applies [`FormEvent`]s to it.
///
/// ```text
/// Idle --Submit(valid)--> Pending --ok--> Succeeded
///  ^  \--Submit(invalid)--> Idle    |
///  +------------------------------err
/// ```
///
/// Network completions and banner expiries arrive on an internal channel;
/// the owner drains it with [`next_event`](Self::next_event) and feeds each
/// event back into [`handle`](Self::handle). Submitting and showing banners
/// spawn tokio tasks, so the controller must be driven inside a runtime.
pub struct FormController {
    gateway: Arc<dyn UserGateway>,
    error_banner_timeout: Duration,
    success_banner_timeout: Duration,

    fields: FormFields,
    errors: ValidationErrors,
    status: SubmissionStatus,
    error_banner: Option<Banner>,
    success_banner: Option<Banner>,
    created: Option<UserRecord>,

    next_generation: u64,
    events_tx: mpsc::UnboundedSender<FormEvent>,
    events_rx: mpsc::UnboundedReceiver<FormEvent>,
}

impl FormController {
    /// Creates an idle, empty form.
    pub fn new(gateway: Arc<dyn UserGateway>, config: &Config) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            gateway,
            error_banner_timeout: config.error_banner_timeout,
            success_banner_timeout: config.success_banner_timeout,
            fields: FormFields::default(),
            errors: ValidationErrors::default(),
            status: SubmissionStatus::Idle,
            error_banner: None,
            success_banner: None,
            created: None,
            next_generation: 0,
            events_tx,
            events_rx,
        }
    }

    /// Applies one event.
    pub fn handle(&mut self, event: FormEvent) {
        trace!("Form event: {:?}", event);
        match event {
            FormEvent::Edit(field, value) => self.edit(field, value),
            FormEvent::Submit => {
                self.submit();
            }
            FormEvent::DismissError => self.dismiss_error(),
            FormEvent::DismissSuccess => self.dismiss_success(),
            FormEvent::SubmitFinished(result) => self.finish_submit(result),
            FormEvent::BannerExpired { kind, generation } => self.expire_banner(kind, generation),
        }
    }

    /// Waits for the next internal event (network completion or banner expiry).
    pub async fn next_event(&mut self) -> Option<FormEvent> {
        self.events_rx.recv().await
    }

    /// Handles internal events until no submission is outstanding.
    pub async fn settle(&mut self) {
        while self.status.is_pending() {
            match self.events_rx.recv().await {
                Some(event) => self.handle(event),
                None => break,
            }
        }
    }

    /// Updates a field and clears its validation error. Ignored unless idle.
    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        if !self.status.accepts_input() {
            debug!("Ignoring edit of {} while {:?}", field, self.status);
            return;
        }
        self.fields.set(field, value);
        if self.errors.clear(field) {
            debug!("Cleared validation error for {}", field);
        }
    }

    /// Validates and, if the form is valid, starts the create-user call.
    ///
    /// Returns `true` if a request was started.
    pub fn submit(&mut self) -> bool {
        if !self.status.accepts_input() {
            debug!("Ignoring submit while {:?}", self.status);
            return false;
        }

        let errors = validate_fields(&self.fields);
        if !errors.is_empty() {
            debug!("Validation failed for {} field(s)", errors.len());
            self.errors = errors;
            return false;
        }

        self.errors = ValidationErrors::default();
        self.status = SubmissionStatus::Pending;
        self.error_banner = None;
        self.success_banner = None;

        let user = self.fields.to_new_user();
        let gateway = Arc::clone(&self.gateway);
        let events = self.events_tx.clone();
        info!("Submitting new user {}", user.email);

        tokio::spawn(async move {
            let result = gateway.create_user(user).await;
            let _ = events.send(FormEvent::SubmitFinished(result));
        });

        true
    }

    /// Clears the error banner and cancels its expiry.
    pub fn dismiss_error(&mut self) {
        if self.error_banner.take().is_some() {
            debug!("Error banner dismissed");
        }
    }

    /// Clears the success banner. The form stays disabled.
    pub fn dismiss_success(&mut self) {
        if self.success_banner.take().is_some() {
            debug!("Success banner dismissed");
        }
    }

    fn finish_submit(&mut self, result: Result<UserRecord, Error>) {
        if !self.status.is_pending() {
            warn!("Submission result arrived while {:?}; ignoring", self.status);
            return;
        }

        match result {
            Ok(record) => {
                info!(
                    "User created (id: {})",
                    record.user_id().as_deref().unwrap_or("<none>")
                );
                self.status = SubmissionStatus::Succeeded;
                self.fields.clear();
                self.created = Some(record);
                let generation = self.bump_generation();
                self.success_banner = Some(Banner::show(
                    BannerKind::Success,
                    SUCCESS_MESSAGE,
                    generation,
                    self.success_banner_timeout,
                    self.events_tx.clone(),
                ));
            }
            Err(e) => {
                warn!("Failed to create user: {}", e);
                self.status = SubmissionStatus::Idle;
                let generation = self.bump_generation();
                self.error_banner = Some(Banner::show(
                    BannerKind::Error,
                    GENERIC_ERROR_MESSAGE,
                    generation,
                    self.error_banner_timeout,
                    self.events_tx.clone(),
                ));
            }
        }
    }

    fn expire_banner(&mut self, kind: BannerKind, generation: u64) {
        let slot = match kind {
            BannerKind::Success => &mut self.success_banner,
            BannerKind::Error => &mut self.error_banner,
        };
        if slot.as_ref().is_some_and(|b| b.generation == generation) {
            debug!("{:?} banner expired", kind);
            *slot = None;
        } else {
            // Already dismissed or replaced.
            trace!("Stale {:?} banner expiry {} ignored", kind, generation);
        }
    }

    fn bump_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// The visible error banner message.
    pub fn api_error(&self) -> Option<&str> {
        self.error_banner.as_ref().map(|b| b.message.as_str())
    }

    /// The visible success banner message.
    pub fn success_message(&self) -> Option<&str> {
        self.success_banner.as_ref().map(|b| b.message.as_str())
    }

    /// The server's response after a successful submission.
    pub fn created_user(&self) -> Option<&UserRecord> {
        self.created.as_ref()
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> FormView {
        FormView {
            fields: self.fields.clone(),
            errors: self.errors.clone(),
            status: self.status,
            error_banner: self.api_error().map(str::to_string),
            success_banner: self.success_message().map(str::to_string),
        }
    }
}
