//! State machine tests for the registration form, driven by a scripted gateway.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use signup_lib::error::{ApiError, Error};
use signup_lib::form::{BannerKind, GENERIC_ERROR_MESSAGE, SUCCESS_MESSAGE, UserGateway};
use signup_lib::validation::{EMAIL_INVALID, EMAIL_REQUIRED, FIRST_NAME_REQUIRED, LAST_NAME_REQUIRED};
use signup_lib::{Config, Field, FormController, FormEvent, FormFields, NewUser, SubmissionStatus, UserRecord};
use tokio::time::Instant;

/// Gateway that records every call and replays queued outcomes.
#[derive(Default)]
struct ScriptedGateway {
    calls: Mutex<Vec<NewUser>>,
    outcomes: Mutex<VecDeque<Result<UserRecord, Error>>>,
}

impl ScriptedGateway {
    fn succeeding() -> Arc<Self> {
        let gateway = Self::default();
        gateway.push_ok();
        Arc::new(gateway)
    }

    fn failing() -> Arc<Self> {
        let gateway = Self::default();
        gateway.push_err();
        Arc::new(gateway)
    }

    fn push_ok(&self) {
        self.outcomes.lock().unwrap().push_back(Ok(UserRecord::new(json!({
            "userId": "123",
            "message": "User created successfully"
        }))));
    }

    fn push_err(&self) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(Error::Api(ApiError::http(500, "Internal Server Error"))));
    }

    fn calls(&self) -> Vec<NewUser> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserGateway for ScriptedGateway {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, Error> {
        self.calls.lock().unwrap().push(user);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Api(ApiError::http(503, "no scripted outcome"))))
    }
}

fn controller(gateway: &Arc<ScriptedGateway>) -> FormController {
    FormController::new(gateway.clone(), &Config::default())
}

fn fill(form: &mut FormController, first: &str, last: &str, email: &str) {
    form.handle(FormEvent::Edit(Field::FirstName, first.to_string()));
    form.handle(FormEvent::Edit(Field::LastName, last.to_string()));
    form.handle(FormEvent::Edit(Field::Email, email.to_string()));
}

// =============================================================================
// Validation gate
// =============================================================================

#[tokio::test]
async fn test_empty_submit_shows_all_errors_without_network_call() {
    let gateway = ScriptedGateway::succeeding();
    let mut form = controller(&gateway);

    assert!(!form.submit());

    assert_eq!(form.status(), SubmissionStatus::Idle);
    assert_eq!(form.errors().get(Field::FirstName), Some(FIRST_NAME_REQUIRED));
    assert_eq!(form.errors().get(Field::LastName), Some(LAST_NAME_REQUIRED));
    assert_eq!(form.errors().get(Field::Email), Some(EMAIL_REQUIRED));

    tokio::task::yield_now().await;
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_invalid_email_blocks_submission() {
    let gateway = ScriptedGateway::succeeding();
    let mut form = controller(&gateway);
    fill(&mut form, "Jane", "Smith", "invalid-email");

    form.handle(FormEvent::Submit);

    assert_eq!(form.errors().len(), 1);
    assert_eq!(form.errors().get(Field::Email), Some(EMAIL_INVALID));
    assert_eq!(form.status(), SubmissionStatus::Idle);

    tokio::task::yield_now().await;
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_edit_clears_only_that_fields_error() {
    let gateway = ScriptedGateway::succeeding();
    let mut form = controller(&gateway);
    form.submit();
    assert_eq!(form.errors().len(), 3);

    form.edit(Field::FirstName, "J");

    assert_eq!(form.errors().get(Field::FirstName), None);
    assert_eq!(form.errors().get(Field::LastName), Some(LAST_NAME_REQUIRED));
    assert_eq!(form.errors().get(Field::Email), Some(EMAIL_REQUIRED));
    assert_eq!(form.fields().first_name, "J");
}

#[tokio::test]
async fn test_resubmit_recomputes_errors() {
    let gateway = ScriptedGateway::succeeding();
    let mut form = controller(&gateway);
    fill(&mut form, "", "Smith", "jane@example.com");
    form.submit();
    assert_eq!(form.errors().get(Field::FirstName), Some(FIRST_NAME_REQUIRED));

    form.edit(Field::LastName, "   ");
    form.submit();

    assert_eq!(form.errors().len(), 2);
    assert_eq!(form.errors().get(Field::LastName), Some(LAST_NAME_REQUIRED));
}

// =============================================================================
// Submission
// =============================================================================

#[tokio::test]
async fn test_successful_submission() {
    let gateway = ScriptedGateway::succeeding();
    let mut form = controller(&gateway);
    fill(&mut form, "Jane", "Smith", "jane@example.com");

    assert!(form.submit());
    assert_eq!(form.status(), SubmissionStatus::Pending);
    assert!(form.view().is_disabled());

    form.settle().await;

    assert_eq!(
        gateway.calls(),
        vec![NewUser {
            first_name: "Jane".into(),
            last_name: "Smith".into(),
            email: "jane@example.com".into(),
        }]
    );
    assert_eq!(form.status(), SubmissionStatus::Succeeded);
    assert_eq!(form.fields(), &FormFields::default());
    assert_eq!(form.success_message(), Some(SUCCESS_MESSAGE));
    assert_eq!(form.api_error(), None);
    assert_eq!(form.created_user().and_then(|r| r.user_id()).as_deref(), Some("123"));
}

#[tokio::test]
async fn test_values_are_trimmed_before_sending() {
    let gateway = ScriptedGateway::succeeding();
    let mut form = controller(&gateway);
    fill(&mut form, "  Jane ", " Smith", "jane@example.com");

    assert!(form.submit());
    form.settle().await;

    let call = &gateway.calls()[0];
    assert_eq!(call.first_name, "Jane");
    assert_eq!(call.last_name, "Smith");
    assert_eq!(call.email, "jane@example.com");
}

#[tokio::test]
async fn test_padded_email_is_rejected() {
    let gateway = ScriptedGateway::succeeding();
    let mut form = controller(&gateway);
    fill(&mut form, "Jane", "Smith", " jane@example.com ");

    assert!(!form.submit());

    assert_eq!(form.errors().len(), 1);
    assert_eq!(form.errors().get(Field::Email), Some(EMAIL_INVALID));
    tokio::task::yield_now().await;
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_form_is_disabled_after_success() {
    let gateway = ScriptedGateway::succeeding();
    gateway.push_ok();
    let mut form = controller(&gateway);
    fill(&mut form, "Jane", "Smith", "jane@example.com");
    form.submit();
    form.settle().await;

    form.edit(Field::FirstName, "John");
    assert!(!form.submit());
    form.dismiss_success();

    assert_eq!(form.fields().first_name, "");
    assert_eq!(form.status(), SubmissionStatus::Succeeded);
    assert_eq!(form.success_message(), None);
    assert!(form.view().is_disabled());
    assert_eq!(gateway.calls().len(), 1);
}

#[tokio::test]
async fn test_second_submit_while_pending_is_ignored() {
    let gateway = ScriptedGateway::succeeding();
    let mut form = controller(&gateway);
    fill(&mut form, "Jane", "Smith", "jane@example.com");

    assert!(form.submit());
    tokio::task::yield_now().await;
    assert!(!form.submit());
    form.handle(FormEvent::Submit);

    form.settle().await;
    assert_eq!(gateway.calls().len(), 1);
}

#[tokio::test]
async fn test_edits_are_ignored_while_pending() {
    let gateway = ScriptedGateway::succeeding();
    let mut form = controller(&gateway);
    fill(&mut form, "Jane", "Smith", "jane@example.com");
    form.submit();

    form.edit(Field::Email, "other@example.com");
    assert_eq!(form.fields().email, "jane@example.com");

    form.settle().await;
}

#[tokio::test]
async fn test_failed_submission_shows_generic_error() {
    let gateway = ScriptedGateway::failing();
    let mut form = controller(&gateway);
    fill(&mut form, "Jane", "Smith", "jane@example.com");

    form.submit();
    form.settle().await;

    assert_eq!(form.status(), SubmissionStatus::Idle);
    assert_eq!(form.api_error(), Some(GENERIC_ERROR_MESSAGE));
    assert_eq!(form.fields(), &FormFields::new("Jane", "Smith", "jane@example.com"));
    assert!(!form.view().is_disabled());

    form.handle(FormEvent::DismissError);
    assert_eq!(form.api_error(), None);
}

#[tokio::test]
async fn test_retry_after_failure_clears_error_banner() {
    let gateway = ScriptedGateway::failing();
    gateway.push_ok();
    let mut form = controller(&gateway);
    fill(&mut form, "Jane", "Smith", "jane@example.com");
    form.submit();
    form.settle().await;
    assert!(form.api_error().is_some());

    assert!(form.submit());
    assert_eq!(form.api_error(), None);
    form.settle().await;

    assert_eq!(form.status(), SubmissionStatus::Succeeded);
    assert_eq!(gateway.calls().len(), 2);
}

// =============================================================================
// Banner expiry
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_error_banner_expires_after_delay() {
    let gateway = ScriptedGateway::failing();
    let mut form = controller(&gateway);
    fill(&mut form, "Jane", "Smith", "jane@example.com");
    form.submit();
    form.settle().await;
    let shown_at = Instant::now();

    let event = form.next_event().await.unwrap();
    assert!(matches!(event, FormEvent::BannerExpired { kind: BannerKind::Error, .. }));
    assert!(shown_at.elapsed() >= Duration::from_secs(8));

    form.handle(event);
    assert_eq!(form.api_error(), None);
    assert_eq!(form.status(), SubmissionStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_success_banner_expires_after_delay() {
    let gateway = ScriptedGateway::succeeding();
    let mut form = controller(&gateway);
    fill(&mut form, "Jane", "Smith", "jane@example.com");
    form.submit();
    form.settle().await;
    let shown_at = Instant::now();

    let event = form.next_event().await.unwrap();
    assert!(matches!(event, FormEvent::BannerExpired { kind: BannerKind::Success, .. }));
    assert!(shown_at.elapsed() >= Duration::from_secs(6));

    form.handle(event);
    assert_eq!(form.success_message(), None);
    assert_eq!(form.status(), SubmissionStatus::Succeeded);
}

#[tokio::test(start_paused = true)]
async fn test_dismissal_cancels_expiry() {
    let gateway = ScriptedGateway::failing();
    let mut form = controller(&gateway);
    fill(&mut form, "Jane", "Smith", "jane@example.com");
    form.submit();
    form.settle().await;

    form.dismiss_error();
    form.dismiss_error();

    let waited = tokio::time::timeout(Duration::from_secs(30), form.next_event()).await;
    assert!(waited.is_err(), "no expiry should fire after dismissal");

    // A late expiry against cleared state is harmless.
    form.handle(FormEvent::BannerExpired {
        kind: BannerKind::Error,
        generation: 1,
    });
    assert_eq!(form.api_error(), None);
}

#[tokio::test(start_paused = true)]
async fn test_stale_expiry_keeps_newer_banner() {
    let gateway = ScriptedGateway::failing();
    gateway.push_err();
    let mut form = controller(&gateway);
    fill(&mut form, "Jane", "Smith", "jane@example.com");
    form.submit();
    form.settle().await;
    form.submit();
    form.settle().await;

    form.handle(FormEvent::BannerExpired {
        kind: BannerKind::Error,
        generation: 1,
    });
    assert_eq!(form.api_error(), Some(GENERIC_ERROR_MESSAGE));

    let event = form.next_event().await.unwrap();
    form.handle(event);
    assert_eq!(form.api_error(), None);
}

#[tokio::test(start_paused = true)]
async fn test_custom_banner_timeout() {
    let gateway = ScriptedGateway::failing();
    let config = Config::default().with_error_banner_timeout(Duration::from_secs(5));
    let mut form = FormController::new(gateway.clone(), &config);
    fill(&mut form, "Jane", "Smith", "jane@example.com");
    form.submit();
    form.settle().await;
    let shown_at = Instant::now();

    let event = form.next_event().await.unwrap();
    let elapsed = shown_at.elapsed();
    assert!(elapsed >= Duration::from_secs(5) && elapsed < Duration::from_secs(8));
    form.handle(event);
    assert_eq!(form.api_error(), None);
}
