//! Form state machine.
//!
//! [`FormController`] owns the field values, validation errors, submission
//! status and banners. Everything that changes them goes through
//! [`FormController::handle`]; the network call and banner timers report back
//! through the controller's own event channel.

mod banner;
mod controller;
mod gateway;
mod status;
mod view;

pub use banner::BannerKind;
pub use controller::{FormController, FormEvent, GENERIC_ERROR_MESSAGE, SUCCESS_MESSAGE};
pub use gateway::UserGateway;
pub use status::SubmissionStatus;
pub use view::FormView;
