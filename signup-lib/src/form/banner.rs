//! Transient banners with cancelable auto-expiry.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::{CancellationToken, DropGuard};

use super::FormEvent;

/// Which banner an expiry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// A visible banner.
///
/// Dropping it cancels its pending expiry.
pub(crate) struct Banner {
    pub(crate) message: String,
    pub(crate) generation: u64,
    _expiry: DropGuard,
}

impl Banner {
    /// Shows `message` and schedules a [`FormEvent::BannerExpired`] after `delay`.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn show(
        kind: BannerKind,
        message: impl Into<String>,
        generation: u64,
        delay: Duration,
        events: UnboundedSender<FormEvent>,
    ) -> Self {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {
                    log::trace!("{:?} banner {} expiry cancelled", kind, generation);
                }
                _ = tokio::time::sleep(delay) => {
                    // Receiver gone means the controller was torn down.
                    let _ = events.send(FormEvent::BannerExpired { kind, generation });
                }
            }
        });

        Self {
            message: message.into(),
            generation,
            _expiry: token.drop_guard(),
        }
    }
}
