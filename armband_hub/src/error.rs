//! Hub failure surface.

use thiserror::Error;

/// Raised while establishing a device session.
///
/// Initialization is fail-fast: the error is reported once and the session
/// is never retried.  After a successful attach the event and command
/// channels cannot fail from the application's point of view.
#[derive(Debug, Error)]
pub enum HubError {
    #[error("hub failed to initialize: {0}")]
    Init(String),
}
