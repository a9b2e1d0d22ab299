//! # armband_hub
//!
//! The boundary between an application and a gesture armband device.
//!
//! The device itself (radio link, pairing, pose classification, sensor
//! fusion) lives on the far side of this crate.  What crosses the boundary
//! is small and fixed:
//!
//! | Direction | Surface |
//! |---|---|
//! | device → app | [`DeviceEvent`] stream: connect, disconnect, arm sync, lock state, orientation, recognized poses |
//! | app → device | [`HubCommand`]s: unlock policy, user-action feedback (haptic buzz) |
//!
//! An application attaches a [`HubSession`] over an [`EventSource`] (the
//! device backend, or a simulated one) and receives events either by
//! draining the channel or by handing a [`DeviceListener`] to
//! [`HubSession::dispatch_pending`].  One listener, one event at a time,
//! on the caller's thread.
//!
//! Session construction is fail-fast: a bad configuration yields
//! [`HubError`] once and there is no retry.

pub mod error;
pub mod event;
pub mod listener;
pub mod orientation;
pub mod pose;
pub mod session;
pub mod source;

pub use error::HubError;
pub use event::DeviceEvent;
pub use listener::{dispatch, DeviceListener};
pub use orientation::Quaternion;
pub use pose::{Arm, Pose, XDirection};
pub use session::{HubCommand, HubCommander, HubConfig, HubSession, UnlockType};
pub use source::{EventSource, ScriptedSource, SourceContext};
