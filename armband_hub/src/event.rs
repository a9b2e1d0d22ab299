//! The notification stream delivered by the device.

use crate::orientation::Quaternion;
use crate::pose::{Arm, Pose, XDirection};

/// One notification from the armband, in delivery order.
///
/// Only `Pose` ever feeds the game; everything else is presentation state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeviceEvent {
    /// The band established its link.
    Connected,
    /// The link dropped.
    Disconnected,
    /// The band recognized the sync gesture and knows its placement.
    ArmSynced { arm: Arm, x_direction: XDirection },
    /// The band was moved or removed; placement is unknown again.
    ArmUnsynced,
    /// Poses will no longer be delivered until the next unlock.
    Locked,
    /// Poses are being delivered.
    Unlocked,
    /// Current attitude from the onboard fusion.
    Orientation(Quaternion),
    /// The recognizer classified a pose.
    Pose(Pose),
}
