//! The listener capability and the event dispatch table.
//!
//! A [`DeviceListener`] has one method per event, every one a default no-op,
//! so an adapter only implements what it renders.  [`dispatch`] is the single
//! place an event is taken apart.

use crate::event::DeviceEvent;
use crate::orientation::Quaternion;
use crate::pose::{Arm, Pose, XDirection};

// ════════════════════════════════════════════════════════════════════════════
// DeviceListener
// ════════════════════════════════════════════════════════════════════════════

/// Receives device notifications, one at a time, on the dispatching thread.
pub trait DeviceListener {
    fn on_connect(&mut self) {}
    fn on_disconnect(&mut self) {}
    fn on_arm_sync(&mut self, _arm: Arm, _x_direction: XDirection) {}
    fn on_arm_unsync(&mut self) {}
    fn on_lock(&mut self) {}
    fn on_unlock(&mut self) {}
    fn on_orientation(&mut self, _rotation: Quaternion) {}
    fn on_pose(&mut self, _pose: Pose) {}
}

// ════════════════════════════════════════════════════════════════════════════
// dispatch
// ════════════════════════════════════════════════════════════════════════════

/// Route one event to the matching listener method.
pub fn dispatch(event: DeviceEvent, listener: &mut dyn DeviceListener) {
    match event {
        DeviceEvent::Connected => listener.on_connect(),
        DeviceEvent::Disconnected => listener.on_disconnect(),
        DeviceEvent::ArmSynced { arm, x_direction } => listener.on_arm_sync(arm, x_direction),
        DeviceEvent::ArmUnsynced => listener.on_arm_unsync(),
        DeviceEvent::Locked => listener.on_lock(),
        DeviceEvent::Unlocked => listener.on_unlock(),
        DeviceEvent::Orientation(q) => listener.on_orientation(q),
        DeviceEvent::Pose(p) => listener.on_pose(p),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts what it hears; the default no-ops cover the rest.
    #[derive(Default)]
    struct Tally {
        connects: usize,
        poses: Vec<Pose>,
        synced_arm: Option<Arm>,
    }

    impl DeviceListener for Tally {
        fn on_connect(&mut self) {
            self.connects += 1;
        }
        fn on_arm_sync(&mut self, arm: Arm, _x: XDirection) {
            self.synced_arm = Some(arm);
        }
        fn on_pose(&mut self, pose: Pose) {
            self.poses.push(pose);
        }
    }

    #[test]
    fn dispatch_routes_each_variant() {
        let mut t = Tally::default();
        dispatch(DeviceEvent::Connected, &mut t);
        dispatch(
            DeviceEvent::ArmSynced { arm: Arm::Left, x_direction: XDirection::TowardWrist },
            &mut t,
        );
        dispatch(DeviceEvent::Pose(Pose::WaveOut), &mut t);
        assert_eq!(t.connects, 1);
        assert_eq!(t.synced_arm, Some(Arm::Left));
        assert_eq!(t.poses, vec![Pose::WaveOut]);
    }

    #[test]
    fn unimplemented_events_are_no_ops() {
        let mut t = Tally::default();
        dispatch(DeviceEvent::Locked, &mut t);
        dispatch(DeviceEvent::Orientation(Quaternion::IDENTITY), &mut t);
        assert_eq!(t.connects, 0);
        assert!(t.poses.is_empty());
    }
}
