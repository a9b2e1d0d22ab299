//! Keyboard-simulated armband.
//!
//! The visualizer translates window keys into [`SimKey`]s and sends them
//! here; [`KeyboardSource`] keeps a small model of the band (link, sync,
//! lock, attitude) and emits the [`DeviceEvent`]s a real one would.
//! Consumers cannot tell the difference; everything arrives through the
//! same session.

use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use armband_hub::{
    Arm, DeviceEvent, EventSource, HubCommand, Pose, Quaternion, SourceContext, XDirection,
};

// ════════════════════════════════════════════════════════════════════════════
// SimKey
// ════════════════════════════════════════════════════════════════════════════

/// One keypress, as mapped by the visualizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimKey {
    // poses
    Fist,
    FingersSpread,
    WaveIn,
    WaveOut,
    Rest,
    Unknown,
    // band state toggles
    ToggleConnect,
    ToggleSync,
    ToggleLock,
    // attitude nudges
    RollLeft,
    RollRight,
    PitchUp,
    PitchDown,
    YawLeft,
    YawRight,
}

/// Degrees per attitude nudge.
const NUDGE_DEG: f32 = 5.0;

// ════════════════════════════════════════════════════════════════════════════
// SimBand — the simulated device state machine
// ════════════════════════════════════════════════════════════════════════════

/// What the pretend hardware knows about itself.
pub struct SimBand {
    connected: bool,
    synced: bool,
    locked: bool,
    arm: Arm,
    x_direction: XDirection,
    roll: f32,
    pitch: f32,
    yaw: f32,
}

impl SimBand {
    pub fn new(arm: Arm, x_direction: XDirection) -> Self {
        SimBand {
            connected: false,
            synced: false,
            locked: true,
            arm,
            x_direction,
            roll: 0.0,
            pitch: 0.0,
            yaw: 0.0,
        }
    }

    /// Power-on sequence: connect, sync, unlock, so a fresh window is
    /// immediately playable.
    pub fn greeting(&mut self) -> Vec<DeviceEvent> {
        let mut events = Vec::new();
        events.extend(self.translate(SimKey::ToggleConnect));
        events.extend(self.translate(SimKey::ToggleSync));
        events.extend(self.translate(SimKey::ToggleLock));
        events
    }

    /// Apply one key to the band model and return what the device emits.
    ///
    /// The vendor locking policy holds: poses are only delivered while the
    /// band is connected, synced, and unlocked.
    pub fn translate(&mut self, key: SimKey) -> Vec<DeviceEvent> {
        match key {
            SimKey::Fist => self.pose(Pose::Fist),
            SimKey::FingersSpread => self.pose(Pose::FingersSpread),
            SimKey::WaveIn => self.pose(Pose::WaveIn),
            SimKey::WaveOut => self.pose(Pose::WaveOut),
            SimKey::Rest => self.pose(Pose::Rest),
            SimKey::Unknown => self.pose(Pose::Unknown),

            SimKey::ToggleConnect => {
                if self.connected {
                    self.connected = false;
                    self.synced = false;
                    self.locked = true;
                    vec![DeviceEvent::Disconnected]
                } else {
                    self.connected = true;
                    vec![DeviceEvent::Connected]
                }
            }

            SimKey::ToggleSync => {
                if !self.connected {
                    return vec![];
                }
                if self.synced {
                    self.synced = false;
                    vec![DeviceEvent::ArmUnsynced]
                } else {
                    self.synced = true;
                    vec![DeviceEvent::ArmSynced {
                        arm: self.arm,
                        x_direction: self.x_direction,
                    }]
                }
            }

            SimKey::ToggleLock => {
                if !self.connected {
                    return vec![];
                }
                if self.locked {
                    self.locked = false;
                    vec![DeviceEvent::Unlocked]
                } else {
                    self.locked = true;
                    vec![DeviceEvent::Locked]
                }
            }

            SimKey::RollLeft => self.nudge(-NUDGE_DEG, 0.0, 0.0),
            SimKey::RollRight => self.nudge(NUDGE_DEG, 0.0, 0.0),
            SimKey::PitchUp => self.nudge(0.0, NUDGE_DEG, 0.0),
            SimKey::PitchDown => self.nudge(0.0, -NUDGE_DEG, 0.0),
            SimKey::YawLeft => self.nudge(0.0, 0.0, -NUDGE_DEG),
            SimKey::YawRight => self.nudge(0.0, 0.0, NUDGE_DEG),
        }
    }

    /// A hold-policy unlock from the app side; wakes the band if it was
    /// locked.
    pub fn force_unlock(&mut self) -> Vec<DeviceEvent> {
        if self.connected && self.locked {
            self.locked = false;
            vec![DeviceEvent::Unlocked]
        } else {
            vec![]
        }
    }

    fn pose(&self, pose: Pose) -> Vec<DeviceEvent> {
        if self.connected && self.synced && !self.locked {
            vec![DeviceEvent::Pose(pose)]
        } else {
            vec![]
        }
    }

    fn nudge(&mut self, droll: f32, dpitch: f32, dyaw: f32) -> Vec<DeviceEvent> {
        if !self.connected {
            return vec![];
        }
        self.roll += droll;
        self.pitch = (self.pitch + dpitch).clamp(-85.0, 85.0);
        self.yaw += dyaw;
        vec![DeviceEvent::Orientation(Quaternion::from_euler(
            self.roll.to_radians(),
            self.pitch.to_radians(),
            self.yaw.to_radians(),
        ))]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// KeyboardSource
// ════════════════════════════════════════════════════════════════════════════

/// Event source fed by the visualizer's key channel.
pub struct KeyboardSource {
    pub rx: Receiver<SimKey>,
    pub arm: Arm,
    pub x_direction: XDirection,
}

impl EventSource for KeyboardSource {
    fn run(self: Box<Self>, ctx: SourceContext) {
        let mut band = SimBand::new(self.arm, self.x_direction);
        eprintln!("[sim] armband online, keyboard driven");

        for event in band.greeting() {
            if ctx.events.send(event).is_err() {
                return;
            }
        }

        loop {
            // App → device commands.
            loop {
                match ctx.commands.try_recv() {
                    Ok(HubCommand::Unlock(_)) => {
                        for event in band.force_unlock() {
                            if ctx.events.send(event).is_err() {
                                return;
                            }
                        }
                    }
                    Ok(HubCommand::NotifyUserAction) => eprintln!("[sim] bzzt"),
                    Ok(HubCommand::Shutdown) | Err(TryRecvError::Disconnected) => return,
                    Err(TryRecvError::Empty) => break,
                }
            }

            // Window keys.
            match self.rx.recv_timeout(Duration::from_millis(15)) {
                Ok(key) => {
                    for event in band.translate(key) {
                        if ctx.events.send(event).is_err() {
                            return;
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return,
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn band_up() -> SimBand {
        let mut band = SimBand::new(Arm::Right, XDirection::TowardWrist);
        band.greeting();
        band
    }

    #[test]
    fn greeting_brings_the_band_up() {
        let mut band = SimBand::new(Arm::Left, XDirection::TowardElbow);
        let events = band.greeting();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], DeviceEvent::Connected);
        assert_eq!(
            events[1],
            DeviceEvent::ArmSynced { arm: Arm::Left, x_direction: XDirection::TowardElbow }
        );
        assert_eq!(events[2], DeviceEvent::Unlocked);
    }

    #[test]
    fn poses_dropped_while_locked() {
        let mut band = band_up();
        band.translate(SimKey::ToggleLock);
        assert!(band.translate(SimKey::Fist).is_empty());
    }

    #[test]
    fn pose_delivered_when_unlocked() {
        let mut band = band_up();
        assert_eq!(band.translate(SimKey::WaveIn), vec![DeviceEvent::Pose(Pose::WaveIn)]);
    }

    #[test]
    fn disconnect_drops_sync_and_relocks() {
        let mut band = band_up();
        assert_eq!(band.translate(SimKey::ToggleConnect), vec![DeviceEvent::Disconnected]);
        // Back online, but unsynced and locked: no poses yet.
        band.translate(SimKey::ToggleConnect);
        assert!(band.translate(SimKey::Fist).is_empty());
    }

    #[test]
    fn sync_requires_connection() {
        let mut band = SimBand::new(Arm::Right, XDirection::TowardWrist);
        assert!(band.translate(SimKey::ToggleSync).is_empty());
    }

    #[test]
    fn roll_nudge_emits_orientation() {
        let mut band = band_up();
        let events = band.translate(SimKey::RollRight);
        match events.as_slice() {
            [DeviceEvent::Orientation(q)] => {
                assert!((q.roll().to_degrees() - NUDGE_DEG).abs() < 1e-3);
            }
            other => panic!("expected one orientation event, got {:?}", other),
        }
    }

    #[test]
    fn unlock_command_wakes_a_locked_band() {
        let mut band = band_up();
        band.translate(SimKey::ToggleLock);
        assert_eq!(band.force_unlock(), vec![DeviceEvent::Unlocked]);
        assert!(band.force_unlock().is_empty());
    }
}
