//! Event sources: whatever is on the device side of the session.
//!
//! A source runs on its own thread, pushes [`DeviceEvent`]s in, and drains
//! [`HubCommand`]s out.  The real radio stack would live behind this trait;
//! this crate ships a scripted replay source, and the application adds a
//! keyboard-driven one.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use crate::event::DeviceEvent;
use crate::orientation::Quaternion;
use crate::pose::{Arm, Pose, XDirection};
use crate::session::HubCommand;

// ════════════════════════════════════════════════════════════════════════════
// EventSource trait
// ════════════════════════════════════════════════════════════════════════════

/// Channel ends handed to a source when its thread starts.
pub struct SourceContext {
    pub events: Sender<DeviceEvent>,
    pub commands: Receiver<HubCommand>,
}

/// Anything that can stand in for the device.
pub trait EventSource: Send + 'static {
    fn run(self: Box<Self>, ctx: SourceContext);
}

// ════════════════════════════════════════════════════════════════════════════
// ScriptedSource — replay a fixed event sequence
// ════════════════════════════════════════════════════════════════════════════

/// Replays a fixed sequence of events, each after an optional delay.
///
/// The source exits when the script runs out, closing the event channel,
/// which is how blocking consumers know the session is over.
pub struct ScriptedSource {
    steps: Vec<(Duration, DeviceEvent)>,
}

impl ScriptedSource {
    pub fn new(steps: Vec<(Duration, DeviceEvent)>) -> Self {
        ScriptedSource { steps }
    }

    /// A script with no delays.
    pub fn immediate(events: Vec<DeviceEvent>) -> Self {
        ScriptedSource {
            steps: events.into_iter().map(|e| (Duration::ZERO, e)).collect(),
        }
    }

    /// A canned session for demo mode: the band comes online, then cycles
    /// through every pose with rests and orientation sweeps in between.
    /// Cycling all four gestures guarantees at least one match per cycle
    /// whatever target the game draws.
    pub fn demo() -> Self {
        let beat = Duration::from_millis(700);
        let mut steps = vec![
            (Duration::from_millis(400), DeviceEvent::Connected),
            (
                beat,
                DeviceEvent::ArmSynced { arm: Arm::Right, x_direction: XDirection::TowardWrist },
            ),
            (beat, DeviceEvent::Unlocked),
        ];

        for cycle in 0..12u32 {
            for (i, pose) in
                [Pose::Fist, Pose::FingersSpread, Pose::WaveIn, Pose::WaveOut].iter().enumerate()
            {
                // A little attitude drift between poses keeps the readout alive.
                let angle = (cycle as f32 * 4.0 + i as f32) * 0.12;
                steps.push((
                    beat,
                    DeviceEvent::Orientation(Quaternion::from_euler(
                        angle.sin() * 0.5,
                        angle.cos() * 0.3,
                        angle * 0.1,
                    )),
                ));
                steps.push((beat, DeviceEvent::Pose(*pose)));
                steps.push((Duration::from_millis(250), DeviceEvent::Pose(Pose::Rest)));
            }
        }

        steps.push((beat, DeviceEvent::Disconnected));
        ScriptedSource { steps }
    }
}

impl EventSource for ScriptedSource {
    fn run(self: Box<Self>, ctx: SourceContext) {
        for (delay, event) in self.steps {
            if drain_commands(&ctx.commands) == Drained::Shutdown {
                return;
            }
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            if ctx.events.send(event).is_err() {
                return;
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Command draining shared by sources
// ════════════════════════════════════════════════════════════════════════════

#[derive(PartialEq, Eq)]
pub enum Drained {
    Open,
    Shutdown,
}

/// Consume every pending command.  Unlock requests are acknowledged
/// silently; a user-action notification is the haptic buzz, which a
/// simulated device can only log.
pub fn drain_commands(commands: &Receiver<HubCommand>) -> Drained {
    loop {
        match commands.try_recv() {
            Ok(HubCommand::Unlock(_)) => {}
            Ok(HubCommand::NotifyUserAction) => eprintln!("[device] bzzt"),
            Ok(HubCommand::Shutdown) | Err(TryRecvError::Disconnected) => {
                return Drained::Shutdown
            }
            Err(TryRecvError::Empty) => return Drained::Open,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn immediate_script_sends_everything_then_closes() {
        let (event_tx, event_rx) = mpsc::channel();
        let (_command_tx, command_rx) = mpsc::channel();
        let src = ScriptedSource::immediate(vec![DeviceEvent::Connected, DeviceEvent::Locked]);

        Box::new(src).run(SourceContext { events: event_tx, commands: command_rx });

        assert_eq!(event_rx.recv(), Ok(DeviceEvent::Connected));
        assert_eq!(event_rx.recv(), Ok(DeviceEvent::Locked));
        assert!(event_rx.recv().is_err(), "channel should be closed after the script");
    }

    #[test]
    fn shutdown_command_stops_the_script() {
        let (event_tx, event_rx) = mpsc::channel();
        let (command_tx, command_rx) = mpsc::channel();
        command_tx.send(HubCommand::Shutdown).unwrap();

        let src = ScriptedSource::immediate(vec![DeviceEvent::Connected]);
        Box::new(src).run(SourceContext { events: event_tx, commands: command_rx });

        assert!(event_rx.recv().is_err(), "no events after an early shutdown");
    }

    #[test]
    fn demo_script_starts_with_the_greeting() {
        let demo = ScriptedSource::demo();
        assert_eq!(demo.steps[0].1, DeviceEvent::Connected);
        assert!(matches!(demo.steps[1].1, DeviceEvent::ArmSynced { .. }));
        assert_eq!(demo.steps[2].1, DeviceEvent::Unlocked);
    }
}
