//! Session wiring and the main event/render loop.

use std::sync::mpsc;

use armband_hub::{Arm, HubConfig, HubSession, Pose, ScriptedSource, XDirection};
use simon_game::SimonGame;

use crate::adapter::SimonAdapter;
use crate::sim::{KeyboardSource, SimKey};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for one session.
pub struct AppConfig {
    /// Identifier reported to the hub; must be non-empty.
    pub app_id: String,
    /// Which arm the simulated band is worn on.
    pub arm: Arm,
    pub x_direction: XDirection,
    /// What Simon asks for first.
    pub initial_target: Pose,
    /// Fixed RNG seed for a reproducible target sequence; `None` for random.
    pub seed: Option<u64>,
    /// Replay the canned demo session instead of reading the keyboard.
    pub demo: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            app_id: "dev.armband.simon".to_string(),
            arm: Arm::Right,
            x_direction: XDirection::TowardWrist,
            initial_target: Pose::Fist,
            seed: None,
            demo: false,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Attach a session, open the window, and loop until quit.
///
/// The band greets on its own (connect, sync, unlock), so the game is
/// playable the moment the window appears.
pub fn run(cfg: AppConfig) -> Result<(), String> {
    let (key_tx, key_rx) = mpsc::channel::<SimKey>();

    let hub_config = HubConfig::new(&cfg.app_id);
    let session = if cfg.demo {
        HubSession::attach(hub_config, ScriptedSource::demo())
    } else {
        HubSession::attach(
            hub_config,
            KeyboardSource { rx: key_rx, arm: cfg.arm, x_direction: cfg.x_direction },
        )
    }
    .map_err(|e| e.to_string())?;

    let mut vis = Visualizer::new(key_tx)?;
    let mut adapter =
        SimonAdapter::new(SimonGame::new(cfg.initial_target, cfg.seed), session.commander());

    while vis.is_open() {
        if !vis.poll_input() {
            break;
        }
        session.dispatch_pending(&mut adapter);
        adapter.tick();
        vis.render(adapter.ui());
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use armband_hub::DeviceEvent;
    use crate::ui::{LinkState, LockState};

    /// End-to-end minus the window: a scripted session drives the adapter
    /// through the real hub channels.
    #[test]
    fn scripted_session_drives_adapter() {
        let script = vec![
            DeviceEvent::Connected,
            DeviceEvent::ArmSynced { arm: Arm::Left, x_direction: XDirection::TowardWrist },
            DeviceEvent::Unlocked,
            DeviceEvent::Pose(Pose::Fist),
            DeviceEvent::Pose(Pose::Rest),
        ];
        let session = HubSession::attach(
            HubConfig::new("test.armband.simon"),
            ScriptedSource::immediate(script),
        )
        .unwrap();

        let mut adapter =
            SimonAdapter::new(SimonGame::new(Pose::Fist, Some(11)), session.commander());
        let n = session.dispatch_to_end(&mut adapter);

        assert_eq!(n, 5);
        assert_eq!(adapter.ui().link, LinkState::Connected);
        assert_eq!(adapter.ui().lock, LockState::Unlocked);
        assert_eq!(adapter.game().moves_completed(), 1);
        assert_eq!(adapter.ui().headline, "waiting...");
    }

    #[test]
    fn default_config_is_playable() {
        let cfg = AppConfig::default();
        assert!(!cfg.app_id.is_empty());
        assert_eq!(cfg.initial_target, Pose::Fist);
        assert!(!cfg.demo);
    }
}
