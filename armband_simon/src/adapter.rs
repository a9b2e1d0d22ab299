//! The device listener: routes armband events into the game and the UI,
//! and answers every pose with the unlock/buzz command pair.

use armband_hub::{
    Arm, DeviceListener, HubCommander, Pose, Quaternion, UnlockType, XDirection,
};
use simon_game::SimonGame;

use crate::ui::{simon_prompt, LinkState, LockState, UiState, IDLE_HEADLINE};

// ════════════════════════════════════════════════════════════════════════════
// SimonAdapter
// ════════════════════════════════════════════════════════════════════════════

/// Single owner of the game and the UI state; the session dispatches every
/// event here, one at a time.
pub struct SimonAdapter {
    game: SimonGame,
    ui: UiState,
    commander: HubCommander,
    /// Wear direction from the last arm sync; flips roll/pitch signs.
    x_direction: XDirection,
}

impl SimonAdapter {
    pub fn new(game: SimonGame, commander: HubCommander) -> Self {
        let ui = UiState::new(game.target());
        SimonAdapter { game, ui, commander, x_direction: XDirection::TowardWrist }
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn game(&self) -> &SimonGame {
        &self.game
    }

    /// Advance per-frame UI animation.
    pub fn tick(&mut self) {
        self.ui.tick();
    }
}

impl DeviceListener for SimonAdapter {
    fn on_connect(&mut self) {
        self.ui.link = LinkState::Connected;
        self.ui.toast("connected!");
    }

    fn on_disconnect(&mut self) {
        self.ui.link = LinkState::Disconnected;
        self.ui.toast("band disconnected");
    }

    fn on_arm_sync(&mut self, arm: Arm, x_direction: XDirection) {
        self.x_direction = x_direction;
        self.ui.headline = format!("on your {} arm", arm.label());
        self.ui.toast("arm synced");
    }

    fn on_arm_unsync(&mut self) {
        self.x_direction = XDirection::TowardWrist;
        self.ui.headline = IDLE_HEADLINE.to_string();
        self.ui.toast("arm unsynced");
    }

    fn on_lock(&mut self) {
        self.ui.lock = LockState::Locked;
    }

    fn on_unlock(&mut self) {
        self.ui.lock = LockState::Unlocked;
        // Re-show what Simon currently wants, as the band wakes up.
        self.ui.prompt = simon_prompt(self.game.target());
        self.ui.toast("unlocked");
    }

    fn on_orientation(&mut self, rotation: Quaternion) {
        let mut roll = rotation.roll().to_degrees();
        let mut pitch = rotation.pitch().to_degrees();
        let yaw = rotation.yaw().to_degrees();

        // Worn toward the elbow, the band's x-axis points the other way.
        if self.x_direction == XDirection::TowardElbow {
            roll = -roll;
            pitch = -pitch;
        }

        self.ui.set_attitude(roll, pitch, yaw);
    }

    fn on_pose(&mut self, pose: Pose) {
        self.ui.headline = match pose {
            Pose::Unknown | Pose::Rest => "waiting...".to_string(),
            gesture => format!("{}!", gesture.label()),
        };

        let outcome = self.game.on_recognized_pose(pose);
        self.ui.apply_outcome(&outcome);

        // Stay unlocked so poses can be held without the band relocking,
        // and buzz when the gesture counted as a deliberate action.
        self.commander.unlock(UnlockType::Hold);
        if pose.is_actionable() {
            self.commander.notify_user_action();
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
