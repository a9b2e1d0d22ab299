//! Presentation state: everything the visualizer draws, nothing it computes.
//!
//! The adapter writes this; the render loop reads it and calls [`UiState::tick`]
//! once per frame to advance the animations (reward sweep, match flash,
//! toast fade).

use armband_hub::Pose;
use simon_game::MatchOutcome;

/// Headline shown before the band has said anything.
pub const IDLE_HEADLINE: &str = "waiting for armband";

// ════════════════════════════════════════════════════════════════════════════
// Link / lock display state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkState {
    /// No connection yet this session.
    Idle,
    Connected,
    Disconnected,
}

impl LinkState {
    /// Headline color: cyan while connected, red after a drop.
    pub fn color(self) -> u32 {
        match self {
            LinkState::Idle         => 0xFFE8E8E8,
            LinkState::Connected    => 0xFF00E5E5,
            LinkState::Disconnected => 0xFFFF4040,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LinkState::Idle         => "no band",
            LinkState::Connected    => "connected",
            LinkState::Disconnected => "disconnected",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockState {
    Locked,
    Unlocked,
}

impl LockState {
    pub fn label(self) -> &'static str {
        match self {
            LockState::Locked   => "locked",
            LockState::Unlocked => "unlocked",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// UiState
// ════════════════════════════════════════════════════════════════════════════

pub struct UiState {
    pub link:  LinkState,
    pub lock:  LockState,

    /// Pose feedback / arm placement line; tilts with roll.
    pub headline: String,
    /// "Simon says: ..." instruction for the current target.
    pub prompt:   String,
    pub target:   Pose,

    pub moves_completed: usize,
    pub reward_visible:  bool,
    /// Hue offset driving the rainbow band sweep, wraps at 1.0.
    pub reward_phase:    f32,

    /// 1.0 right after a correct gesture, decays to 0.
    pub match_flash: f32,

    // ── attitude, degrees, sign-adjusted for wear direction ──────────────
    pub roll:  f32,
    pub pitch: f32,
    pub yaw:   f32,

    /// Transient status message and its remaining life in frames-worth.
    pub toast: Option<(String, f32)>,
}

impl UiState {
    pub fn new(initial_target: Pose) -> Self {
        UiState {
            link:  LinkState::Idle,
            lock:  LockState::Locked,
            headline: IDLE_HEADLINE.to_string(),
            prompt:   simon_prompt(initial_target),
            target:   initial_target,
            moves_completed: 0,
            reward_visible:  false,
            reward_phase:    0.0,
            match_flash: 0.0,
            roll:  0.0,
            pitch: 0.0,
            yaw:   0.0,
            toast: None,
        }
    }

    /// Show a transient message for about a second at 60 fps.
    pub fn toast(&mut self, text: &str) {
        self.toast = Some((text.to_string(), 1.0));
    }

    pub fn set_attitude(&mut self, roll: f32, pitch: f32, yaw: f32) {
        self.roll = roll;
        self.pitch = pitch;
        self.yaw = yaw;
    }

    /// Fold a game outcome in.  Non-matches leave everything untouched.
    pub fn apply_outcome(&mut self, out: &MatchOutcome) {
        if !out.matched {
            return;
        }
        self.moves_completed = out.moves_completed;
        self.reward_visible = out.reward_visible;
        self.match_flash = 1.0;
        if let Some(target) = out.new_target {
            self.target = target;
            self.prompt = simon_prompt(target);
        }
    }

    /// Advance one frame of animation.
    pub fn tick(&mut self) {
        if self.reward_visible {
            self.reward_phase = (self.reward_phase + 0.01) % 1.0;
        }

        self.match_flash *= 0.90;
        if self.match_flash < 0.01 {
            self.match_flash = 0.0;
        }

        if let Some((_, ttl)) = &mut self.toast {
            *ttl -= 1.0 / 60.0;
            if *ttl <= 0.0 {
                self.toast = None;
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Prompt text
// ════════════════════════════════════════════════════════════════════════════

/// The instruction line for a target gesture.
pub fn simon_prompt(target: Pose) -> String {
    let ask = match target {
        Pose::Fist          => "make a fist",
        Pose::FingersSpread => "spread your fingers",
        Pose::WaveIn        => "wave in",
        Pose::WaveOut       => "wave out",
        // Targets only ever come from the four gestures.
        other => other.label(),
    };
    format!("simon says: {}", ask)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(moves: usize, reward: bool, target: Pose) -> MatchOutcome {
        MatchOutcome {
            matched: true,
            moves_completed: moves,
            reward_visible: reward,
            new_target: Some(target),
        }
    }

    #[test]
    fn outcome_updates_counter_prompt_and_flash() {
        let mut ui = UiState::new(Pose::Fist);
        ui.apply_outcome(&matched(3, false, Pose::WaveOut));
        assert_eq!(ui.moves_completed, 3);
        assert_eq!(ui.target, Pose::WaveOut);
        assert_eq!(ui.prompt, "simon says: wave out");
        assert!(ui.match_flash > 0.9);
    }

    #[test]
    fn non_match_outcome_is_ignored() {
        let mut ui = UiState::new(Pose::Fist);
        let out = MatchOutcome {
            matched: false,
            moves_completed: 0,
            reward_visible: false,
            new_target: None,
        };
        ui.apply_outcome(&out);
        assert_eq!(ui.prompt, "simon says: make a fist");
        assert_eq!(ui.match_flash, 0.0);
    }

    #[test]
    fn reward_phase_only_moves_while_visible() {
        let mut ui = UiState::new(Pose::Fist);
        ui.tick();
        assert_eq!(ui.reward_phase, 0.0);

        ui.reward_visible = true;
        for _ in 0..10 {
            ui.tick();
        }
        assert!(ui.reward_phase > 0.0);
    }

    #[test]
    fn flash_decays_to_zero() {
        let mut ui = UiState::new(Pose::Fist);
        ui.match_flash = 1.0;
        for _ in 0..120 {
            ui.tick();
        }
        assert_eq!(ui.match_flash, 0.0);
    }

    #[test]
    fn toast_expires() {
        let mut ui = UiState::new(Pose::Fist);
        ui.toast("connected!");
        for _ in 0..70 {
            ui.tick();
        }
        assert!(ui.toast.is_none());
    }
}
