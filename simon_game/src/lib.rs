//! # simon_game
//!
//! The round engine behind the armband "Simon Says" demo.
//!
//! The game holds one target gesture.  Every recognized pose is compared
//! against it:
//!
//! * **match** — the round is recorded, a new target is drawn uniformly at
//!   random from the four gesture poses (repeats allowed), and the caller
//!   gets the fresh target to display.
//! * **no match** — nothing changes.  Wrong attempts are never penalized;
//!   the game only reacts to correct ones.
//!
//! Every tenth completed round lights the reward banner; it goes dark again
//! on the next match.  `Unknown` and `Rest` are accepted input but can never
//! match, because the target is always one of the four gesture poses.
//!
//! State lives for one session and is never persisted.

use armband_hub::Pose;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

// ════════════════════════════════════════════════════════════════════════════
// Constants
// ════════════════════════════════════════════════════════════════════════════

/// The poses Simon may ask for.  `Unknown` and `Rest` are never targets.
pub const TARGET_POSES: [Pose; 4] =
    [Pose::Fist, Pose::FingersSpread, Pose::WaveIn, Pose::WaveOut];

/// The reward banner shows at every multiple of this many completed rounds.
pub const REWARD_INTERVAL: usize = 10;

// ════════════════════════════════════════════════════════════════════════════
// MatchOutcome
// ════════════════════════════════════════════════════════════════════════════

/// What one `on_recognized_pose` call changed, for the caller to render.
/// The game itself performs no side effects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchOutcome {
    pub matched: bool,
    /// Total rounds completed so far, including this one if it matched.
    pub moves_completed: usize,
    pub reward_visible: bool,
    /// The freshly drawn target; `None` when the pose did not match.
    pub new_target: Option<Pose>,
}

// ════════════════════════════════════════════════════════════════════════════
// SimonGame
// ════════════════════════════════════════════════════════════════════════════

pub struct SimonGame {
    target: Pose,
    history: Vec<Pose>,
    rng: SmallRng,
}

impl SimonGame {
    /// Start a game expecting `initial_target` first.  Pass a seed for a
    /// reproducible target sequence; `None` seeds from the OS.
    ///
    /// Panics if `initial_target` is `Unknown` or `Rest`; those are never
    /// valid targets.
    pub fn new(initial_target: Pose, seed: Option<u64>) -> Self {
        assert!(
            initial_target.is_actionable(),
            "initial target must be one of the four gesture poses"
        );
        let rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_entropy(),
        };
        SimonGame { target: initial_target, history: Vec::new(), rng }
    }

    /// The gesture the game currently expects.
    pub fn target(&self) -> Pose {
        self.target
    }

    /// Rounds completed since the session started.
    pub fn moves_completed(&self) -> usize {
        self.history.len()
    }

    /// Every target matched so far, in order.  Append-only.
    pub fn history(&self) -> &[Pose] {
        &self.history
    }

    /// True at every non-zero multiple of [`REWARD_INTERVAL`].
    pub fn reward_visible(&self) -> bool {
        !self.history.is_empty() && self.history.len() % REWARD_INTERVAL == 0
    }

    /// Feed one recognized pose.
    pub fn on_recognized_pose(&mut self, pose: Pose) -> MatchOutcome {
        if pose != self.target {
            return MatchOutcome {
                matched: false,
                moves_completed: self.history.len(),
                reward_visible: self.reward_visible(),
                new_target: None,
            };
        }

        self.history.push(self.target);
        // Uniform over the four targets; drawing the same one again is
        // allowed.
        let next = TARGET_POSES[self.rng.gen_range(0..TARGET_POSES.len())];
        self.target = next;

        MatchOutcome {
            matched: true,
            moves_completed: self.history.len(),
            reward_visible: self.reward_visible(),
            new_target: Some(next),
        }
    }
}

impl Default for SimonGame {
    fn default() -> Self {
        SimonGame::new(Pose::Fist, None)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    /// Match whatever the game currently wants, `n` times.
    fn complete_rounds(game: &mut SimonGame, n: usize) -> MatchOutcome {
        let mut last = None;
        for _ in 0..n {
            let out = game.on_recognized_pose(game.target());
            assert!(out.matched);
            last = Some(out);
        }
        last.expect("n must be > 0")
    }

    #[test]
    fn unknown_and_rest_never_match() {
        let mut game = SimonGame::new(Pose::Fist, Some(1));
        for _ in 0..20 {
            assert!(!game.on_recognized_pose(Pose::Unknown).matched);
            assert!(!game.on_recognized_pose(Pose::Rest).matched);
        }
        assert_eq!(game.moves_completed(), 0);
        assert_eq!(game.target(), Pose::Fist);
    }

    #[test]
    fn non_matching_pose_changes_nothing() {
        let mut game = SimonGame::new(Pose::Fist, Some(1));
        let wrong = [Pose::WaveIn, Pose::WaveOut, Pose::FingersSpread];
        for pose in wrong.iter().cycle().take(30) {
            let out = game.on_recognized_pose(*pose);
            assert!(!out.matched);
            assert_eq!(out.moves_completed, 0);
            assert!(!out.reward_visible);
            assert_eq!(out.new_target, None);
        }
        assert_eq!(game.target(), Pose::Fist);
    }

    #[test]
    fn match_records_round_and_redraws_target() {
        let mut game = SimonGame::new(Pose::Fist, Some(7));
        let out = game.on_recognized_pose(Pose::Fist);
        assert!(out.matched);
        assert_eq!(out.moves_completed, 1);
        assert_eq!(game.history(), &[Pose::Fist]);
        assert_eq!(out.new_target, Some(game.target()));
    }

    #[test]
    fn moves_count_equals_matches_at_call_time() {
        // Drive a mixed sequence and count matches by hand against the
        // target as it stood at each call.
        let mut game = SimonGame::new(Pose::Fist, Some(99));
        let feed = [
            Pose::WaveOut,
            Pose::Fist,
            Pose::Unknown,
            Pose::WaveIn,
            Pose::FingersSpread,
            Pose::Rest,
            Pose::Fist,
            Pose::WaveOut,
        ];
        let mut expected = 0;
        for pose in feed.iter().cycle().take(200) {
            let target_now = game.target();
            let out = game.on_recognized_pose(*pose);
            if *pose == target_now {
                expected += 1;
            }
            assert_eq!(out.moves_completed, expected);
        }
        assert_eq!(game.moves_completed(), expected);
    }

    #[test]
    fn reward_shows_at_ten_and_hides_at_eleven() {
        let mut game = SimonGame::new(Pose::Fist, Some(3));
        let out = complete_rounds(&mut game, 9);
        assert!(!out.reward_visible);

        let out = complete_rounds(&mut game, 1);
        assert_eq!(out.moves_completed, 10);
        assert!(out.reward_visible);
        assert!(game.reward_visible());

        let out = complete_rounds(&mut game, 1);
        assert_eq!(out.moves_completed, 11);
        assert!(!out.reward_visible);
    }

    #[test]
    fn reward_hidden_at_zero() {
        let game = SimonGame::new(Pose::Fist, Some(3));
        assert!(!game.reward_visible());
    }

    #[test]
    fn reward_returns_at_twenty() {
        let mut game = SimonGame::new(Pose::Fist, Some(5));
        let out = complete_rounds(&mut game, 20);
        assert!(out.reward_visible);
    }

    #[test]
    fn target_always_one_of_the_four() {
        let mut game = SimonGame::new(Pose::WaveIn, Some(1234));
        for _ in 0..100 {
            assert!(TARGET_POSES.contains(&game.target()));
            game.on_recognized_pose(game.target());
        }
    }

    #[test]
    fn seeded_games_replay_identically() {
        let mut a = SimonGame::new(Pose::Fist, Some(42));
        let mut b = SimonGame::new(Pose::Fist, Some(42));
        for _ in 0..50 {
            assert_eq!(a.target(), b.target());
            a.on_recognized_pose(a.target());
            b.on_recognized_pose(b.target());
        }
    }

    #[test]
    #[should_panic]
    fn rest_rejected_as_initial_target() {
        SimonGame::new(Pose::Rest, None);
    }
}
