//! Software-rendered status window using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ lock: unlocked                              ■ connected    │
//! │                                                            │
//! │                <headline, tilts with roll>                 │
//! │                                                            │
//! │   ┌────────────┐  simon says: wave in        ╭ attitude ╮  │
//! │   │   glyph    │                             │  needle  │  │
//! │   │            │  moves completed: 7         ╰──────────╯  │
//! │   └────────────┘                                           │
//! │   ▒▒▒▒▒▒▒ rainbow band (every 10th round) ▒▒▒▒▒▒▒         │
//! │ toast / status line                                        │
//! │ key legend                                                 │
//! └────────────────────────────────────────────────────────────┘
//! ```

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use std::sync::mpsc::Sender;

use armband_hub::Pose;

use crate::sim::SimKey;
use crate::ui::{LinkState, UiState};

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W: usize = 760;
pub const WIN_H: usize = 520;

const TOP_BAR_H:   usize = 30;
const HEADLINE_Y:  usize = 96;
const GLYPH_X:     usize = 56;
const GLYPH_Y:     usize = 180;
const GLYPH_CELL:  usize = 13;
const PROMPT_X:    usize = 260;
const PROMPT_Y:    usize = 206;
const MOVES_Y:     usize = 260;
const NEEDLE_CX:   usize = 650;
const NEEDLE_CY:   usize = 236;
const NEEDLE_R:    usize = 46;
const RAINBOW_Y:   usize = 372;
const RAINBOW_H:   usize = 36;
const STATUS_Y:    usize = WIN_H - 64;

const BG_COLOR:    u32 = 0xFF10141C;
const TOP_BG:      u32 = 0xFF1C2433;
const PANEL_EDGE:  u32 = 0xFF2E3B52;
const GLYPH_COLOR: u32 = 0xFF4D9BE6; // solid blue, like the vendor art
const TEXT_DIM:    u32 = 0xFF8A93A6;
const TEXT_MAIN:   u32 = 0xFFE6EAF2;
const FLASH_GOLD:  u32 = 0xFFFFD34D;

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf: Vec<u32>,
    key_tx: Sender<SimKey>,
}

impl Visualizer {
    pub fn new(key_tx: Sender<SimKey>) -> Result<Self, String> {
        let mut window = Window::new(
            "Armband Simon Says",
            WIN_W,
            WIN_H,
            WindowOptions { resize: false, ..WindowOptions::default() },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer { window, buf: vec![BG_COLOR; WIN_W * WIN_H], key_tx })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Poll keyboard input and forward it as [`SimKey`]s.
    /// Returns false when the app should quit.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() {
            return false;
        }
        if self.window.is_key_pressed(Key::Q, KeyRepeat::No) {
            return false;
        }

        let one_shot: [(Key, SimKey); 9] = [
            (Key::F, SimKey::Fist),
            (Key::S, SimKey::FingersSpread),
            (Key::A, SimKey::WaveIn),
            (Key::D, SimKey::WaveOut),
            (Key::R, SimKey::Rest),
            (Key::U, SimKey::Unknown),
            (Key::C, SimKey::ToggleConnect),
            (Key::Y, SimKey::ToggleSync),
            (Key::L, SimKey::ToggleLock),
        ];
        for (key, sim) in one_shot {
            if self.window.is_key_pressed(key, KeyRepeat::No) {
                let _ = self.key_tx.send(sim);
            }
        }

        // Attitude keys repeat while held.
        let held: [(Key, SimKey); 6] = [
            (Key::Left, SimKey::RollLeft),
            (Key::Right, SimKey::RollRight),
            (Key::Up, SimKey::PitchUp),
            (Key::Down, SimKey::PitchDown),
            (Key::Z, SimKey::YawLeft),
            (Key::X, SimKey::YawRight),
        ];
        for (key, sim) in held {
            if self.window.is_key_pressed(key, KeyRepeat::Yes) {
                let _ = self.key_tx.send(sim);
            }
        }

        true
    }

    /// Render one frame of the UI state.
    pub fn render(&mut self, ui: &UiState) {
        self.buf.fill(BG_COLOR);

        // ── Top bar: lock state and link ──────────────────────────────────
        self.fill_rect(0, 0, WIN_W, TOP_BAR_H, TOP_BG);
        self.draw_label(&format!("lock: {}", ui.lock.label()), 12, 9, 2, TEXT_MAIN);

        let link_label = ui.link.label();
        let lx = WIN_W - 30 - link_label.len() * 8;
        self.fill_rect(lx - 16, 10, 10, 10, ui.link.color());
        self.draw_label(link_label, lx, 9, 2, TEXT_MAIN);

        // ── Headline, tilted by roll ──────────────────────────────────────
        self.draw_label_rotated(
            &ui.headline,
            WIN_W / 2,
            HEADLINE_Y,
            3,
            ui.roll,
            ui.link.color(),
        );

        // ── Target glyph panel ────────────────────────────────────────────
        let glyph_w = GLYPH_CELL * 12;
        let glyph_h = GLYPH_CELL * 10;
        let border = if ui.match_flash > 0.0 {
            blend(PANEL_EDGE, FLASH_GOLD, ui.match_flash)
        } else {
            PANEL_EDGE
        };
        self.draw_border(GLYPH_X - 10, GLYPH_Y - 10, glyph_w + 20, glyph_h + 20, border);
        self.draw_glyph(ui.target, GLYPH_X, GLYPH_Y, GLYPH_CELL, GLYPH_COLOR);

        // ── Prompt and counter ────────────────────────────────────────────
        self.draw_label(&ui.prompt, PROMPT_X, PROMPT_Y, 2, TEXT_MAIN);
        self.draw_label(
            &format!("moves completed: {}", ui.moves_completed),
            PROMPT_X,
            MOVES_Y,
            2,
            TEXT_MAIN,
        );

        // ── Attitude needle and readout ───────────────────────────────────
        self.draw_border(
            NEEDLE_CX - NEEDLE_R - 8,
            NEEDLE_CY - NEEDLE_R - 8,
            (NEEDLE_R + 8) * 2,
            (NEEDLE_R + 8) * 2,
            PANEL_EDGE,
        );
        self.draw_needle(NEEDLE_CX, NEEDLE_CY, NEEDLE_R, ui.roll);
        self.draw_label(
            &format!("r {:>4.0}  p {:>4.0}  y {:>4.0}", ui.roll, ui.pitch, ui.yaw),
            NEEDLE_CX - NEEDLE_R - 8,
            NEEDLE_CY + NEEDLE_R + 14,
            1,
            TEXT_DIM,
        );

        // ── Rainbow reward band ───────────────────────────────────────────
        if ui.reward_visible {
            self.draw_rainbow(RAINBOW_Y, RAINBOW_H, ui.reward_phase);
        }

        // ── Toast / status line ───────────────────────────────────────────
        match &ui.toast {
            Some((text, ttl)) => {
                let color = blend(BG_COLOR, TEXT_MAIN, ttl.min(1.0));
                self.draw_label(text, 12, STATUS_Y, 2, color);
            }
            None if ui.link == LinkState::Idle => {
                self.draw_label("press c to connect the band", 12, STATUS_Y, 2, TEXT_DIM);
            }
            None => {}
        }

        // ── Key legend ────────────────────────────────────────────────────
        self.draw_label(
            "f=fist  s=spread  a=wave-in  d=wave-out  r=rest  u=unknown",
            12,
            WIN_H - 30,
            1,
            TEXT_DIM,
        );
        self.draw_label(
            "c=connect  y=sync  l=lock  arrows=tilt  z/x=yaw  q=quit",
            12,
            WIN_H - 18,
            1,
            TEXT_DIM,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── Widgets ───────────────────────────────────────────────────────────

    fn draw_glyph(&mut self, pose: Pose, x: usize, y: usize, cell: usize, color: u32) {
        for (row, line) in gesture_glyph(pose).iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                if ch == '#' {
                    self.fill_rect(x + col * cell, y + row * cell, cell - 1, cell - 1, color);
                }
            }
        }
    }

    fn draw_needle(&mut self, cx: usize, cy: usize, r: usize, roll_deg: f32) {
        // Horizon reference.
        for dx in 0..(r * 2) {
            self.set_pixel(cx - r + dx, cy, PANEL_EDGE);
        }
        // Needle sweeps with roll; 0° points straight up.
        let angle = roll_deg.to_radians();
        let (sin, cos) = (angle.sin(), angle.cos());
        for t in 0..r as isize {
            let px = cx as isize + (t as f32 * sin) as isize;
            let py = cy as isize - (t as f32 * cos) as isize;
            if px >= 0 && py >= 0 {
                self.set_pixel(px as usize, py as usize, FLASH_GOLD);
                self.set_pixel(px as usize + 1, py as usize, FLASH_GOLD);
            }
        }
    }

    fn draw_rainbow(&mut self, y: usize, h: usize, phase: f32) {
        for x in 0..WIN_W {
            let hue = ((x as f32 / WIN_W as f32) + phase).fract() * 360.0;
            let color = hsv_to_argb(hue, 0.85, 0.95);
            for row in y..(y + h).min(WIN_H) {
                self.buf[row * WIN_W + x] = color;
            }
        }
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(WIN_H) {
            for col in x..(x + w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for col in x..(x + w).min(WIN_W) {
            if y < WIN_H {
                self.buf[y * WIN_W + col] = color;
            }
            if y + h - 1 < WIN_H {
                self.buf[(y + h - 1) * WIN_W + col] = color;
            }
        }
        for row in y..(y + h).min(WIN_H) {
            if x < WIN_W {
                self.buf[row * WIN_W + x] = color;
            }
            if x + w - 1 < WIN_W {
                self.buf[row * WIN_W + x + w - 1] = color;
            }
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < WIN_W && y < WIN_H {
            self.buf[y * WIN_W + x] = color;
        }
    }

    /// Draw `text` with the 3×5 font, each glyph pixel scaled to a
    /// `scale`×`scale` block.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
            cx += 4 * scale;
            if cx + 4 * scale > WIN_W {
                break;
            }
        }
    }

    /// Draw `text` centered on (`cx`, `cy`), rotated by `angle_deg`.
    /// Blocks are slightly oversized so rotation leaves no holes.
    fn draw_label_rotated(
        &mut self,
        text: &str,
        cx: usize,
        cy: usize,
        scale: usize,
        angle_deg: f32,
        color: u32,
    ) {
        let angle = angle_deg.to_radians();
        let (sin, cos) = (angle.sin(), angle.cos());
        let total_w = (text.chars().count() * 4 * scale) as f32;
        let half_h = (5 * scale) as f32 / 2.0;

        for (i, ch) in text.chars().enumerate() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) == 0 {
                        continue;
                    }
                    let dx = (i * 4 + col) as f32 * scale as f32 - total_w / 2.0;
                    let dy = (row * scale) as f32 - half_h;
                    let rx = cx as f32 + dx * cos - dy * sin;
                    let ry = cy as f32 + dx * sin + dy * cos;
                    if rx >= 0.0 && ry >= 0.0 {
                        self.fill_rect(rx as usize, ry as usize, scale + 1, scale + 1, color);
                    }
                }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Gesture glyphs — 12×10 bitmaps for the target panel
// ════════════════════════════════════════════════════════════════════════════

const FIST_GLYPH: [&str; 10] = [
    "............",
    "..########..",
    ".##.##.##.#.",
    ".##########.",
    ".##########.",
    ".##########.",
    ".##########.",
    "..########..",
    "...######...",
    "............",
];

const SPREAD_GLYPH: [&str; 10] = [
    ".#..#..#..#.",
    ".#..#..#..#.",
    ".#..#..#..#.",
    "#.########..",
    ".#########..",
    "..########..",
    "..########..",
    "..########..",
    "...######...",
    "............",
];

const WAVE_IN_GLYPH: [&str; 10] = [
    "....#.......",
    "...##.......",
    "..##........",
    ".###########",
    "############",
    ".###########",
    "..##........",
    "...##.......",
    "....#.......",
    "............",
];

const WAVE_OUT_GLYPH: [&str; 10] = [
    ".......#....",
    ".......##...",
    "........##..",
    "###########.",
    "############",
    "###########.",
    "........##..",
    ".......##...",
    ".......#....",
    "............",
];

/// The panel art for a target pose.  Non-target poses fall back to the
/// fist so a draw call can never fail.
pub fn gesture_glyph(pose: Pose) -> &'static [&'static str; 10] {
    match pose {
        Pose::FingersSpread => &SPREAD_GLYPH,
        Pose::WaveIn => &WAVE_IN_GLYPH,
        Pose::WaveOut => &WAVE_OUT_GLYPH,
        _ => &FIST_GLYPH,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Minimal 3×5 bitmap font
// ════════════════════════════════════════════════════════════════════════════

fn char_glyph(c: char) -> [u8; 5] {
    match c.to_ascii_lowercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _ => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

/// Alpha-blend two ARGB colors. `t` = 0.0 keeps `a`, `t` = 1.0 keeps `b`.
fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0 - t) + cb as f32 * t) as u32;
    let (ar, br) = ((a >> 16) & 0xFF, (b >> 16) & 0xFF);
    let (ag, bg) = ((a >> 8) & 0xFF, (b >> 8) & 0xFF);
    let (ab, bb) = (a & 0xFF, b & 0xFF);
    0xFF000000 | (lerp(ar, br) << 16) | (lerp(ag, bg) << 8) | lerp(ab, bb)
}

/// Convert HSV to packed ARGB (alpha forced opaque).
fn hsv_to_argb(h: f32, s: f32, v: f32) -> u32 {
    let h = h.rem_euclid(360.0);
    let hi = (h / 60.0) as u32;
    let f = h / 60.0 - hi as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match hi {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    0xFF000000 | (((r * 255.0) as u32) << 16) | (((g * 255.0) as u32) << 8) | (b * 255.0) as u32
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_endpoints() {
        assert_eq!(blend(0xFF000000, 0xFFFFFFFF, 0.0), 0xFF000000);
        assert_eq!(blend(0xFF000000, 0xFFFFFFFF, 1.0), 0xFFFFFFFF);
    }

    #[test]
    fn hsv_zero_hue_is_red() {
        let c = hsv_to_argb(0.0, 1.0, 1.0);
        assert_eq!(c, 0xFFFF0000);
    }

    #[test]
    fn hsv_always_opaque() {
        for h in [0.0_f32, 90.0, 180.0, 270.0, 359.0] {
            assert_eq!(hsv_to_argb(h, 0.85, 0.95) >> 24, 0xFF);
        }
    }

    #[test]
    fn glyphs_are_well_formed() {
        for pose in [Pose::Fist, Pose::FingersSpread, Pose::WaveIn, Pose::WaveOut] {
            let glyph = gesture_glyph(pose);
            for line in glyph.iter() {
                assert_eq!(line.len(), 12, "{:?} has a bad row", pose);
            }
            // Something must actually be drawn.
            assert!(glyph.iter().any(|l| l.contains('#')));
        }
    }

    #[test]
    fn wave_glyphs_mirror_each_other() {
        let wave_in = gesture_glyph(Pose::WaveIn);
        let wave_out = gesture_glyph(Pose::WaveOut);
        for (li, lo) in wave_in.iter().zip(wave_out.iter()) {
            let mirrored: String = lo.chars().rev().collect();
            assert_eq!(*li, mirrored.as_str());
        }
    }
}
