//! Terminal Simon Says: play the round engine over stdin, no armband needed.

use std::io::{self, Write};

use armband_hub::Pose;
use simon_game::SimonGame;

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║            Simon Says — terminal gesture trainer         ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();
    println!("  Type the gesture Simon asks for:");
    println!("    f = fist   s = fingers spread   a = wave in   d = wave out");
    println!("    r = rest   u = unknown          q = quit");
    println!();

    let seed: Option<u64> = {
        let raw = read_line("  RNG seed (blank = random): ");
        raw.trim().parse().ok()
    };

    let mut game = SimonGame::new(Pose::Fist, seed);
    println!();

    loop {
        let prompt = format!("  Simon says: {}  > ", game.target());
        let pose = match read_line(&prompt).trim() {
            "f" => Pose::Fist,
            "s" => Pose::FingersSpread,
            "a" => Pose::WaveIn,
            "d" => Pose::WaveOut,
            "r" => Pose::Rest,
            "u" => Pose::Unknown,
            "q" | "quit" => {
                println!("\n  {} rounds completed. Goodbye!\n", game.moves_completed());
                break;
            }
            _ => {
                println!("  ⚠  f, s, a, d, r, u or q.");
                continue;
            }
        };

        let out = game.on_recognized_pose(pose);
        if out.matched {
            println!("  ✓  {} rounds", out.moves_completed);
            if out.reward_visible {
                println!("  ★★★  {} rounds — rainbow time!  ★★★", out.moves_completed);
            }
        } else {
            println!("  ✗  that was {}, not {}", pose, game.target());
        }
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
