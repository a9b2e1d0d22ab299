//! armband_simon — interactive entry point.

use std::io::{self, Write};

use armband_hub::{Arm, Pose, XDirection};
use armband_simon::app::{run, AppConfig};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Armband Simon Says — gesture matching demo          ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("  Device: simulated band (window keyboard; see the legend)");
    println!();

    let args: Vec<String> = std::env::args().collect();
    let cfg = if args.iter().any(|a| a == "--demo") {
        println!("  Demo: replaying a scripted session\n");
        AppConfig { demo: true, ..AppConfig::default() }
    } else if args.iter().any(|a| a == "--quick") {
        println!("  Quick-start: right arm, toward wrist, first target fist\n");
        AppConfig::default()
    } else {
        configure_interactively()
    };

    println!("  Opening window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn configure_interactively() -> AppConfig {
    let arm = match read_line("  Which arm? (l/r, default r): ").trim() {
        "l" | "L" => Arm::Left,
        _ => Arm::Right,
    };

    let x_direction = match read_line("  Band facing? (w=wrist/e=elbow, default w): ").trim() {
        "e" | "E" => XDirection::TowardElbow,
        _ => XDirection::TowardWrist,
    };

    let initial_target = {
        println!("  First target: 1.fist  2.fingers spread  3.wave in  4.wave out");
        match read_line("  Choice (1-4, default 1): ").trim() {
            "2" => Pose::FingersSpread,
            "3" => Pose::WaveIn,
            "4" => Pose::WaveOut,
            _ => Pose::Fist,
        }
    };

    let seed: Option<u64> = read_line("  RNG seed (blank = random): ").trim().parse().ok();

    AppConfig {
        arm,
        x_direction,
        initial_target,
        seed,
        ..AppConfig::default()
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
