//! lineup: CLI for the roster-roll service.
//!
//! Subcommands:
//! - check-config
//! - preview
//! - sim

use std::env;
use std::process;

use lineup_core::{AdminSet, Config, DrawContext};
use lineup_render::render;
use lineup_runtime::{EventLog, SessionRegistry};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

fn load_validated_config(path: &str) -> Config {
    let config = Config::load(path).unwrap_or_else(|e| {
        eprintln!("Unable to load config {}: {}", path, e);
        process::exit(1);
    });
    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        process::exit(1);
    }
    config
}

fn cmd_check_config(args: &[String]) {
    let mut config_path: Option<String> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"lineup check-config

USAGE:
    lineup check-config --config PATH

OPTIONS:
    --config PATH    Config file to load and validate
"#
                );
                return;
            }
            "--config" => {
                if i + 1 >= args.len() {
                    eprintln!("Missing value for --config");
                    process::exit(1);
                }
                config_path = Some(args[i + 1].clone());
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `lineup check-config`: {}", other);
                eprintln!("Run `lineup check-config --help` for usage.");
                process::exit(1);
            }
        }
    }

    let Some(path) = config_path else {
        eprintln!("Missing required --config");
        process::exit(1);
    };
    let config = load_validated_config(&path);
    println!(
        "Config OK: {} characters, {} per roll, {} rerolls",
        config.characters.len(),
        config.characters_given,
        config.max_rerolls
    );
}

fn cmd_preview(args: &[String]) {
    let mut config_path: Option<String> = None;
    let mut seed: Option<u64> = None;
    let mut owner: u64 = 1;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"lineup preview

USAGE:
    lineup preview --config PATH [--seed S] [--owner ID]

OPTIONS:
    --config PATH    Config file to load and validate
    --seed S         Pin the draw seed (default: OS entropy)
    --owner ID       Owner user id for the rendered message (default: 1)
"#
                );
                return;
            }
            "--config" => {
                if i + 1 >= args.len() {
                    eprintln!("Missing value for --config");
                    process::exit(1);
                }
                config_path = Some(args[i + 1].clone());
                i += 2;
            }
            "--seed" => {
                if i + 1 >= args.len() {
                    eprintln!("Missing value for --seed");
                    process::exit(1);
                }
                seed = Some(args[i + 1].parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --seed value: {}", args[i + 1]);
                    process::exit(1);
                }));
                i += 2;
            }
            "--owner" => {
                if i + 1 >= args.len() {
                    eprintln!("Missing value for --owner");
                    process::exit(1);
                }
                owner = args[i + 1].parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --owner value: {}", args[i + 1]);
                    process::exit(1);
                });
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `lineup preview`: {}", other);
                eprintln!("Run `lineup preview --help` for usage.");
                process::exit(1);
            }
        }
    }

    let Some(path) = config_path else {
        eprintln!("Missing required --config");
        process::exit(1);
    };
    let config = load_validated_config(&path);

    let mut ctx = match seed {
        Some(s) => DrawContext::with_seed(s),
        None => DrawContext::from_entropy(),
    };
    let sel = lineup_core::create_selection(
        config.roster(),
        config.characters_given,
        config.max_rerolls,
        owner,
        &mut ctx,
    )
    .unwrap_or_else(|e| {
        eprintln!("Unable to create selection: {}", e);
        process::exit(1);
    });

    let payload = render(&sel.snapshot());
    match serde_json::to_string_pretty(&payload) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("Failed to serialize payload: {}", e);
            process::exit(1);
        }
    }
}

#[derive(Debug, Default)]
struct SimStats {
    sessions: u64,
    reroll_attempts: u64,
    rerolls_applied: u64,
    rejected: u64,
    auto_locked: u64,
    force_locked: u64,
}

fn cmd_sim(args: &[String]) {
    let mut config_path: Option<String> = None;
    let mut sessions: u64 = 100;
    let mut seed: u64 = 0;
    let mut log_path: Option<String> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"lineup sim

USAGE:
    lineup sim --config PATH [--sessions N] [--seed S] [--log PATH]

OPTIONS:
    --config PATH    Config file to load and validate
    --sessions N     Number of sessions to drive (default: 100)
    --seed S         Base RNG seed (default: 0)
    --log PATH       Write NDJSON lifecycle events to PATH
"#
                );
                return;
            }
            "--config" => {
                if i + 1 >= args.len() {
                    eprintln!("Missing value for --config");
                    process::exit(1);
                }
                config_path = Some(args[i + 1].clone());
                i += 2;
            }
            "--sessions" => {
                if i + 1 >= args.len() {
                    eprintln!("Missing value for --sessions");
                    process::exit(1);
                }
                sessions = args[i + 1].parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --sessions value: {}", args[i + 1]);
                    process::exit(1);
                });
                i += 2;
            }
            "--seed" => {
                if i + 1 >= args.len() {
                    eprintln!("Missing value for --seed");
                    process::exit(1);
                }
                seed = args[i + 1].parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --seed value: {}", args[i + 1]);
                    process::exit(1);
                });
                i += 2;
            }
            "--log" => {
                if i + 1 >= args.len() {
                    eprintln!("Missing value for --log");
                    process::exit(1);
                }
                log_path = Some(args[i + 1].clone());
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `lineup sim`: {}", other);
                eprintln!("Run `lineup sim --help` for usage.");
                process::exit(1);
            }
        }
    }

    let Some(path) = config_path else {
        eprintln!("Missing required --config");
        process::exit(1);
    };
    let config = load_validated_config(&path);

    let mut log = log_path.map(|p| {
        EventLog::open_with_flush(&p, 256).unwrap_or_else(|e| {
            eprintln!("Unable to open log {}: {:?}", p, e);
            process::exit(1);
        })
    });

    let stats = run_sim(&config, sessions, seed, log.as_mut());
    if let Some(log) = log.as_mut() {
        if log.flush().is_err() {
            eprintln!("Warning: failed to flush event log");
        }
    }

    println!("Simulation:");
    println!("  - Sessions: {}", stats.sessions);
    println!(
        "  - Rerolls: {} applied of {} attempts ({} rejected)",
        stats.rerolls_applied, stats.reroll_attempts, stats.rejected
    );
    println!("  - Auto-locked (budget spent): {}", stats.auto_locked);
    println!("  - Force-locked: {}", stats.force_locked);
}

/// Drive random traffic, including deliberately unauthorized, out-of-range,
/// and post-lock requests. All of those must be silent no-ops.
fn run_sim(config: &Config, sessions: u64, seed: u64, mut log: Option<&mut EventLog>) -> SimStats {
    let reg = SessionRegistry::new();
    let roster = config.roster();
    let slots = config.characters_given;

    const STRANGER: u64 = 1;
    const ADMIN: u64 = 2;
    let policy = AdminSet::new(vec![ADMIN]);

    let mut stats = SimStats::default();
    let mut traffic = ChaCha8Rng::seed_from_u64(seed ^ 0xD1E7_C437_9E37_79B9);

    for s in 0..sessions {
        let owner = 1000 + s;
        let draw_seed = seed ^ (s.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        let created = reg.create(
            roster.clone(),
            slots,
            config.max_rerolls,
            owner,
            DrawContext::with_seed(draw_seed),
            log.as_deref_mut(),
        );
        let (id, mut snap) = match created {
            Ok(v) => v,
            Err(e) => {
                // validate() rules this out; a failure here is a bug.
                eprintln!("Session creation failed: {}", e);
                process::exit(1);
            }
        };
        stats.sessions += 1;

        let budget = config.max_rerolls as u64;
        for _ in 0..(budget * 2 + 8) {
            let was_locked = snap.locked;
            let before_left = snap.rerolls_left;

            let roll: u32 = traffic.gen_range(0..100);
            let next = if roll < 70 {
                stats.reroll_attempts += 1;
                let slot = traffic.gen_range(0..slots as usize);
                reg.reroll(id, slot, owner, &policy, log.as_deref_mut())
            } else if roll < 80 {
                // Stranger pressing someone else's button.
                stats.reroll_attempts += 1;
                let slot = traffic.gen_range(0..slots as usize);
                reg.reroll(id, slot, STRANGER, &policy, log.as_deref_mut())
            } else if roll < 86 {
                // Stale component index.
                stats.reroll_attempts += 1;
                reg.reroll(id, slots as usize, owner, &policy, log.as_deref_mut())
            } else if roll < 90 {
                reg.lock(id, ADMIN, &policy, log.as_deref_mut())
            } else if roll < 94 {
                reg.lock(id, STRANGER, &policy, log.as_deref_mut())
            } else {
                Some(snap.clone())
            };

            let Some(next) = next else { break };
            if next.rerolls_left < before_left {
                stats.rerolls_applied += 1;
                if next.locked {
                    stats.auto_locked += 1;
                }
            } else if !was_locked && next.locked {
                stats.force_locked += 1;
            }
            snap = next;
            if snap.locked {
                break;
            }
        }

        // One stale click after the terminal state; must change nothing.
        if snap.locked {
            stats.reroll_attempts += 1;
            reg.reroll(id, 0, owner, &policy, log.as_deref_mut());
        }

        stats.rejected = stats.reroll_attempts - stats.rerolls_applied;
        reg.evict(id, log.as_deref_mut());
    }

    stats
}

fn print_usage() {
    println!(
        r#"lineup

USAGE:
    lineup <SUBCOMMAND>

SUBCOMMANDS:
    check-config    Load and validate a config file
    preview         Render one freshly drawn selection as JSON
    sim             Drive many sessions with random traffic

Run `lineup <SUBCOMMAND> --help` for subcommand options.
"#
    );
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }
    match args[1].as_str() {
        "check-config" => cmd_check_config(&args[2..]),
        "preview" => cmd_preview(&args[2..]),
        "sim" => cmd_sim(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown subcommand: {}", other);
            print_usage();
            process::exit(1);
        }
    }
}
