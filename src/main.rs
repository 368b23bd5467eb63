//! Neon Strike headless driver
//!
//! Runs the simulation against a virtual 60 Hz clock: a stretch of menu
//! (idle) frames, then one play session steered by a simple autopilot that
//! shoots the lowest target on screen. Prints a JSON run summary.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use glam::Vec2;
use serde::Serialize;

use neon_strike::audio::{AudioManager, LogSink};
use neon_strike::sim::{GameEvent, RenderSnapshot, SoundCue, Viewport};
use neon_strike::{BestScore, QualityPreset, Session, Settings};

/// Virtual frame spacing (ms)
const FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "neon-strike", about = "Run a headless Neon Strike session")]
struct Cli {
    /// RNG seed for the run
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Menu frames to simulate before pressing start
    #[arg(long, default_value_t = 120)]
    idle_frames: u32,
    /// Upper bound on play frames
    #[arg(long, default_value_t = 60 * 60 * 5)]
    max_frames: u32,
    /// Autopilot fires every N frames (0 disables firing)
    #[arg(long, default_value_t = 12)]
    fire_every: u32,
    #[arg(long, default_value_t = 1280.0)]
    width: f32,
    #[arg(long, default_value_t = 720.0)]
    height: f32,
    /// Settings JSON (defaults used when absent)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Override the quality preset from settings
    #[arg(long)]
    quality: Option<QualityPreset>,
    /// Best-score JSON, read at start and updated at the end
    #[arg(long)]
    best: Option<PathBuf>,
    /// Print a render snapshot as a JSON line every N frames
    #[arg(long)]
    dump_every: Option<u32>,
}

#[derive(Debug, Default, Serialize)]
struct RunSummary {
    seed: u64,
    play_frames: u32,
    final_score: u64,
    lives_left: i32,
    game_over: bool,
    best_score: u64,
    shots: u32,
    kills: u32,
    player_hits: u32,
    powerups: u32,
    cues_played: u32,
}

#[derive(Serialize)]
struct FrameDump<'a> {
    frame: u32,
    now: f64,
    score: u64,
    lives: i32,
    snapshot: &'a RenderSnapshot,
}

/// Lowest active target (closest to the gun line)
fn pick_target(snapshot: &RenderSnapshot) -> Option<Vec2> {
    snapshot
        .targets
        .iter()
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|t| t.pos)
}

fn run(cli: &Cli) -> Result<RunSummary> {
    if cli.width <= 0.0 || cli.height <= 0.0 {
        return Err(anyhow!(
            "viewport must be positive, got {}x{}",
            cli.width,
            cli.height
        ));
    }

    let mut settings = match &cli.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    if let Some(quality) = cli.quality {
        settings.quality = quality;
    }
    let best = cli.best.as_deref().map(BestScore::load).unwrap_or_default();

    let viewport = Viewport::new(cli.width, cli.height);
    let mut session = Session::new(cli.seed, &settings, best);
    let mut audio = AudioManager::new(LogSink);
    audio.apply_settings(&settings);
    log::info!(
        "Quality {} (max {} particles)",
        settings.quality.as_str(),
        settings.max_particles()
    );

    let mut summary = RunSummary {
        seed: cli.seed,
        ..Default::default()
    };
    let mut now = 0.0;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for _ in 0..cli.idle_frames {
        now += FRAME_MS;
        let frame = session.frame(now, viewport);
        audio.play_all(&frame.cues);
    }

    let start = session.start();
    audio.play_all(&start.cues);
    log::info!("Autopilot engaged ({}x{})", cli.width, cli.height);

    while session.is_playing() && summary.play_frames < cli.max_frames {
        now += FRAME_MS;
        summary.play_frames += 1;

        if cli.fire_every > 0 && summary.play_frames % cli.fire_every == 0 {
            if let Some(aim) = pick_target(&session.snapshot(now)) {
                session.set_pointer(aim);
                session.trigger_fire();
            }
        }

        let frame = session.frame(now, viewport);
        for event in &frame.events {
            match event {
                GameEvent::TargetDestroyed { .. } => summary.kills += 1,
                GameEvent::PlayerHit { .. } => summary.player_hits += 1,
                GameEvent::PowerupActivated => summary.powerups += 1,
            }
        }
        summary.shots += frame.cues.iter().filter(|&&c| c == SoundCue::Fire).count() as u32;
        summary.cues_played += frame.cues.len() as u32;
        audio.play_all(&frame.cues);

        if let Some(every) = cli.dump_every.filter(|&n| n > 0) {
            if summary.play_frames % every == 0 {
                let snapshot = session.snapshot(now);
                let dump = FrameDump {
                    frame: summary.play_frames,
                    now,
                    score: session.score(),
                    lives: session.lives(),
                    snapshot: &snapshot,
                };
                serde_json::to_writer(&mut out, &dump)?;
                writeln!(out)?;
            }
        }
    }

    summary.game_over = !session.is_playing();
    let exit = session.exit();
    audio.play_all(&exit.cues);
    summary.final_score = session.score();
    summary.lives_left = session.lives();
    summary.best_score = session.best().score;

    if let Some(path) = &cli.best {
        session
            .best()
            .save(path)
            .with_context(|| format!("saving best score for seed {}", cli.seed))?;
    }

    Ok(summary)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let summary = run(&cli)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
