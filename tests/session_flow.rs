use neon_strike::sim::{
    FrameInput, GameEvent, GameMode, Outbox, RenderSnapshot, SimState, SoundCue, TargetKind,
    Viewport, fire, spawn_target, tick,
};
use neon_strike::audio::{AudioManager, RecordingSink};
use neon_strike::{BestScore, Session, Settings, palette};

const VIEW: Viewport = Viewport {
    width: 900.0,
    height: 800.0,
};

#[test]
fn bomb_in_middle_lane_takes_two_shots() {
    let mut state = SimState::new(2024);
    let id = state.next_entity_id();
    let mut bomb = spawn_target(id, VIEW.width, 1, TargetKind::Bomb);
    bomb.pos.y = 300.0;
    let center = bomb.pos;
    state.targets.push(bomb);

    let mut out = Outbox::default();
    let first = fire(&mut state, VIEW.gun(), center, 0.0, &mut out);
    assert_eq!(first.damage_applied, 1);
    assert!(!first.destroyed);
    assert_eq!(state.targets[0].health, 1);
    assert!(state.targets[0].active);
    assert!(!out.events.contains(&GameEvent::TargetDestroyed { points: 100 }));
    assert!(out.cues.contains(&SoundCue::MetallicHit));
    assert!(state.particles.iter().all(|p| p.color == palette::SPARK));

    let mut out = Outbox::default();
    let second = fire(&mut state, VIEW.gun(), center, 100.0, &mut out);
    assert!(second.destroyed);
    assert!(!state.targets[0].active);
    assert_eq!(out.events, vec![GameEvent::TargetDestroyed { points: 100 }]);
    assert_eq!(
        state
            .particles
            .iter()
            .filter(|p| p.color == palette::DANGER)
            .count(),
        40
    );
}

#[test]
fn missed_targets_end_the_game() {
    let mut session = Session::new(3, &Settings::default(), BestScore::new());
    let mut audio = AudioManager::new(RecordingSink::default());
    audio.play_all(&session.start().cues);

    let mut now = 0.0;
    let mut hits = 0;
    while session.is_playing() {
        now += 1000.0 / 60.0;
        let out = session.frame(now, VIEW);
        audio.play_all(&out.cues);
        hits += out
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::PlayerHit { .. }))
            .count();
        assert!(now < 120_000.0, "game should end without any shots fired");
    }
    // Score 0 keeps the whole run on normal targets: one life per miss
    assert_eq!(hits, 3);
    assert_eq!(session.score(), 0);
    assert_eq!(session.best().score, 0);

    let played: Vec<SoundCue> = audio.sink().played.iter().map(|&(cue, _)| cue).collect();
    assert_eq!(played[..2], [SoundCue::MusicStart, SoundCue::UiClick]);
    assert_eq!(played.last(), Some(&SoundCue::MusicStop));
    // Game over already stopped the music, so quitting adds nothing
    assert!(session.exit().is_empty());
}

#[test]
fn render_snapshot_serializes() {
    let mut state = SimState::new(8);
    let input = FrameInput {
        mode: GameMode::Playing,
        ..Default::default()
    };
    for frame in 1..=200 {
        tick(&mut state, &input, frame as f64 * 16.0, VIEW);
    }
    let snapshot = state.snapshot(3200.0);
    assert!(!snapshot.targets.is_empty());
    let json = serde_json::to_string(&snapshot).expect("serialize");
    let back: RenderSnapshot = serde_json::from_str(&json).expect("parse");
    assert_eq!(back.targets.len(), snapshot.targets.len());
    assert_eq!(back.powered, snapshot.powered);
    assert!(json.contains("\"kind\":\"Normal\""));
}
