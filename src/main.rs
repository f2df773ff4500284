//! Ghost of Kyiv entry point
//!
//! Runs the simulation headless in attract mode: an autopilot picks the
//! language and mode, then flies the ship toward the nearest target.
//!
//! Usage: `ghost-of-kyiv [settings.json] [ticks] [--story]`

use std::time::{SystemTime, UNIX_EPOCH};

use ghost_of_kyiv::consts::*;
use ghost_of_kyiv::media::{HeadlessAudio, HeadlessVideo, Mixer};
use ghost_of_kyiv::sim::{GameMode, GameState, Media, Screen, SoftDelete, TickInput, tick};
use ghost_of_kyiv::{Language, Settings, view};

const DEFAULT_SETTINGS_PATH: &str = "ghost_of_kyiv.json";
const DEFAULT_TICKS: u64 = 60 * TICKS_PER_SECOND as u64;
/// Running time of the chapter cut-scene
const CUTSCENE_TICKS: u32 = 150;

struct Options {
    settings_path: String,
    ticks: u64,
    story: bool,
}

fn parse_args() -> Options {
    let mut options = Options {
        settings_path: DEFAULT_SETTINGS_PATH.to_string(),
        ticks: DEFAULT_TICKS,
        story: false,
    };
    for arg in std::env::args().skip(1) {
        if arg == "--story" {
            options.story = true;
        } else if let Ok(ticks) = arg.parse::<u64>() {
            options.ticks = ticks;
        } else {
            options.settings_path = arg;
        }
    }
    options
}

/// Input the autopilot would press this tick
fn autopilot(state: &GameState, language: Language, story: bool) -> TickInput {
    let mut input = TickInput::default();
    match state.screen {
        Screen::LanguageSelect => {
            input.choose_english = language == Language::English;
            input.choose_ukrainian = language == Language::Ukrainian;
        }
        Screen::StartMenu => {
            input.choose_competition = !story;
            input.choose_story = story;
        }
        Screen::InGame => {
            let target = if state.is_boss_active && state.boss.is_active() {
                Some(state.boss.pos)
            } else {
                state
                    .enemies
                    .active()
                    .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                    .map(|e| e.pos)
            };
            if let Some(target) = target {
                let dx = target.x - state.player.pos.x;
                input.left = dx < -state.player.speed;
                input.right = dx > state.player.speed;
            }
            // Hug the bottom edge unless a shot is close
            let danger = state
                .enemy_bullets
                .active()
                .any(|b| b.pos.distance(state.player.pos) < 3.0 * HITBOX_SIZE);
            input.up = danger && state.player.pos.y > SCREEN_HEIGHT / 2.0;
            input.down = !danger;
        }
    }
    input
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    let options = parse_args();
    let settings = Settings::load_or_default(&options.settings_path);

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    let mut state = match settings.language {
        Some(language) => GameState::with_language(seed, language),
        None => GameState::new(seed),
    };
    let language = settings.language.unwrap_or_default();

    let mut audio = HeadlessAudio::new(Mixer::from_settings(&settings));
    let mut video = HeadlessVideo::new(CUTSCENE_TICKS);

    log::info!(
        "Ghost of Kyiv (headless) starting: seed {}, {} ticks, {:?} mode",
        seed,
        options.ticks,
        if options.story { GameMode::Story } else { GameMode::Competition }
    );

    let mut frame = view::compose(&mut state);
    for n in 0..options.ticks {
        let input = autopilot(&state, language, options.story);
        tick(
            &mut state,
            &input,
            &mut Media {
                audio: &mut audio,
                video: &mut video,
            },
        );
        audio.advance();
        video.advance();
        frame = view::compose(&mut state);

        if n % (10 * TICKS_PER_SECOND as u64) == 0 {
            log::info!("tick {}: score {}, lives {}", n, state.score, state.lives);
        }
        if state.game_over || state.story.is_completed() {
            break;
        }
    }

    log::info!(
        "Finished after {} frames: score {}, lives {}{}",
        state.frame_count,
        state.score,
        state.lives,
        if state.game_completed { ", story completed" } else { "" }
    );
    match serde_json::to_string_pretty(&frame) {
        Ok(json) => log::debug!("Final frame:\n{}", json),
        Err(e) => log::warn!("Could not serialize final frame: {}", e),
    }
    println!("{}", frame.lines.join("\n"));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Headless driver is native only
}
