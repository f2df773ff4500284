//! Frame snapshot for renderers
//!
//! `compose` turns the current state into a flat description of what to draw
//! this frame. It is the only place outside the tick that touches the state,
//! and only to consume the transient `clicked_button` flag.

use glam::Vec2;
use serde::Serialize;

use crate::locale::{self, Text};
use crate::sim::{GameMode, GameState, Screen, StoryChapter, StoryScreen};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Scene {
    LanguageSelect,
    StartMenu,
    /// Story cut-scene; the renderer shows the video sink's current frame
    Cutscene,
    /// Full-screen text between levels
    Banner,
    GameCompleted,
    GameOver,
    Gameplay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Backdrop {
    Competition,
    Chapter(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteKind {
    Player,
    PlayerBullet,
    Enemy,
    EnemyBullet,
    Boss,
    PowerUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub pos: Vec2,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameView {
    pub scene: Scene,
    /// Text lines, top to bottom
    pub lines: Vec<String>,
    pub backdrop: Option<Backdrop>,
    pub bg_offset_y: f32,
    /// Pause button shows the resume icon
    pub paused: bool,
    /// Highlight the pause button this frame
    pub button_highlight: bool,
    /// Draw order: player, bullets, enemies, enemy bullets, boss, power-up
    pub sprites: Vec<Sprite>,
}

impl FrameView {
    fn text(scene: Scene, lines: Vec<String>) -> Self {
        Self {
            scene,
            lines,
            backdrop: None,
            bg_offset_y: 0.0,
            paused: false,
            button_highlight: false,
            sprites: Vec::new(),
        }
    }

    /// Vertical offset of a looping background image of the given height
    pub fn backdrop_scroll(&self, image_height: u32) -> f32 {
        if image_height == 0 {
            return 0.0;
        }
        (self.bg_offset_y as i64).rem_euclid(image_height as i64) as f32
    }
}

fn chapter_number(chapter: StoryChapter) -> u32 {
    match chapter {
        StoryChapter::Chapter1 => 1,
    }
}

/// Build this frame's view, consuming the button highlight flag
pub fn compose(state: &mut GameState) -> FrameView {
    let lang = state.language;

    match state.screen {
        Screen::LanguageSelect => {
            let lines = vec![
                locale::tr(lang, Text::ChooseEnglish).to_string(),
                locale::tr(lang, Text::ChooseUkrainian).to_string(),
            ];
            return FrameView::text(Scene::LanguageSelect, lines);
        }
        Screen::StartMenu => {
            let lines = [Text::ChooseMode, Text::ModeCompetition, Text::ModeStory]
                .iter()
                .map(|t| locale::tr(lang, *t).to_string())
                .collect();
            return FrameView::text(Scene::StartMenu, lines);
        }
        Screen::InGame => {}
    }

    if state.mode == GameMode::Story {
        let level = state.story.level;
        match state.story.screen {
            StoryScreen::LevelIntro { .. } => {
                return FrameView::text(Scene::Banner, vec![locale::level_banner(lang, level.number())]);
            }
            StoryScreen::VideoIntro { .. } => {
                return FrameView::text(Scene::Cutscene, Vec::new());
            }
            StoryScreen::LevelComplete { .. } => {
                let follow_up = match level.next() {
                    Some(next) => locale::starting_level(lang, next.number()),
                    None => locale::tr(lang, Text::BossIncoming).to_string(),
                };
                let lines = vec![locale::level_completed(lang, level.number()), follow_up];
                return FrameView::text(Scene::Banner, lines);
            }
            _ => {}
        }
        if state.game_completed || state.story.is_completed() {
            let lines = vec![locale::tr(lang, Text::GameCompleted).to_string()];
            return FrameView::text(Scene::GameCompleted, lines);
        }
    }

    let backdrop = match state.mode {
        GameMode::Competition => Backdrop::Competition,
        GameMode::Story => Backdrop::Chapter(chapter_number(state.story.chapter)),
    };
    let button_highlight = std::mem::take(&mut state.clicked_button);

    let mut view = FrameView {
        scene: Scene::Gameplay,
        lines: Vec::new(),
        backdrop: Some(backdrop),
        bg_offset_y: state.bg_offset_y,
        paused: state.paused,
        button_highlight,
        sprites: Vec::new(),
    };

    if state.game_over {
        view.scene = Scene::GameOver;
        view.lines.push(locale::tr(lang, Text::GameOver).to_string());
        return view;
    }

    let sprite = |kind, pos| Sprite { kind, pos };
    view.sprites.push(sprite(SpriteKind::Player, state.player.pos));
    view.sprites.extend(state.player_bullets.active().map(|b| sprite(SpriteKind::PlayerBullet, b.pos)));
    view.sprites.extend(state.enemies.active().map(|e| sprite(SpriteKind::Enemy, e.pos)));
    view.sprites.extend(state.enemy_bullets.active().map(|b| sprite(SpriteKind::EnemyBullet, b.pos)));
    if state.is_boss_active && state.boss.active {
        view.sprites.push(sprite(SpriteKind::Boss, state.boss.pos));
    }
    if state.power_up.active {
        view.sprites.push(sprite(SpriteKind::PowerUp, state.power_up.pos));
    }

    view.lines.push(locale::hud(lang, state.score, state.lives));
    view
}
