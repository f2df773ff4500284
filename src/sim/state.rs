//! Game state and entity records
//!
//! `GameState` is the single mutable root of the simulation. It is created
//! once and re-initialized in place on restarts and level changes.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Bounded;
use super::pool::{EntityList, SoftDelete};
use super::story::StoryProgress;
use crate::consts::*;
use crate::locale::Language;
use crate::media::{AudioSink, Clip, VideoSink};

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Waiting for the player to pick a language
    LanguageSelect,
    /// Waiting for the player to pick a game mode
    StartMenu,
    /// A run is in progress (possibly paused or over)
    InGame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Endless arcade mode
    #[default]
    Competition,
    /// Scripted campaign with levels and a boss
    Story,
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub speed: f32,
    /// Set on frames where the auto-fire released a bullet
    pub is_shooting: bool,
    /// Frames between auto-fire shots
    pub shoot_cooldown: u64,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Self::spawn_point(),
            speed: PLAYER_SPEED,
            is_shooting: false,
            shoot_cooldown: PLAYER_FIRE_INTERVAL,
        }
    }
}

impl Player {
    pub fn spawn_point() -> Vec2 {
        Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y)
    }

    pub fn respawn(&mut self) {
        self.pos = Self::spawn_point();
    }

    /// Where this ship's bullets appear
    pub fn muzzle(&self) -> Vec2 {
        self.pos + Vec2::new(MUZZLE_OFFSET_X, 0.0)
    }
}

#[derive(Debug, Clone)]
pub struct PlayerBullet {
    pub pos: Vec2,
    /// Upward speed in pixels per tick
    pub speed: f32,
    pub active: bool,
}

impl PlayerBullet {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self { pos, speed, active: true }
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub speed_y: f32,
    pub active: bool,
    /// Each enemy fires at most once
    pub has_shot: bool,
}

impl Enemy {
    pub fn new(pos: Vec2, speed_y: f32) -> Self {
        Self {
            pos,
            speed_y,
            active: true,
            has_shot: false,
        }
    }

    pub fn muzzle(&self) -> Vec2 {
        self.pos + Vec2::new(MUZZLE_OFFSET_X, 0.0)
    }
}

#[derive(Debug, Clone)]
pub struct EnemyBullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub active: bool,
}

impl EnemyBullet {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel, active: true }
    }
}

/// Final encounter of the story campaign
#[derive(Debug, Clone, Default)]
pub struct Boss {
    pub pos: Vec2,
    pub vel: Vec2,
    pub active: bool,
    pub health: i32,
    pub shot_cooldown: u32,
    pub shot_counter: u32,
}

impl Boss {
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(BOSS_SPAWN_X, BOSS_SPAWN_Y),
            vel: Vec2::splat(BOSS_START_SPEED),
            active: true,
            health: BOSS_HEALTH,
            shot_cooldown: BOSS_SHOT_COOLDOWN,
            shot_counter: 0,
        }
    }
}

/// Extra-life pickup
#[derive(Debug, Clone, Default)]
pub struct PowerUp {
    pub pos: Vec2,
    pub active: bool,
    pub speed_y: f32,
}

macro_rules! entity_traits {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Bounded for $ty {
                fn position(&self) -> Vec2 {
                    self.pos
                }
            }

            impl SoftDelete for $ty {
                fn is_active(&self) -> bool {
                    self.active
                }

                fn deactivate(&mut self) {
                    self.active = false;
                }
            }
        )+
    };
}

entity_traits!(PlayerBullet, Enemy, EnemyBullet, Boss, PowerUp);

impl Bounded for Player {
    fn position(&self) -> Vec2 {
        self.pos
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,

    pub screen: Screen,
    pub mode: GameMode,
    pub language: Language,

    pub player: Player,
    pub player_bullets: EntityList<PlayerBullet>,
    pub enemies: EntityList<Enemy>,
    pub enemy_bullets: EntityList<EnemyBullet>,
    pub boss: Boss,
    pub is_boss_active: bool,
    pub power_up: PowerUp,
    /// Ticks since the power-up last respawned
    pub power_up_counter: u32,

    pub score: u32,
    pub lives: u8,
    /// Gameplay frames simulated so far; never reset
    pub frame_count: u64,
    /// Cosmetic background scroll
    pub bg_offset_y: f32,

    pub paused: bool,
    pub game_over: bool,
    pub game_completed: bool,
    /// A HUD button was hit this tick; cleared when a frame is composed
    pub clicked_button: bool,

    pub story: StoryProgress,
}

impl GameState {
    /// Fresh state sitting on the language screen
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            screen: Screen::LanguageSelect,
            mode: GameMode::Competition,
            language: Language::default(),
            player: Player::default(),
            player_bullets: EntityList::new(),
            enemies: EntityList::new(),
            enemy_bullets: EntityList::new(),
            boss: Boss::default(),
            is_boss_active: false,
            power_up: PowerUp::default(),
            power_up_counter: 0,
            score: 0,
            lives: MAX_LIVES,
            frame_count: 0,
            bg_offset_y: 0.0,
            paused: false,
            game_over: false,
            game_completed: false,
            clicked_button: false,
            story: StoryProgress::new(),
        }
    }

    /// Fresh state with the language already chosen, starting on the mode menu
    pub fn with_language(seed: u64, language: Language) -> Self {
        let mut state = Self::new(seed);
        state.language = language;
        state.screen = Screen::StartMenu;
        state
    }

    /// Reset the run: world, score, lives and flags. Starts the soundtrack
    /// and rewinds the cut-scene.
    pub fn initialize_game(&mut self, audio: &mut dyn AudioSink, video: &mut dyn VideoSink) {
        self.player.respawn();
        self.player.is_shooting = false;
        self.enemies.clear();
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.game_over = false;
        self.lives = MAX_LIVES;
        self.score = 0;
        self.bg_offset_y = 0.0;
        self.power_up = PowerUp::default();
        self.power_up_counter = 0;
        self.boss = Boss::default();
        self.is_boss_active = false;
        self.game_completed = false;
        self.paused = false;
        self.clicked_button = false;

        audio.pause(Clip::StartJingle);
        audio.replay(Clip::Music);
        video.rewind();

        log::info!("New {:?} run ({})", self.mode, self.language.code());
    }

    /// Clear the playfield between story levels
    pub fn initialize_level(&mut self) {
        self.enemies.clear();
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.score = 0;
    }

    /// Bring in the boss, clearing regular enemies and their shots
    pub fn activate_boss(&mut self) {
        self.enemies.clear();
        self.enemy_bullets.clear();
        self.boss = Boss::spawn();
        self.is_boss_active = true;
        log::info!("Boss activated with {} health", self.boss.health);
    }

    /// Player was hit: lose a life (never below zero)
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        log::debug!("Player hit, {} lives left", self.lives);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{HeadlessAudio, HeadlessVideo, Mixer};

    #[test]
    fn new_state_waits_for_language() {
        let state = GameState::new(1);
        assert_eq!(state.screen, Screen::LanguageSelect);
        assert_eq!(state.lives, MAX_LIVES);
        assert_eq!(state.player.pos, Vec2::new(320.0, 430.0));
        assert_eq!(state.player.speed, 4.0);
    }

    #[test]
    fn preselected_language_skips_to_menu() {
        let state = GameState::with_language(1, Language::Ukrainian);
        assert_eq!(state.screen, Screen::StartMenu);
        assert_eq!(state.language, Language::Ukrainian);
    }

    #[test]
    fn initialize_game_resets_in_place() {
        let mut state = GameState::new(3);
        let mut audio = HeadlessAudio::new(Mixer::default());
        let mut video = HeadlessVideo::new(10);

        state.score = 9;
        state.lives = 0;
        state.game_over = true;
        state.frame_count = 77;
        state.player.pos = Vec2::new(5.0, 5.0);
        state.enemies.spawn(Enemy::new(Vec2::ZERO, 3.0));
        state.activate_boss();

        state.initialize_game(&mut audio, &mut video);

        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert!(!state.game_over);
        assert!(!state.is_boss_active);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.pos, Player::spawn_point());
        // The frame counter keeps running across restarts
        assert_eq!(state.frame_count, 77);
        assert!(audio.is_playing(Clip::Music));
    }

    #[test]
    fn boss_activation_clears_enemies() {
        let mut state = GameState::new(3);
        state.enemies.spawn(Enemy::new(Vec2::ZERO, 3.0));
        state
            .enemy_bullets
            .spawn(EnemyBullet::new(Vec2::ZERO, Vec2::Y));
        state.player_bullets.spawn(PlayerBullet::new(Vec2::ZERO, 5.0));

        state.activate_boss();

        assert!(state.enemies.is_empty());
        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.player_bullets.len(), 1);
        assert_eq!(state.boss.health, BOSS_HEALTH);
        assert_eq!(state.boss.pos, Vec2::new(320.0, 50.0));
    }

    #[test]
    fn lives_never_underflow() {
        let mut state = GameState::new(3);
        for _ in 0..5 {
            state.lose_life();
        }
        assert_eq!(state.lives, 0);
    }
}
