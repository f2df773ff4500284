//! Fixed timestep simulation tick
//!
//! One call to [`tick`] advances the game by one frame. Checks run in
//! priority order and each may end the tick early: language screen, start
//! menu, story sequencing, HUD buttons, pause, game over, then gameplay.

use glam::Vec2;
use rand::Rng;

use super::collision::{Aabb, collides};
use super::pool::SoftDelete;
use super::state::{Enemy, EnemyBullet, GameMode, GameState, PlayerBullet, Screen};
use super::story::{self, Flow};
use crate::clamp_to_screen;
use crate::consts::*;
use crate::locale::Language;
use crate::media::{AudioSink, Clip, VideoSink};

/// Input state polled for a single tick.
///
/// Keys are level-triggered: a held key acts on every tick it is down.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// E on the language screen
    pub choose_english: bool,
    /// U on the language screen
    pub choose_ukrainian: bool,
    /// 1 on the start menu
    pub choose_competition: bool,
    /// 2 on the start menu
    pub choose_story: bool,
    /// Enter on the game over screen
    pub restart: bool,
    /// Escape on the game over screen
    pub exit_to_menu: bool,
    /// Left mouse button held
    pub mouse_down: bool,
    /// Cursor in screen coordinates
    pub cursor: Vec2,
}

/// Media collaborators driven by the tick
pub struct Media<'a> {
    pub audio: &'a mut dyn AudioSink,
    pub video: &'a mut dyn VideoSink,
}

/// Screen-space rectangle of the pause/resume button
pub fn pause_button() -> Aabb {
    Aabb::new(Vec2::new(PAUSE_BUTTON_X, BUTTON_Y), Vec2::splat(BUTTON_SIZE))
}

/// Screen-space rectangle of the back-to-menu button
pub fn menu_button() -> Aabb {
    Aabb::new(Vec2::new(MENU_BUTTON_X, BUTTON_Y), Vec2::splat(BUTTON_SIZE))
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput, media: &mut Media<'_>) {
    match state.screen {
        Screen::LanguageSelect => {
            select_language(state, input);
            return;
        }
        Screen::StartMenu => {
            select_mode(state, input, media);
            return;
        }
        Screen::InGame => {}
    }

    if state.mode == GameMode::Story && story::advance(state, media.video) == Flow::Halt {
        return;
    }

    if handle_buttons(state, input) == Flow::Halt {
        return;
    }

    if state.paused {
        return;
    }

    if state.lives == 0 && !state.game_over {
        state.game_over = true;
        log::info!("Game over with score {}", state.score);
    }

    if state.game_over {
        if input.restart {
            state.initialize_game(media.audio, media.video);
            if state.mode == GameMode::Story {
                // The boss is gone after a reset, so replay the level that leads to it
                state.story.restart_level();
                log::info!("Restarting level {}", state.story.level.number());
            }
        } else if input.exit_to_menu {
            state.screen = Screen::StartMenu;
        }
        return;
    }

    step_gameplay(state, input, media.audio);
}

fn select_language(state: &mut GameState, input: &TickInput) {
    let language = if input.choose_english {
        Language::English
    } else if input.choose_ukrainian {
        Language::Ukrainian
    } else {
        return;
    };
    state.language = language;
    state.screen = Screen::StartMenu;
    log::info!("Language set to {}", language.code());
}

fn select_mode(state: &mut GameState, input: &TickInput, media: &mut Media<'_>) {
    let mode = if input.choose_competition {
        GameMode::Competition
    } else if input.choose_story {
        GameMode::Story
    } else {
        // Keep the menu jingle looping while we wait
        if !media.audio.is_playing(Clip::StartJingle) {
            media.audio.replay(Clip::StartJingle);
        }
        return;
    };

    state.mode = mode;
    state.screen = Screen::InGame;
    if mode == GameMode::Story {
        state.story = story::StoryProgress::new();
        state.initialize_level();
    }
    state.initialize_game(media.audio, media.video);
}

/// HUD buttons. Returns `Halt` when the player left for the menu.
fn handle_buttons(state: &mut GameState, input: &TickInput) -> Flow {
    if !input.mouse_down {
        return Flow::Continue;
    }

    if pause_button().contains_point(input.cursor) {
        state.paused = !state.paused;
        state.clicked_button = true;
        log::debug!("Paused: {}", state.paused);
    }

    if menu_button().contains_point(input.cursor) {
        state.clicked_button = true;
        state.screen = Screen::StartMenu;
        log::info!("Back to start menu");
        return Flow::Halt;
    }

    Flow::Continue
}

/// Unit vector from `from` towards `to`, or `None` when they coincide
fn aim(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let distance = delta.length();
    if distance == 0.0 {
        None
    } else {
        Some(delta / distance)
    }
}

fn step_gameplay(state: &mut GameState, input: &TickInput, audio: &mut dyn AudioSink) {
    move_player(state, input);
    fire_player_bullet(state);
    advance_player_bullets(state);
    state.frame_count += 1;

    update_enemies(state, audio);
    spawn_enemy(state);
    for enemy in state.enemies.active_mut() {
        enemy.pos = clamp_to_screen(enemy.pos);
    }

    advance_enemy_bullets(state);
    enemies_fire(state);

    if update_boss(state, audio) == Flow::Halt {
        return;
    }

    update_power_up(state);

    state.bg_offset_y += BACKGROUND_SCROLL_SPEED;

    // Loop the soundtrack
    if !audio.is_playing(Clip::Music) {
        audio.replay(Clip::Music);
    }
}

fn move_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    let mut dir = Vec2::ZERO;
    if input.left {
        dir.x -= 1.0;
    }
    if input.right {
        dir.x += 1.0;
    }
    if input.up {
        dir.y -= 1.0;
    }
    if input.down {
        dir.y += 1.0;
    }
    player.pos = clamp_to_screen(player.pos + dir * player.speed);
}

fn fire_player_bullet(state: &mut GameState) {
    let player = &mut state.player;
    // A zero cooldown disables auto-fire
    player.is_shooting = state.frame_count.checked_rem(player.shoot_cooldown) == Some(0);
    if player.is_shooting {
        state
            .player_bullets
            .spawn(PlayerBullet::new(player.muzzle(), PLAYER_BULLET_SPEED));
    }
}

fn advance_player_bullets(state: &mut GameState) {
    for bullet in state.player_bullets.active_mut() {
        bullet.pos.y -= bullet.speed;
        // Straight up: once past the top edge it can never come back
        if bullet.pos.y + HITBOX_SIZE < 0.0 {
            bullet.deactivate();
        }
    }
}

/// Move enemies, resolve bullet hits and player contact
fn update_enemies(state: &mut GameState, audio: &mut dyn AudioSink) {
    let mut enemies = std::mem::take(&mut state.enemies);
    for enemy in enemies.active_mut() {
        enemy.pos.y += enemy.speed_y;
        if enemy.pos.y > SCREEN_HEIGHT - HITBOX_SIZE {
            enemy.deactivate();
        }

        if enemy.active {
            for bullet in state.player_bullets.active_mut() {
                if collides(&*enemy, &*bullet) {
                    enemy.deactivate();
                    bullet.deactivate();
                    state.score += 1;
                    audio.replay(Clip::Hit);
                    break;
                }
            }
        }

        // Contact is judged on the enemy as it entered this tick, so a ship
        // shot or leaving the screen on this frame can still ram the player
        if collides(&*enemy, &state.player) {
            state.lose_life();
            state.player.respawn();
        }
    }
    state.enemies = enemies;
}

fn spawn_enemy(state: &mut GameState) {
    if !state.rng.random_ratio(1, ENEMY_SPAWN_ODDS) {
        return;
    }
    let x = state.rng.random_range(0.0..SCREEN_WIDTH);
    let speed = state.rng.random_range(ENEMY_SPEED_MIN..ENEMY_SPEED_MAX);
    state.enemies.spawn(Enemy::new(Vec2::new(x, 0.0), speed));
    log::debug!("Enemy spawned at x={:.0} speed={:.2}", x, speed);
}

fn advance_enemy_bullets(state: &mut GameState) {
    let mut bullets = std::mem::take(&mut state.enemy_bullets);
    for bullet in bullets.active_mut() {
        bullet.pos += bullet.vel;

        if collides(&state.player, &*bullet) {
            state.lose_life();
            bullet.deactivate();
            continue;
        }

        // Constant velocity: a bullet that left the screen stays gone
        let b = bullet.pos;
        if b.x + HITBOX_SIZE < 0.0 || b.x > SCREEN_WIDTH || b.y + HITBOX_SIZE < 0.0 || b.y > SCREEN_HEIGHT {
            bullet.deactivate();
        }
    }
    state.enemy_bullets = bullets;
}

/// Each enemy gets one chance per tick to fire its single aimed shot
fn enemies_fire(state: &mut GameState) {
    let target = state.player.pos;
    for enemy in state.enemies.active_mut() {
        if enemy.has_shot || !state.rng.random_ratio(ENEMY_SHOT_PERCENT, 100) {
            continue;
        }
        if let Some(dir) = aim(enemy.pos, target) {
            state
                .enemy_bullets
                .spawn(EnemyBullet::new(enemy.muzzle(), dir * ENEMY_BULLET_SPEED));
            enemy.has_shot = true;
        }
    }
}

/// Boss movement, shooting and damage. Returns `Halt` on the killing blow.
fn update_boss(state: &mut GameState, audio: &mut dyn AudioSink) -> Flow {
    if !state.is_boss_active {
        return Flow::Continue;
    }

    let boss = &mut state.boss;
    if state.frame_count % BOSS_TURN_INTERVAL == 0 {
        boss.vel = Vec2::new(
            state.rng.random_range(-BOSS_MAX_SPEED..BOSS_MAX_SPEED),
            state.rng.random_range(-BOSS_MAX_SPEED..BOSS_MAX_SPEED),
        );
        log::debug!("Boss heading {:?}", boss.vel);
    }
    boss.pos = clamp_to_screen(boss.pos + boss.vel);

    boss.shot_counter += 1;
    if boss.shot_counter >= boss.shot_cooldown {
        if let Some(dir) = aim(boss.pos, state.player.pos) {
            state
                .enemy_bullets
                .spawn(EnemyBullet::new(boss.pos, dir * BOSS_BULLET_SPEED));
            boss.shot_counter = 0;
        }
    }

    for bullet in state.player_bullets.active_mut() {
        if !collides(&state.boss, &*bullet) {
            continue;
        }
        state.boss.health -= 1;
        bullet.deactivate();
        audio.replay(Clip::Hit);

        if state.boss.health <= 0 {
            state.boss.deactivate();
            state.is_boss_active = false;
            state.game_completed = true;
            log::info!("Boss defeated");
            return Flow::Halt;
        }
    }

    Flow::Continue
}

fn update_power_up(state: &mut GameState) {
    state.power_up_counter += 1;
    if state.power_up_counter >= POWER_UP_RESPAWN_TICKS {
        state.power_up.pos = Vec2::new(
            state.rng.random_range(0.0..SCREEN_WIDTH),
            state.rng.random_range(0.0..SCREEN_HEIGHT),
        );
        state.power_up.active = true;
        state.power_up_counter = 0;
        log::debug!("Power-up respawned at {:?}", state.power_up.pos);
    }

    let power_up = &mut state.power_up;
    power_up.speed_y = POWER_UP_FALL_SPEED;
    if !power_up.active {
        return;
    }

    power_up.pos.y += power_up.speed_y;
    if collides(&state.player, &*power_up) {
        if state.lives < MAX_LIVES {
            state.lives += 1;
            log::debug!("Extra life, {} lives", state.lives);
        }
        power_up.deactivate();
    }
    if power_up.pos.y > SCREEN_HEIGHT - HITBOX_SIZE {
        power_up.deactivate();
    }
}
