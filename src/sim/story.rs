//! Story campaign sequencing
//!
//! Each level runs through a fixed chain of screens:
//!
//! ```text
//! VideoIntro -> LevelIntro -> Playing -> LevelComplete -> (next level's LevelIntro | BossFight)
//! BossFight -> Completed
//! ```
//!
//! The timed screens count down `SCREEN_TIMER_TICKS`. Gameplay only runs
//! while `Playing` or `BossFight`.

use super::state::GameState;
use crate::consts::SCREEN_TIMER_TICKS;
use crate::media::VideoSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoryChapter {
    #[default]
    Chapter1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoryLevel {
    #[default]
    Level1,
    Level2,
    Level3,
}

impl StoryLevel {
    /// 1-based number shown to the player
    pub fn number(&self) -> u32 {
        match self {
            StoryLevel::Level1 => 1,
            StoryLevel::Level2 => 2,
            StoryLevel::Level3 => 3,
        }
    }

    /// Score that ends the level
    pub fn score_target(&self) -> u32 {
        match self {
            StoryLevel::Level1 => 1,
            StoryLevel::Level2 => 2,
            StoryLevel::Level3 => 2,
        }
    }

    /// Following level in the chapter; `None` on the boss level
    pub fn next(&self) -> Option<StoryLevel> {
        match self {
            StoryLevel::Level1 => Some(StoryLevel::Level2),
            StoryLevel::Level2 => Some(StoryLevel::Level3),
            StoryLevel::Level3 => None,
        }
    }
}

/// Current story screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryScreen {
    /// Chapter cut-scene; ends when the video stops or the timer runs out
    VideoIntro { ticks_left: u32, started: bool },
    /// "Level N" banner
    LevelIntro { ticks_left: u32 },
    Playing,
    /// "Level N completed" banner
    LevelComplete { ticks_left: u32 },
    /// Final level cleared; the boss is on the field
    BossFight,
    /// Boss defeated, nothing more to simulate
    Completed,
}

/// Whether the rest of the tick should run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Halt,
}

#[derive(Debug, Clone)]
pub struct StoryProgress {
    pub chapter: StoryChapter,
    pub level: StoryLevel,
    pub screen: StoryScreen,
}

impl Default for StoryProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl StoryProgress {
    /// Start of the campaign: chapter 1, level 1, cut-scene first
    pub fn new() -> Self {
        Self {
            chapter: StoryChapter::Chapter1,
            level: StoryLevel::Level1,
            screen: StoryScreen::VideoIntro {
                ticks_left: SCREEN_TIMER_TICKS,
                started: false,
            },
        }
    }

    pub fn show_video_screen(&self) -> bool {
        matches!(self.screen, StoryScreen::VideoIntro { .. })
    }

    pub fn show_level_screen(&self) -> bool {
        matches!(self.screen, StoryScreen::LevelIntro { .. })
    }

    pub fn show_level_completed(&self) -> bool {
        matches!(self.screen, StoryScreen::LevelComplete { .. })
    }

    pub fn is_completed(&self) -> bool {
        self.screen == StoryScreen::Completed
    }

    /// Replay the current level from its banner after a game over
    pub fn restart_level(&mut self) {
        self.screen = StoryScreen::LevelIntro {
            ticks_left: SCREEN_TIMER_TICKS,
        };
    }
}

/// Advance the story sequencer by one tick
pub fn advance(state: &mut GameState, video: &mut dyn VideoSink) -> Flow {
    use StoryScreen::*;

    let level = state.story.level;
    let (screen, flow) = match state.story.screen {
        VideoIntro { started: false, .. } => {
            video.play();
            let screen = VideoIntro {
                ticks_left: SCREEN_TIMER_TICKS,
                started: true,
            };
            (screen, Flow::Halt)
        }
        VideoIntro { ticks_left, started: true } => {
            let ticks_left = ticks_left.saturating_sub(1);
            if !video.is_playing() || ticks_left == 0 {
                video.pause();
                log::info!("Level {} intro", level.number());
                (LevelIntro { ticks_left: SCREEN_TIMER_TICKS }, Flow::Halt)
            } else {
                (VideoIntro { ticks_left, started: true }, Flow::Halt)
            }
        }
        LevelIntro { ticks_left } => {
            let ticks_left = ticks_left.saturating_sub(1);
            if ticks_left == 0 {
                (Playing, Flow::Halt)
            } else {
                (LevelIntro { ticks_left }, Flow::Halt)
            }
        }
        Playing => {
            if state.score >= level.score_target() {
                log::info!("Level {} completed with score {}", level.number(), state.score);
                (LevelComplete { ticks_left: SCREEN_TIMER_TICKS }, Flow::Halt)
            } else {
                (Playing, Flow::Continue)
            }
        }
        LevelComplete { ticks_left } => {
            let ticks_left = ticks_left.saturating_sub(1);
            if ticks_left > 0 {
                (LevelComplete { ticks_left }, Flow::Halt)
            } else if let Some(next) = level.next() {
                state.story.level = next;
                state.initialize_level();
                log::info!("Level {} intro", next.number());
                (LevelIntro { ticks_left: SCREEN_TIMER_TICKS }, Flow::Halt)
            } else {
                state.activate_boss();
                (BossFight, Flow::Continue)
            }
        }
        BossFight => {
            if state.game_completed {
                log::info!("Story completed");
                (Completed, Flow::Halt)
            } else {
                (BossFight, Flow::Continue)
            }
        }
        Completed => (Completed, Flow::Halt),
    };

    state.story.screen = screen;
    flow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::HeadlessVideo;
    use crate::sim::state::{Enemy, EnemyBullet, PlayerBullet};
    use glam::Vec2;

    fn story_state() -> GameState {
        let mut state = GameState::new(5);
        state.mode = crate::sim::GameMode::Story;
        state
    }

    #[test]
    fn video_ends_early_when_clip_stops() {
        let mut state = story_state();
        let mut video = HeadlessVideo::new(10);

        assert_eq!(advance(&mut state, &mut video), Flow::Halt);
        assert!(video.is_playing());

        let mut ticks = 0;
        while state.story.show_video_screen() {
            video.advance();
            assert_eq!(advance(&mut state, &mut video), Flow::Halt);
            ticks += 1;
        }
        assert_eq!(ticks, 10);
        assert!(state.story.show_level_screen());
    }

    #[test]
    fn video_is_cut_when_timer_expires() {
        let mut state = story_state();
        let mut video = HeadlessVideo::new(10_000);

        advance(&mut state, &mut video);
        for _ in 0..SCREEN_TIMER_TICKS {
            video.advance();
            advance(&mut state, &mut video);
        }
        assert!(state.story.show_level_screen());
        assert!(!video.is_playing());
    }

    #[test]
    fn level_intro_counts_down_into_play() {
        let mut state = story_state();
        let mut video = HeadlessVideo::new(1);
        state.story.screen = StoryScreen::LevelIntro { ticks_left: SCREEN_TIMER_TICKS };

        for _ in 0..SCREEN_TIMER_TICKS - 1 {
            assert_eq!(advance(&mut state, &mut video), Flow::Halt);
            assert!(state.story.show_level_screen());
        }
        assert_eq!(advance(&mut state, &mut video), Flow::Halt);
        assert_eq!(state.story.screen, StoryScreen::Playing);
        assert_eq!(advance(&mut state, &mut video), Flow::Continue);
    }

    #[test]
    fn reaching_target_score_completes_level() {
        let mut state = story_state();
        let mut video = HeadlessVideo::new(1);
        state.story.screen = StoryScreen::Playing;
        state.score = 1;

        advance(&mut state, &mut video);
        assert!(state.story.show_level_completed());
    }

    #[test]
    fn level_two_needs_two_points() {
        let mut state = story_state();
        let mut video = HeadlessVideo::new(1);
        state.story.level = StoryLevel::Level2;
        state.story.screen = StoryScreen::Playing;
        state.score = 1;

        assert_eq!(advance(&mut state, &mut video), Flow::Continue);
        state.score = 2;
        advance(&mut state, &mut video);
        assert!(state.story.show_level_completed());
    }

    #[test]
    fn completed_level_advances_and_clears_field() {
        let mut state = story_state();
        let mut video = HeadlessVideo::new(1);
        state.story.screen = StoryScreen::LevelComplete { ticks_left: 1 };
        state.score = 1;
        state.enemies.spawn(Enemy::new(Vec2::ZERO, 3.0));
        state.player_bullets.spawn(PlayerBullet::new(Vec2::ZERO, 5.0));
        state.enemy_bullets.spawn(EnemyBullet::new(Vec2::ZERO, Vec2::Y));

        advance(&mut state, &mut video);

        assert_eq!(state.story.level, StoryLevel::Level2);
        assert!(state.story.show_level_screen());
        assert_eq!(state.score, 0);
        assert!(state.enemies.is_empty());
        assert!(state.player_bullets.is_empty());
        assert!(state.enemy_bullets.is_empty());
    }

    #[test]
    fn final_level_brings_in_boss() {
        let mut state = story_state();
        let mut video = HeadlessVideo::new(1);
        state.story.level = StoryLevel::Level3;
        state.story.screen = StoryScreen::LevelComplete { ticks_left: 1 };

        assert_eq!(advance(&mut state, &mut video), Flow::Continue);
        assert_eq!(state.story.screen, StoryScreen::BossFight);
        assert!(state.is_boss_active);
        assert!(state.boss.active);
    }

    #[test]
    fn restart_level_keeps_level_and_shows_banner() {
        let mut progress = StoryProgress::new();
        progress.level = StoryLevel::Level3;
        progress.screen = StoryScreen::BossFight;

        progress.restart_level();

        assert_eq!(progress.level, StoryLevel::Level3);
        assert_eq!(
            progress.screen,
            StoryScreen::LevelIntro { ticks_left: SCREEN_TIMER_TICKS }
        );
    }

    #[test]
    fn boss_defeat_halts_story() {
        let mut state = story_state();
        let mut video = HeadlessVideo::new(1);
        state.story.screen = StoryScreen::BossFight;
        state.game_completed = true;

        assert_eq!(advance(&mut state, &mut video), Flow::Halt);
        assert!(state.story.is_completed());
        assert_eq!(advance(&mut state, &mut video), Flow::Halt);
    }
}
