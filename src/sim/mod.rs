//! Simulation module
//!
//! All gameplay logic lives here, with no rendering or platform dependencies:
//! - Fixed tick only; every timer counts frames
//! - A single seeded RNG owned by the state
//! - Media is reached through the `AudioSink`/`VideoSink` traits

pub mod collision;
pub mod pool;
pub mod state;
pub mod story;
pub mod tick;

pub use collision::{Aabb, Bounded, collides};
pub use pool::{EntityList, SoftDelete};
pub use state::{
    Boss, Enemy, EnemyBullet, GameMode, GameState, Player, PlayerBullet, PowerUp, Screen,
};
pub use story::{Flow, StoryChapter, StoryLevel, StoryProgress, StoryScreen};
pub use tick::{Media, TickInput, menu_button, pause_button, tick};
