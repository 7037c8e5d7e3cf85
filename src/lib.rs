// Library exports for the game binary and tests
pub use app::App;
pub use collision::{CollisionReport, check_collisions};
pub use config::{ConfigError, GameConfig, SoundConfig};
pub use entities::{
    Bullet, Enemy, GameState, Lifecycle, Player, Powerup, PowerupKind, fire_pattern,
};
pub use geometry::{Rect, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use input::Controls;
pub use sprites::SpriteKind;
pub use world::{Group, Sprite, SpriteId, World};

pub mod app;
pub mod audio;
pub mod collision;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod sprites;
pub mod world;
