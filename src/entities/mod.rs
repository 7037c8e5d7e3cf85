mod bullet;
mod enemy;
mod player;
mod powerup;

// Re-export all public types
pub use bullet::{BULLET_SPEED, Bullet};
pub use enemy::Enemy;
pub use player::{
    BOTTOM_MARGIN, HIDE_FRAMES, MAX_SHIELD, PLAYER_SPEED, POWERUP_FRAMES, Player, STARTING_LIVES,
    TWIN_SHOT_OFFSET, fire_pattern,
};
pub use powerup::{POWERUP_SPEED, Powerup, PowerupKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Paused,
    GameOver,
}

/// What a sprite wants after its per-frame update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Alive,
    Kill,
}
