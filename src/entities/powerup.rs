use rand::Rng;
use std::fmt;

use super::Lifecycle;
use crate::geometry::{Rect, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sprites::SpriteKind;

pub const POWERUP_SPEED: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupKind {
    Shield,
    Power,
}

impl PowerupKind {
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.random_bool(0.5) {
            PowerupKind::Shield
        } else {
            PowerupKind::Power
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupKind::Shield => "shield",
            PowerupKind::Power => "power",
        }
    }

    pub fn get_char(&self) -> char {
        match self {
            PowerupKind::Shield => 'S',
            PowerupKind::Power => 'P',
        }
    }
}

impl fmt::Display for PowerupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Powerup {
    pub rect: Rect,
    pub speedy: i32,
    pub kind: PowerupKind,
}

impl Powerup {
    /// Drops in at a random column, just above the top edge
    pub fn spawn(rng: &mut impl Rng) -> Self {
        let (width, height) = SpriteKind::Powerup.size();
        let x = rng.random_range(0..=SCREEN_WIDTH - width);

        Self {
            rect: Rect::new(x, -height, width, height),
            speedy: POWERUP_SPEED,
            kind: PowerupKind::random(rng),
        }
    }

    pub fn update(&mut self) -> Lifecycle {
        self.rect.y += self.speedy;

        if self.rect.top() > SCREEN_HEIGHT {
            Lifecycle::Kill
        } else {
            Lifecycle::Alive
        }
    }
}
