use super::bullet::Bullet;
use crate::geometry::{Rect, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::Controls;
use crate::sprites::SpriteKind;
use crate::world::{Group, Sprite, SpriteId, World};

pub const PLAYER_SPEED: i32 = 8;
pub const BOTTOM_MARGIN: i32 = 10;
pub const MAX_SHIELD: i32 = 100;
pub const STARTING_LIVES: u32 = 3;
/// Frames a boosted power level lasts before dropping one tier
pub const POWERUP_FRAMES: u32 = 300;
/// Frames the ship stays off the field after losing a life
pub const HIDE_FRAMES: u32 = 60;
/// Horizontal distance of each twin-shot bullet from the ship's center
pub const TWIN_SHOT_OFFSET: i32 = 20;

/// Bullet spawn points for a power level, relative to the ship's top-center
pub fn fire_pattern(power_level: u32) -> &'static [i32] {
    match power_level {
        0 | 1 => &[0],
        // Flat above tier 2
        _ => &[-TWIN_SHOT_OFFSET, TWIN_SHOT_OFFSET],
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub speedx: i32,
    pub speedy: i32,
    pub shield: i32,
    pub lives: u32,
    pub power_level: u32,
    pub hidden: bool,
    pub hide_frames: u32,
    pub power_frames: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// Centered horizontally, resting just above the bottom edge
    pub fn new() -> Self {
        let (width, height) = SpriteKind::Player.size();
        Self {
            rect: Self::start_rect(width, height),
            speedx: 0,
            speedy: 0,
            shield: MAX_SHIELD,
            lives: STARTING_LIVES,
            power_level: 1,
            hidden: false,
            hide_frames: 0,
            power_frames: 0,
        }
    }

    fn start_rect(width: i32, height: i32) -> Rect {
        let mut rect = Rect::new(0, 0, width, height);
        rect.set_centerx(SCREEN_WIDTH / 2);
        rect.set_bottom(SCREEN_HEIGHT - BOTTOM_MARGIN);
        rect
    }

    pub fn update(&mut self, controls: &Controls) {
        if self.hidden {
            return;
        }

        self.speedx = axis_speed(controls.left, controls.right);
        self.speedy = axis_speed(controls.up, controls.down);
        self.rect.x += self.speedx;
        self.rect.y += self.speedy;

        if self.rect.right() > SCREEN_WIDTH {
            self.rect.set_right(SCREEN_WIDTH);
        }
        if self.rect.left() < 0 {
            self.rect.set_left(0);
        }
        if self.rect.top() < 0 {
            self.rect.set_top(0);
        }
        if self.rect.bottom() > SCREEN_HEIGHT - BOTTOM_MARGIN {
            self.rect.set_bottom(SCREEN_HEIGHT - BOTTOM_MARGIN);
        }
    }

    /// Advances the hide and power timers by one frame
    pub fn tick(&mut self) {
        if self.hidden {
            self.hide_frames = self.hide_frames.saturating_sub(1);
            if self.hide_frames == 0 {
                self.hidden = false;
                self.rect = Self::start_rect(self.rect.width, self.rect.height);
            }
        }

        if self.power_level >= 2 {
            if self.power_frames == 0 {
                // Tier raised without `powerup`; its timer starts now
                self.power_frames = POWERUP_FRAMES;
            }
            self.power_frames -= 1;
            if self.power_frames == 0 {
                self.power_level -= 1;
                self.power_frames = POWERUP_FRAMES;
            }
        }
    }

    /// Fires from the top of the ship, adding each bullet to `groups` in the world.
    /// Returns each spawned bullet with its id in the world.
    pub fn shoot(&self, world: &mut World, groups: &[Group]) -> Vec<(SpriteId, Bullet)> {
        let top = self.rect.top();
        let center_x = self.rect.centerx();

        fire_pattern(self.power_level)
            .iter()
            .map(|offset| {
                let bullet = Bullet::with_power(center_x + offset, top, self.power_level);
                let id = world.spawn(Sprite::Bullet(bullet.clone()), groups);
                (id, bullet)
            })
            .collect()
    }

    pub fn powerup(&mut self) {
        self.power_level += 1;
        self.power_frames = POWERUP_FRAMES;
    }

    /// Drains the shield; returns true when this cost a life
    pub fn take_damage(&mut self, damage: i32) -> bool {
        self.shield = (self.shield - damage).max(0);
        if self.shield > 0 {
            return false;
        }

        self.lives = self.lives.saturating_sub(1);
        self.shield = MAX_SHIELD;
        self.hide();
        true
    }

    pub fn restore_shield(&mut self, amount: i32) {
        self.shield = (self.shield + amount).min(MAX_SHIELD);
    }

    /// Parks the ship below the screen for a short while
    pub fn hide(&mut self) {
        self.hidden = true;
        self.hide_frames = HIDE_FRAMES;
        self.rect.set_centerx(SCREEN_WIDTH / 2);
        self.rect.set_top(SCREEN_HEIGHT + 200);
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }
}

fn axis_speed(negative: bool, positive: bool) -> i32 {
    match (negative, positive) {
        (true, false) => -PLAYER_SPEED,
        (false, true) => PLAYER_SPEED,
        _ => 0,
    }
}
