use super::Lifecycle;
use crate::geometry::Rect;
use crate::sprites::SpriteKind;

pub const BULLET_SPEED: i32 = -10;

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    pub speedy: i32,
    /// Power tier of the shot that fired this bullet
    pub power: Option<u32>,
}

impl Bullet {
    /// Places the bullet so its horizontal center is `x` and its bottom edge is `y`
    pub fn new(x: i32, y: i32) -> Self {
        let (width, height) = SpriteKind::Bullet.size();
        let mut rect = Rect::new(0, 0, width, height);
        rect.set_centerx(x);
        rect.set_bottom(y);

        Self {
            rect,
            speedy: BULLET_SPEED,
            power: None,
        }
    }

    pub fn with_power(x: i32, y: i32, power: u32) -> Self {
        Self {
            power: Some(power),
            ..Self::new(x, y)
        }
    }

    pub fn update(&mut self) -> Lifecycle {
        self.rect.y += self.speedy;

        // Gone once fully above the top of the screen
        if self.rect.bottom() < 0 {
            Lifecycle::Kill
        } else {
            Lifecycle::Alive
        }
    }
}
