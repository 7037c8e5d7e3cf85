use rand::Rng;

use crate::geometry::{Rect, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sprites::SpriteKind;

/// How far past each edge an enemy may drift before it is recycled
const EXIT_MARGIN_BOTTOM: i32 = 10;
const EXIT_MARGIN_LEFT: i32 = 25;
const EXIT_MARGIN_RIGHT: i32 = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    pub speedy: i32,
    pub speedx: i32,
}

impl Enemy {
    pub fn spawn(rng: &mut impl Rng) -> Self {
        let (width, height) = SpriteKind::Enemy.size();
        let mut enemy = Self {
            rect: Rect::new(0, 0, width, height),
            speedy: 0,
            speedx: 0,
        };
        enemy.respawn(rng);
        enemy
    }

    /// Re-randomizes position and velocity above the top of the screen
    pub fn respawn(&mut self, rng: &mut impl Rng) {
        self.rect.x = rng.random_range(0..=SCREEN_WIDTH - self.rect.width);
        self.rect.y = rng.random_range(-150..=-100);
        self.speedy = rng.random_range(1..=8);
        self.speedx = rng.random_range(-3..=3);
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        self.rect.x += self.speedx;
        self.rect.y += self.speedy;

        if self.is_off_screen() {
            self.respawn(rng);
        }
    }

    fn is_off_screen(&self) -> bool {
        self.rect.top() > SCREEN_HEIGHT + EXIT_MARGIN_BOTTOM
            || self.rect.left() < -EXIT_MARGIN_LEFT
            || self.rect.right() > SCREEN_WIDTH + EXIT_MARGIN_RIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_spawn_ranges(enemy: &Enemy) {
        assert!(enemy.rect.x >= 0 && enemy.rect.x <= SCREEN_WIDTH - enemy.rect.width);
        assert!((-150..=-100).contains(&enemy.rect.y));
        assert!((1..=8).contains(&enemy.speedy));
        assert!((-3..=3).contains(&enemy.speedx));
    }

    #[test]
    fn test_enemy_moves_by_its_speed() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut enemy = Enemy::spawn(&mut rng);
        let (x, y) = (enemy.rect.x, enemy.rect.y);
        enemy.update(&mut rng);
        assert_eq!(enemy.rect.x, x + enemy.speedx);
        assert_eq!(enemy.rect.y, y + enemy.speedy);
        assert!(enemy.rect.y > y);
    }

    #[test]
    fn test_enemy_respawns_past_bottom() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut enemy = Enemy::spawn(&mut rng);
        enemy.rect.x = 200;
        enemy.rect.y = SCREEN_HEIGHT + EXIT_MARGIN_BOTTOM;
        enemy.speedx = 0;
        enemy.speedy = 1;
        enemy.update(&mut rng);
        assert_spawn_ranges(&enemy);
    }

    #[test]
    fn test_enemy_respawns_past_left_edge() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut enemy = Enemy::spawn(&mut rng);
        enemy.rect.x = -EXIT_MARGIN_LEFT;
        enemy.rect.y = 300;
        enemy.speedx = -3;
        enemy.update(&mut rng);
        assert_spawn_ranges(&enemy);
    }

    #[test]
    fn test_enemy_respawns_past_right_edge() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut enemy = Enemy::spawn(&mut rng);
        enemy.rect.set_right(SCREEN_WIDTH + EXIT_MARGIN_RIGHT);
        enemy.rect.y = 300;
        enemy.speedx = 3;
        enemy.update(&mut rng);
        assert_spawn_ranges(&enemy);
    }

    #[test]
    fn test_enemy_stays_within_margins() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut enemy = Enemy::spawn(&mut rng);
        enemy.rect.x = -EXIT_MARGIN_LEFT + 3;
        enemy.rect.y = 300;
        enemy.speedx = -3;
        enemy.speedy = 2;
        enemy.update(&mut rng);
        assert_eq!(enemy.rect.x, -EXIT_MARGIN_LEFT);
        assert_eq!(enemy.rect.y, 302);
    }

    #[test]
    fn test_seeded_spawns_are_reproducible() {
        let a = Enemy::spawn(&mut StdRng::seed_from_u64(99));
        let b = Enemy::spawn(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_enemy_spawn_ranges(seed in any::<u64>()) {
                let mut rng = StdRng::seed_from_u64(seed);
                assert_spawn_ranges(&Enemy::spawn(&mut rng));
            }

            #[test]
            fn test_enemy_respawn_ranges(
                seed in any::<u64>(),
                x in -500i32..1000,
                y in -500i32..1200,
            ) {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut enemy = Enemy::spawn(&mut rng);
                enemy.rect.x = x;
                enemy.rect.y = y;
                enemy.respawn(&mut rng);
                assert_spawn_ranges(&enemy);
            }

            #[test]
            fn test_enemy_never_strays_past_margins(
                seed in any::<u64>(),
                frames in 0usize..400,
            ) {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut enemy = Enemy::spawn(&mut rng);
                for _ in 0..frames {
                    enemy.update(&mut rng);
                    prop_assert!(enemy.rect.top() <= SCREEN_HEIGHT + EXIT_MARGIN_BOTTOM);
                    prop_assert!(enemy.rect.left() >= -EXIT_MARGIN_LEFT);
                    prop_assert!(enemy.rect.right() <= SCREEN_WIDTH + EXIT_MARGIN_RIGHT);
                }
            }
        }
    }
}
