use log::{debug, info};
use rand::Rng;

use crate::entities::{Player, Powerup, PowerupKind};
use crate::world::{Group, Sprite, SpriteId, World};

pub const ENEMY_POINTS: u32 = 50;
pub const ENEMY_COLLISION_DAMAGE: i32 = 25;
pub const SHIELD_RESTORE_MIN: i32 = 10;
pub const SHIELD_RESTORE_MAX: i32 = 30;

/// Everything that happened during one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    pub enemies_destroyed: u32,
    pub points: u32,
    pub damage_taken: i32,
    pub lives_lost: u32,
    pub powerups_collected: Vec<PowerupKind>,
    pub powerups_dropped: u32,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Resolves bullet/enemy, enemy/player and player/powerup overlaps
pub fn check_collisions(
    player: &mut Player,
    world: &mut World,
    rng: &mut impl Rng,
    powerup_drop_chance: f64,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    bullets_hit_enemies(world, rng, powerup_drop_chance, &mut report);

    if !player.hidden {
        enemies_hit_player(player, world, rng, &mut report);
    }
    // Losing a life above hides the ship, so it cannot collect on the same frame
    if !player.hidden {
        player_collects_powerups(player, world, rng, &mut report);
    }

    report
}

fn bullets_hit_enemies(
    world: &mut World,
    rng: &mut impl Rng,
    powerup_drop_chance: f64,
    report: &mut CollisionReport,
) {
    let drop_chance = if powerup_drop_chance.is_nan() {
        0.0
    } else {
        powerup_drop_chance.clamp(0.0, 1.0)
    };

    let bullets: Vec<_> = world
        .bullets()
        .map(|(id, bullet)| (id, bullet.rect, bullet.power.unwrap_or(1)))
        .collect();

    for (bullet_id, bullet_rect, power) in bullets {
        let hit = world
            .enemies()
            .find(|(_, enemy)| enemy.rect.colliderect(&bullet_rect))
            .map(|(id, _)| id);

        let Some(enemy_id) = hit else {
            continue;
        };

        world.kill(bullet_id);
        if let Some(enemy) = world.enemy_mut(enemy_id) {
            enemy.respawn(rng);
        }

        report.enemies_destroyed += 1;
        report.points += ENEMY_POINTS * power;
        debug!("bullet {bullet_id:?} destroyed enemy {enemy_id:?}");

        if rng.random_bool(drop_chance) {
            let powerup = Powerup::spawn(rng);
            debug!("dropping {} powerup", powerup.kind);
            world.spawn(Sprite::Powerup(powerup), &[Group::AllSprites, Group::Powerups]);
            report.powerups_dropped += 1;
        }
    }
}

fn enemies_hit_player(
    player: &mut Player,
    world: &mut World,
    rng: &mut impl Rng,
    report: &mut CollisionReport,
) {
    let rammed: Vec<SpriteId> = world
        .enemies()
        .filter(|(_, enemy)| enemy.rect.colliderect(&player.rect))
        .map(|(id, _)| id)
        .collect();

    for enemy_id in rammed {
        if let Some(enemy) = world.enemy_mut(enemy_id) {
            enemy.respawn(rng);
        }

        report.damage_taken += ENEMY_COLLISION_DAMAGE;
        if player.take_damage(ENEMY_COLLISION_DAMAGE) {
            report.lives_lost += 1;
            info!("player lost a life, {} remaining", player.lives);
            // Parked below the screen now, nothing else can reach it
            break;
        }
    }
}

fn player_collects_powerups(
    player: &mut Player,
    world: &mut World,
    rng: &mut impl Rng,
    report: &mut CollisionReport,
) {
    let collected: Vec<(SpriteId, PowerupKind)> = world
        .powerups()
        .filter(|(_, powerup)| powerup.rect.colliderect(&player.rect))
        .map(|(id, powerup)| (id, powerup.kind))
        .collect();

    for (id, kind) in collected {
        world.kill(id);
        match kind {
            PowerupKind::Shield => {
                player.restore_shield(rng.random_range(SHIELD_RESTORE_MIN..=SHIELD_RESTORE_MAX));
            }
            PowerupKind::Power => player.powerup(),
        }
        debug!("collected {kind} powerup");
        report.powerups_collected.push(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Bullet, Enemy};
    use crate::geometry::Rect;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn enemy_at(rng: &mut StdRng, x: i32, y: i32) -> Enemy {
        let mut enemy = Enemy::spawn(rng);
        enemy.rect.x = x;
        enemy.rect.y = y;
        enemy
    }

    #[test]
    fn test_bullet_destroys_enemy() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut world = World::new();
        let mut player = Player::new();
        let enemy_id = world.spawn(
            Sprite::Enemy(enemy_at(&mut rng, 100, 100)),
            &[Group::AllSprites, Group::Enemies],
        );
        let bullet_id = world.spawn(
            Sprite::Bullet(Bullet::new(120, 130)),
            &[Group::AllSprites, Group::Bullets],
        );

        let report = check_collisions(&mut player, &mut world, &mut rng, 0.0);

        assert_eq!(report.enemies_destroyed, 1);
        assert_eq!(report.points, ENEMY_POINTS);
        assert!(!world.is_alive(bullet_id));
        // Enemy recycled back above the screen
        let enemy = world.enemy_mut(enemy_id).unwrap();
        assert!((-150..=-100).contains(&enemy.rect.y));
    }

    #[test]
    fn test_powered_bullet_scores_more() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut world = World::new();
        let mut player = Player::new();
        world.spawn(Sprite::Enemy(enemy_at(&mut rng, 100, 100)), &[Group::Enemies]);
        world.spawn(Sprite::Bullet(Bullet::with_power(120, 130, 3)), &[Group::Bullets]);

        let report = check_collisions(&mut player, &mut world, &mut rng, 0.0);
        assert_eq!(report.points, ENEMY_POINTS * 3);
    }

    #[test]
    fn test_guaranteed_drop_spawns_powerup() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut world = World::new();
        let mut player = Player::new();
        world.spawn(Sprite::Enemy(enemy_at(&mut rng, 100, 100)), &[Group::Enemies]);
        world.spawn(Sprite::Bullet(Bullet::new(120, 130)), &[Group::Bullets]);

        let report = check_collisions(&mut player, &mut world, &mut rng, 1.0);
        assert_eq!(report.powerups_dropped, 1);
        assert_eq!(world.len(Group::Powerups), 1);
        assert_eq!(world.len(Group::AllSprites), 1);
    }

    #[test]
    fn test_missed_bullet_survives() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut world = World::new();
        let mut player = Player::new();
        world.spawn(Sprite::Enemy(enemy_at(&mut rng, 100, 100)), &[Group::Enemies]);
        world.spawn(Sprite::Bullet(Bullet::new(400, 300)), &[Group::Bullets]);

        let report = check_collisions(&mut player, &mut world, &mut rng, 1.0);
        assert!(report.is_empty());
        assert_eq!(world.len(Group::Bullets), 1);
    }

    #[test]
    fn test_enemy_rams_player() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut world = World::new();
        let mut player = Player::new();
        let rect = player.rect;
        world.spawn(Sprite::Enemy(enemy_at(&mut rng, rect.x, rect.y)), &[Group::Enemies]);

        let report = check_collisions(&mut player, &mut world, &mut rng, 0.0);
        assert_eq!(report.damage_taken, ENEMY_COLLISION_DAMAGE);
        assert_eq!(player.shield, 100 - ENEMY_COLLISION_DAMAGE);
        assert_eq!(report.lives_lost, 0);
    }

    #[test]
    fn test_ramming_with_low_shield_costs_a_life() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut world = World::new();
        let mut player = Player::new();
        player.shield = 10;
        let rect = player.rect;
        world.spawn(Sprite::Enemy(enemy_at(&mut rng, rect.x, rect.y)), &[Group::Enemies]);
        world.spawn(Sprite::Enemy(enemy_at(&mut rng, rect.x + 5, rect.y)), &[Group::Enemies]);

        let report = check_collisions(&mut player, &mut world, &mut rng, 0.0);
        assert_eq!(report.lives_lost, 1);
        assert_eq!(player.lives, 2);
        assert!(player.hidden);
    }

    #[test]
    fn test_hidden_player_is_untouchable() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut world = World::new();
        let mut player = Player::new();
        let rect = player.rect;
        player.hidden = true;
        world.spawn(Sprite::Enemy(enemy_at(&mut rng, rect.x, rect.y)), &[Group::Enemies]);

        let report = check_collisions(&mut player, &mut world, &mut rng, 0.0);
        assert!(report.is_empty());
        assert_eq!(player.shield, 100);
    }

    #[test]
    fn test_player_collects_powerups() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut world = World::new();
        let mut player = Player::new();
        player.shield = 50;
        let rect = player.rect;

        let mut shield = Powerup::spawn(&mut rng);
        shield.kind = PowerupKind::Shield;
        shield.rect = Rect::new(rect.x, rect.y, 30, 30);
        let mut power = shield.clone();
        power.kind = PowerupKind::Power;

        world.spawn(Sprite::Powerup(shield), &[Group::AllSprites, Group::Powerups]);
        world.spawn(Sprite::Powerup(power), &[Group::AllSprites, Group::Powerups]);

        let report = check_collisions(&mut player, &mut world, &mut rng, 0.0);
        assert_eq!(
            report.powerups_collected,
            vec![PowerupKind::Shield, PowerupKind::Power]
        );
        assert!((60..=80).contains(&player.shield));
        assert_eq!(player.power_level, 2);
        assert!(world.is_empty(Group::Powerups));
        assert!(world.is_empty(Group::AllSprites));
    }
}
