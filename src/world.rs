use log::debug;
use rand::Rng;
use std::collections::BTreeMap;

use crate::entities::{Bullet, Enemy, Lifecycle, Powerup};
use crate::geometry::Rect;

/// Named sprite containers. A sprite may belong to any number of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    AllSprites,
    Bullets,
    Enemies,
    Powerups,
}

impl Group {
    fn bit(self) -> u8 {
        match self {
            Group::AllSprites => 1 << 0,
            Group::Bullets => 1 << 1,
            Group::Enemies => 1 << 2,
            Group::Powerups => 1 << 3,
        }
    }
}

/// Handle to a sprite owned by a [`World`]. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpriteId(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Sprite {
    Enemy(Enemy),
    Bullet(Bullet),
    Powerup(Powerup),
}

impl Sprite {
    pub fn rect(&self) -> &Rect {
        match self {
            Sprite::Enemy(enemy) => &enemy.rect,
            Sprite::Bullet(bullet) => &bullet.rect,
            Sprite::Powerup(powerup) => &powerup.rect,
        }
    }

    fn update(&mut self, rng: &mut impl Rng) -> Lifecycle {
        match self {
            Sprite::Enemy(enemy) => {
                enemy.update(rng);
                Lifecycle::Alive
            }
            Sprite::Bullet(bullet) => bullet.update(),
            Sprite::Powerup(powerup) => powerup.update(),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    sprite: Sprite,
    groups: u8,
}

/// Owns every spawned sprite and tracks which groups each one belongs to
#[derive(Debug, Default)]
pub struct World {
    next_id: u64,
    entries: BTreeMap<SpriteId, Entry>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, sprite: Sprite, groups: &[Group]) -> SpriteId {
        let id = SpriteId(self.next_id);
        self.next_id += 1;

        let groups = groups.iter().fold(0, |mask, group| mask | group.bit());
        self.entries.insert(id, Entry { sprite, groups });
        id
    }

    pub fn add(&mut self, id: SpriteId, group: Group) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.groups |= group.bit();
        }
    }

    /// Leaves one group. The sprite itself stays in the world.
    pub fn remove(&mut self, id: SpriteId, group: Group) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.groups &= !group.bit();
        }
    }

    /// Removes the sprite from every group; does nothing if it is already gone
    pub fn kill(&mut self, id: SpriteId) -> Option<Sprite> {
        self.entries.remove(&id).map(|entry| entry.sprite)
    }

    pub fn contains(&self, id: SpriteId, group: Group) -> bool {
        self.entries
            .get(&id)
            .is_some_and(|entry| entry.groups & group.bit() != 0)
    }

    pub fn is_alive(&self, id: SpriteId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self, group: Group) -> usize {
        self.ids(group).count()
    }

    pub fn is_empty(&self, group: Group) -> bool {
        self.ids(group).next().is_none()
    }

    pub fn ids(&self, group: Group) -> impl Iterator<Item = SpriteId> + '_ {
        self.entries
            .iter()
            .filter(move |(_, entry)| entry.groups & group.bit() != 0)
            .map(|(id, _)| *id)
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.entries.get(&id).map(|entry| &entry.sprite)
    }

    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.entries.get_mut(&id).map(|entry| &mut entry.sprite)
    }

    pub fn sprites(&self) -> impl Iterator<Item = (SpriteId, &Sprite)> {
        self.entries.iter().map(|(id, entry)| (*id, &entry.sprite))
    }

    pub fn enemies(&self) -> impl Iterator<Item = (SpriteId, &Enemy)> {
        self.sprites().filter_map(|(id, sprite)| match sprite {
            Sprite::Enemy(enemy) => Some((id, enemy)),
            _ => None,
        })
    }

    pub fn bullets(&self) -> impl Iterator<Item = (SpriteId, &Bullet)> {
        self.sprites().filter_map(|(id, sprite)| match sprite {
            Sprite::Bullet(bullet) => Some((id, bullet)),
            _ => None,
        })
    }

    pub fn powerups(&self) -> impl Iterator<Item = (SpriteId, &Powerup)> {
        self.sprites().filter_map(|(id, sprite)| match sprite {
            Sprite::Powerup(powerup) => Some((id, powerup)),
            _ => None,
        })
    }

    pub fn enemy_mut(&mut self, id: SpriteId) -> Option<&mut Enemy> {
        match self.get_mut(id) {
            Some(Sprite::Enemy(enemy)) => Some(enemy),
            _ => None,
        }
    }

    /// Runs one frame of updates in id order and drops every sprite that asked to die
    pub fn update(&mut self, rng: &mut impl Rng) {
        let mut dead = Vec::new();
        for (id, entry) in self.entries.iter_mut() {
            if entry.sprite.update(rng) == Lifecycle::Kill {
                dead.push(*id);
            }
        }

        for id in dead {
            debug!("sprite {id:?} left the screen");
            self.kill(id);
        }
    }
}
