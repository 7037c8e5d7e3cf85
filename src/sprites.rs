/// Placeholder sprite sheet: a fixed size and a terminal glyph for each entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Enemy,
    Bullet,
    Powerup,
}

impl SpriteKind {
    /// Width and height in playfield pixels
    pub fn size(&self) -> (i32, i32) {
        match self {
            SpriteKind::Player => (50, 38),
            SpriteKind::Enemy => (40, 40),
            SpriteKind::Bullet => (10, 20),
            SpriteKind::Powerup => (30, 30),
        }
    }

    pub fn get_sprite_lines(&self) -> Vec<&'static str> {
        match self {
            SpriteKind::Player => vec![" /^\\ ", "<|||>"],
            SpriteKind::Enemy => vec!["(@@)", "(@@)"],
            SpriteKind::Bullet => vec!["|"],
            // Capsule; the renderer stamps `PowerupKind::get_char` inside
            SpriteKind::Powerup => vec!["( )"],
        }
    }
}
