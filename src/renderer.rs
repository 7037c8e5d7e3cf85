use rand::Rng;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::entities::{GameState, MAX_SHIELD, Player, PowerupKind};
use crate::geometry::{self, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sprites::SpriteKind;
use crate::world::World;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub player: &'a Player,
    pub world: &'a World,
    pub score: u32,
    pub frame_count: u64,
    pub area: Rect,
    pub fps: u32,
    pub elapsed_time_secs: u64,
}

/// Maps a playfield box onto terminal cells inside `field`.
/// Returns None when nothing of it is visible.
pub fn project(rect: &geometry::Rect, field: Rect) -> Option<Rect> {
    let scale_x = |v: i32| i64::from(v) * i64::from(field.width) / i64::from(SCREEN_WIDTH);
    let scale_y = |v: i32| i64::from(v) * i64::from(field.height) / i64::from(SCREEN_HEIGHT);

    let left = scale_x(rect.left());
    let top = scale_y(rect.top());
    // Every sprite takes at least one cell
    let right = scale_x(rect.right()).max(left + 1);
    let bottom = scale_y(rect.bottom()).max(top + 1);

    let left = left.clamp(0, i64::from(field.width));
    let right = right.clamp(0, i64::from(field.width));
    let top = top.clamp(0, i64::from(field.height));
    let bottom = bottom.clamp(0, i64::from(field.height));
    if left >= right || top >= bottom {
        return None;
    }

    Some(Rect {
        x: field.x + left as u16,
        y: field.y + top as u16,
        width: (right - left) as u16,
        height: (bottom - top) as u16,
    })
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Handles all rendering responsibilities for the game
#[derive(Debug, Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::Playing => self.render_game(frame, view),
            GameState::Paused => self.render_paused(frame, view),
            GameState::GameOver => self.render_game_over(frame, view),
        }
    }

    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;

        // Header row for the HUD, footer row for the controls hint
        let field_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(2),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let field = block.inner(field_area);
        frame.render_widget(block, field_area);

        // Twinkling background
        if view.frame_count % 10 < 5 {
            let mut rng = rand::rng();
            let star_text = (0..field.height)
                .map(|_| {
                    (0..field.width)
                        .map(|_| if rng.random_bool(0.01) { '.' } else { ' ' })
                        .collect::<String>()
                })
                .collect::<Vec<_>>()
                .join("\n");
            frame.render_widget(
                Paragraph::new(star_text).style(Style::default().fg(Color::DarkGray)),
                field,
            );
        }

        for (_, enemy) in view.world.enemies() {
            render_sprite(frame, field, &enemy.rect, SpriteKind::Enemy, Color::Red);
        }

        for (_, powerup) in view.world.powerups() {
            let color = match powerup.kind {
                PowerupKind::Shield => Color::Cyan,
                PowerupKind::Power => Color::Magenta,
            };
            if let Some(cells) =
                render_sprite(frame, field, &powerup.rect, SpriteKind::Powerup, color)
            {
                frame.buffer_mut().set_string(
                    cells.x + cells.width / 2,
                    cells.y,
                    powerup.kind.get_char().to_string(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                );
            }
        }
        for (_, bullet) in view.world.bullets() {
            render_sprite(frame, field, &bullet.rect, SpriteKind::Bullet, Color::Yellow);
        }

        if !view.player.hidden {
            render_sprite(
                frame,
                field,
                &view.player.rect,
                SpriteKind::Player,
                Color::Green,
            );
        }

        self.render_hud(frame, view);

        let controls = Line::from(vec![Span::styled(
            "[WASD/Arrows: Move] [Space: Fire] [P: Pause] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_area = Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(1),
            width: area.width,
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    fn render_hud(&self, frame: &mut Frame, view: &RenderView) {
        let player = view.player;
        let label = Style::default().fg(Color::DarkGray);
        let value = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

        let shield_style = if player.shield > MAX_SHIELD / 2 {
            value(Color::Green)
        } else if player.shield > MAX_SHIELD / 4 {
            value(Color::Yellow)
        } else {
            value(Color::Red)
        };

        let stats = Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(view.score.to_string(), value(Color::Yellow)),
            Span::styled("  Shield: ", label),
            Span::styled(format!("{}%", player.shield), shield_style),
            Span::styled("  Lives: ", label),
            Span::styled(player.lives.to_string(), value(Color::Cyan)),
            Span::styled("  Power: ", label),
            Span::styled(player.power_level.to_string(), value(Color::Magenta)),
            Span::styled("  FPS: ", label),
            Span::styled(view.fps.to_string(), value(Color::White)),
        ]);

        let minutes = view.elapsed_time_secs / 60;
        let seconds = view.elapsed_time_secs % 60;
        let timer = Line::from(vec![
            Span::styled("Time: ", label),
            Span::styled(format!("{minutes:02}:{seconds:02}"), value(Color::White)),
        ]);

        let header = Rect {
            height: 1.min(view.area.height),
            ..view.area
        };
        frame.render_widget(Paragraph::new(stats), header);
        frame.render_widget(Paragraph::new(timer).right_aligned(), header);
    }

    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);

        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            centered(view.area, 30, 6),
        );
    }

    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let minutes = view.elapsed_time_secs / 60;
        let seconds = view.elapsed_time_secs % 60;

        let game_over_text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().red(),
            Line::from("║        GAME OVER!         ║")
                .centered()
                .red()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().red(),
            Line::from(""),
            Line::from(format!("Final Score: {}", view.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!("Time Survived: {minutes:02}:{seconds:02}"))
                .centered()
                .cyan()
                .bold(),
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            view.area,
        );
    }
}

fn render_sprite(
    frame: &mut Frame,
    field: Rect,
    rect: &geometry::Rect,
    kind: SpriteKind,
    color: Color,
) -> Option<Rect> {
    let cells = project(rect, field)?;

    let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    let text: Vec<Line> = kind
        .get_sprite_lines()
        .into_iter()
        .map(|line| Line::from(line).style(style))
        .collect();
    frame.render_widget(Paragraph::new(text), cells);
    Some(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn field() -> Rect {
        Rect::new(1, 2, 48, 30)
    }

    #[test]
    fn test_project_scales_into_field() {
        let rect = geometry::Rect::new(240, 300, 50, 40);
        let cells = project(&rect, field()).unwrap();
        assert_eq!(cells.x, 1 + 24);
        assert_eq!(cells.y, 2 + 15);
        assert_eq!(cells.width, 5);
        assert_eq!(cells.height, 2);
    }

    #[test]
    fn test_project_small_sprite_gets_one_cell() {
        let rect = geometry::Rect::new(0, 0, 1, 1);
        let cells = project(&rect, field()).unwrap();
        assert_eq!((cells.width, cells.height), (1, 1));
    }

    #[test]
    fn test_project_offscreen_is_hidden() {
        let above = geometry::Rect::new(100, -150, 40, 40);
        assert!(project(&above, field()).is_none());

        let below = geometry::Rect::new(100, SCREEN_HEIGHT + 200, 40, 40);
        assert!(project(&below, field()).is_none());
    }

    #[test]
    fn test_project_clips_partially_visible() {
        let rect = geometry::Rect::new(-20, -20, 40, 40);
        let cells = project(&rect, field()).unwrap();
        assert_eq!(cells.x, 1);
        assert_eq!(cells.y, 2);
        assert_eq!(cells.width, 2);
        assert_eq!(cells.height, 1);
    }

    fn draw_sprite(rect: geometry::Rect, kind: SpriteKind) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(50, 34)).unwrap();
        terminal
            .draw(|frame| {
                render_sprite(frame, field(), &rect, kind, Color::White);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    #[test]
    fn test_bullet_drawn_from_sprite_sheet() {
        let symbols = draw_sprite(geometry::Rect::new(240, 300, 10, 20), SpriteKind::Bullet);
        assert_eq!(symbols.iter().filter(|s| *s == "|").count(), 1);
    }

    #[test]
    fn test_powerup_capsule_drawn_from_sprite_sheet() {
        let symbols = draw_sprite(geometry::Rect::new(240, 300, 30, 30), SpriteKind::Powerup);
        assert!(symbols.iter().any(|s| s == "("));
        assert!(symbols.iter().any(|s| s == ")"));
    }

    #[test]
    fn test_offscreen_sprite_draws_nothing() {
        let symbols = draw_sprite(geometry::Rect::new(240, -200, 10, 20), SpriteKind::Bullet);
        assert!(symbols.iter().all(|s| s == " "));
    }

    #[test]
    fn test_centered_fits_small_area() {
        let area = Rect::new(0, 0, 20, 4);
        let panel = centered(area, 30, 6);
        assert_eq!(panel, Rect::new(0, 0, 20, 4));
    }
}
