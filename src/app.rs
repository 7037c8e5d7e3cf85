use color_eyre::Result;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::collision::check_collisions;
use crate::config::GameConfig;
use crate::entities::{Enemy, GameState, Player};
use crate::input::{Controls, InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::world::{Group, Sprite, World};

/// The main application which holds the state and logic of the game session.
pub struct App {
    running: bool,
    game_state: GameState,
    config: GameConfig,
    rng: StdRng,
    player: Player,
    world: World,
    score: u32,
    /// Frames left before the next shot
    fire_cooldown: u32,
    /// Frames info
    frame_count: u64,
    last_frame_time: Instant,
    fps: u32,
    /// Game timers
    game_start_time: Instant,
    final_time_secs: Option<u64>,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        let audio_manager = AudioManager::new(&config.sound);
        Self::with_audio(config, audio_manager)
    }

    pub fn with_audio(config: GameConfig, audio_manager: AudioManager) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let now = Instant::now();
        let mut app = Self {
            running: true,
            game_state: GameState::Playing,
            config,
            rng,
            player: Player::new(),
            world: World::new(),
            score: 0,
            fire_cooldown: 0,
            frame_count: 0,
            last_frame_time: now,
            fps: 0,
            game_start_time: now,
            final_time_secs: None,
            input_manager: InputManager::new(),
            renderer: GameRenderer::new(),
            audio_manager,
        };
        app.spawn_enemies();
        app
    }

    /// Starts a new game, keeping config and audio
    fn restart(&mut self) {
        // Seeded runs stay reproducible but each new game plays out differently
        let seed: u64 = self.rng.random();
        self.rng = StdRng::seed_from_u64(seed);

        let now = Instant::now();
        self.game_state = GameState::Playing;
        self.player = Player::new();
        self.world = World::new();
        self.score = 0;
        self.fire_cooldown = 0;
        self.frame_count = 0;
        self.game_start_time = now;
        self.final_time_secs = None;
        self.input_manager.release_all();
        self.spawn_enemies();
        info!("new game started");
    }

    fn spawn_enemies(&mut self) {
        for _ in 0..self.config.enemy_count {
            let enemy = Enemy::spawn(&mut self.rng);
            self.world
                .spawn(Sprite::Enemy(enemy), &[Group::AllSprites, Group::Enemies]);
        }
        debug!("spawned {} enemies", self.config.enemy_count);
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        let frame_duration = Duration::from_millis(self.config.frame_millis);

        while self.running {
            let now = Instant::now();
            let frame_time = now.duration_since(self.last_frame_time);
            self.last_frame_time = now;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            terminal.draw(|frame| {
                let elapsed_time_secs = self
                    .final_time_secs
                    .unwrap_or_else(|| self.game_start_time.elapsed().as_secs());
                let view = RenderView {
                    game_state: self.game_state,
                    player: &self.player,
                    world: &self.world,
                    score: self.score,
                    frame_count: self.frame_count,
                    area: frame.area(),
                    fps: self.fps,
                    elapsed_time_secs,
                };
                self.renderer.render(frame, &view);
            })?;

            self.input_manager.poll_events(self.game_state)?;
            let actions = self.input_manager.actions().to_vec();
            self.process_actions(&actions);

            if self.game_state == GameState::Playing {
                let controls = self.input_manager.controls();
                let fire = self.input_manager.fire_held();
                self.step(controls, fire);
            }

            // Sleep off the rest of the frame
            if let Some(remaining) = frame_duration.checked_sub(now.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
        info!("final score {}", self.score);
        Ok(())
    }

    pub fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => self.running = false,
                InputAction::Pause => self.game_state = GameState::Paused,
                InputAction::Resume => self.game_state = GameState::Playing,
                InputAction::Restart => self.restart(),
            }
        }
    }

    /// Advances the game by one frame with the given held input
    pub fn step(&mut self, controls: Controls, fire: bool) {
        if self.game_state != GameState::Playing {
            return;
        }
        self.frame_count += 1;

        self.player.tick();
        self.player.update(&controls);

        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
        if fire && self.fire_cooldown == 0 && !self.player.hidden {
            self.player
                .shoot(&mut self.world, &[Group::AllSprites, Group::Bullets]);
            self.audio_manager.play_shoot();
            self.fire_cooldown = self.config.fire_delay_frames;
        }

        self.world.update(&mut self.rng);

        let report = check_collisions(
            &mut self.player,
            &mut self.world,
            &mut self.rng,
            self.config.powerup_drop_chance,
        );
        self.score += report.points;
        if report.enemies_destroyed > 0 || report.lives_lost > 0 {
            self.audio_manager.play_explosion();
        }

        if !self.player.is_alive() {
            self.final_time_secs = Some(self.game_start_time.elapsed().as_secs());
            self.game_state = GameState::GameOver;
            info!("game over with score {}", self.score);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
