use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::entities::GameState;

/// One-shot game actions triggered by a single key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Pause,
    Resume,
    Restart,
    Quit,
}

/// Directional keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Manages input polling and translates raw key events into game actions
#[derive(Debug, Default)]
pub struct InputManager {
    controls: Controls,
    fire: bool,
    oneshot_actions: Vec<InputAction>,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polls for all input events and stores one-shot actions.
    /// Should be called once per frame before reading actions.
    pub fn poll_events(&mut self, game_state: GameState) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, game_state);
            }
        }

        Ok(())
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent, game_state: GameState) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, game_state),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
            _ => {}
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, game_state: GameState) {
        // Quit works in any state
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        let is_pause_key = matches!(key_event.code, KeyCode::Char('p') | KeyCode::Char('P'));
        match game_state {
            GameState::Playing if is_pause_key => {
                self.oneshot_actions.push(InputAction::Pause);
                // Held keys would otherwise stick while paused
                self.release_all();
                return;
            }
            GameState::Paused if is_pause_key => {
                self.oneshot_actions.push(InputAction::Resume);
                return;
            }
            GameState::GameOver
                if matches!(key_event.code, KeyCode::Char('r') | KeyCode::Char('R')) =>
            {
                self.oneshot_actions.push(InputAction::Restart);
                return;
            }
            _ => {}
        }

        if game_state != GameState::Playing {
            return;
        }

        match key_event.code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                self.controls.up = true;
                self.controls.down = false;
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                self.controls.down = true;
                self.controls.up = false;
            }
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.controls.left = true;
                self.controls.right = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.controls.right = true;
                self.controls.left = false;
            }
            KeyCode::Char(' ') => {
                self.fire = true;
            }
            _ => {}
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => self.controls.up = false,
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => self.controls.down = false,
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => self.controls.left = false,
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.controls.right = false
            }
            KeyCode::Char(' ') => self.fire = false,
            _ => {}
        }
    }

    pub fn release_all(&mut self) {
        self.controls = Controls::default();
        self.fire = false;
    }

    /// One-shot actions gathered by the last poll
    pub fn actions(&self) -> &[InputAction] {
        &self.oneshot_actions
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn fire_held(&self) -> bool {
        self.fire
    }
}
