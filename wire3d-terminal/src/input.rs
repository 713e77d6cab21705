/// Keyboard and mouse sampling from terminal events
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode, MouseEvent,
    MouseEventKind,
};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use wire3d_core::{DeviceError, InputEvent, InputSource, MovementKeys};

use crate::TerminalConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Key {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    LookLeft,
    LookRight,
    LookUp,
    LookDown,
}

impl Key {
    fn from_code(code: KeyCode) -> Option<Self> {
        let key = match code {
            KeyCode::Char('w') | KeyCode::Char('W') => Key::Forward,
            KeyCode::Char('s') | KeyCode::Char('S') => Key::Backward,
            KeyCode::Char('a') | KeyCode::Char('A') => Key::Left,
            KeyCode::Char('d') | KeyCode::Char('D') => Key::Right,
            KeyCode::Char(' ') => Key::Up,
            KeyCode::Char('c') | KeyCode::Char('C') => Key::Down,
            KeyCode::Modifier(ModifierKeyCode::LeftShift) => Key::Down,
            KeyCode::Left => Key::LookLeft,
            KeyCode::Right => Key::LookRight,
            KeyCode::Up => Key::LookUp,
            KeyCode::Down => Key::LookDown,
            _ => return None,
        };
        Some(key)
    }
}

/// Turns terminal events into held keys, scroll steps and pointer motion.
///
/// With key-release reporting a key is held from press to release. Without
/// it, a key counts as held until a short window after its last press or
/// auto-repeat.
pub struct TerminalInput {
    config: TerminalConfig,
    release_events: bool,
    /// `None` holds until release, `Some` until the deadline.
    held: HashMap<Key, Option<Instant>>,
    /// Last pointer cell and when it was reported.
    last_pointer: Option<(u16, u16, Instant)>,
    mouse_delta: (f64, f64),
    last_sample: Instant,
}

impl TerminalInput {
    pub fn new(config: TerminalConfig, release_events: bool) -> Self {
        Self {
            config,
            release_events,
            held: HashMap::new(),
            last_pointer: None,
            mouse_delta: (0.0, 0.0),
            last_sample: Instant::now(),
        }
    }

    /// Apply one terminal event, returning any discrete viewer event.
    pub fn handle_event(&mut self, event: Event, now: Instant) -> Option<InputEvent> {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::FocusLost => {
                debug!("focus lost; forgetting pointer position");
                self.last_pointer = None;
                None
            }
            Event::Resize(columns, rows) => {
                warn!(columns, rows, "terminal resized; keeping the startup size");
                None
            }
            _ => None,
        }
    }

    fn handle_key(&mut self, event: KeyEvent, now: Instant) -> Option<InputEvent> {
        // Raw mode swallows SIGINT, so Ctrl+C arrives as a key.
        if event.code == KeyCode::Char('c')
            && event.modifiers.contains(KeyModifiers::CONTROL)
            && event.kind != KeyEventKind::Release
        {
            return Some(InputEvent::Terminate);
        }

        let key = Key::from_code(event.code)?;
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                let hold = if self.release_events {
                    None
                } else if self.is_held(key, now) {
                    Some(now + self.config.repeat_hold)
                } else {
                    Some(now + self.config.initial_hold)
                };
                self.held.insert(key, hold);
            }
            KeyEventKind::Release => {
                self.held.remove(&key);
            }
        }
        None
    }

    /// A report after a silence longer than `pointer_gap` starts a new
    /// trail instead of turning by the jump from the old position.
    fn handle_mouse(&mut self, event: MouseEvent, now: Instant) -> Option<InputEvent> {
        match event.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if let Some((column, row, seen)) = self.last_pointer {
                    if now.saturating_duration_since(seen) <= self.config.pointer_gap {
                        let (cell_w, cell_h) = self.config.cell_pixels;
                        self.mouse_delta.0 += (event.column as f64 - column as f64) * cell_w;
                        self.mouse_delta.1 += (event.row as f64 - row as f64) * cell_h;
                    }
                }
                self.last_pointer = Some((event.column, event.row, now));
                None
            }
            MouseEventKind::ScrollUp => Some(InputEvent::Scroll(1.0)),
            MouseEventKind::ScrollDown => Some(InputEvent::Scroll(-1.0)),
            _ => None,
        }
    }

    fn is_held(&self, key: Key, now: Instant) -> bool {
        match self.held.get(&key) {
            Some(None) => true,
            Some(Some(deadline)) => now < *deadline,
            None => false,
        }
    }

    pub fn held_keys_at(&self, now: Instant) -> MovementKeys {
        MovementKeys {
            forward: self.is_held(Key::Forward, now),
            backward: self.is_held(Key::Backward, now),
            left: self.is_held(Key::Left, now),
            right: self.is_held(Key::Right, now),
            up: self.is_held(Key::Up, now),
            down: self.is_held(Key::Down, now),
        }
    }

    /// Pointer motion plus arrow-key turning accumulated up to `now`.
    pub fn take_mouse_delta_at(&mut self, now: Instant) -> (f64, f64) {
        let elapsed_ms = now.saturating_duration_since(self.last_sample).as_secs_f64() * 1000.0;
        let turn = self.config.look_rate * elapsed_ms;
        let (mut dx, mut dy) = std::mem::take(&mut self.mouse_delta);

        if self.is_held(Key::LookRight, now) {
            dx += turn;
        }
        if self.is_held(Key::LookLeft, now) {
            dx -= turn;
        }
        if self.is_held(Key::LookDown, now) {
            dy += turn;
        }
        if self.is_held(Key::LookUp, now) {
            dy -= turn;
        }

        self.last_sample = now;
        (dx, dy)
    }
}

impl InputSource for TerminalInput {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, DeviceError> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            let now = Instant::now();
            if let Some(event) = self.handle_event(event::read()?, now) {
                events.push(event);
            }
        }

        let now = Instant::now();
        let before = self.held.len();
        self.held
            .retain(|_, deadline| deadline.map_or(true, |d| now < d));
        if self.held.len() != before {
            debug!(expired = before - self.held.len(), "released emulated key holds");
        }
        Ok(events)
    }

    fn held_keys(&self) -> MovementKeys {
        self.held_keys_at(Instant::now())
    }

    fn take_mouse_delta(&mut self) -> (f64, f64) {
        self.take_mouse_delta_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_press_and_release_with_release_events() {
        let mut input = TerminalInput::new(TerminalConfig::default(), true);
        let now = Instant::now();

        input.handle_event(key(KeyCode::Char('w'), KeyEventKind::Press), now);
        let later = now + Duration::from_secs(10);
        assert!(input.held_keys_at(later).forward);

        input.handle_event(key(KeyCode::Char('w'), KeyEventKind::Release), later);
        assert!(!input.held_keys_at(later).forward);
    }

    #[test]
    fn test_emulated_hold_expires() {
        let config = TerminalConfig::default();
        let mut input = TerminalInput::new(config.clone(), false);
        let now = Instant::now();

        input.handle_event(key(KeyCode::Char('d'), KeyEventKind::Press), now);
        assert!(input.held_keys_at(now + config.initial_hold / 2).right);
        assert!(!input.held_keys_at(now + config.initial_hold).right);
    }

    #[test]
    fn test_repeat_extends_emulated_hold() {
        let config = TerminalConfig::default();
        let mut input = TerminalInput::new(config.clone(), false);
        let now = Instant::now();

        input.handle_event(key(KeyCode::Char('s'), KeyEventKind::Press), now);
        let repeat_at = now + config.initial_hold - Duration::from_millis(1);
        input.handle_event(key(KeyCode::Char('s'), KeyEventKind::Press), repeat_at);

        let midway = repeat_at + config.repeat_hold / 2;
        assert!(input.held_keys_at(midway).backward);
        assert!(!input.held_keys_at(repeat_at + config.repeat_hold).backward);
    }

    #[test]
    fn test_vertical_bindings() {
        let mut input = TerminalInput::new(TerminalConfig::default(), true);
        let now = Instant::now();
        input.handle_event(key(KeyCode::Char(' '), KeyEventKind::Press), now);
        input.handle_event(
            key(KeyCode::Modifier(ModifierKeyCode::LeftShift), KeyEventKind::Press),
            now,
        );

        let keys = input.held_keys_at(now);
        assert!(keys.up);
        assert!(keys.down);
        assert!(!keys.forward);
    }

    #[test]
    fn test_ctrl_c_terminates() {
        let mut input = TerminalInput::new(TerminalConfig::default(), false);
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(
            input.handle_event(event, Instant::now()),
            Some(InputEvent::Terminate)
        );
        assert!(!input.held_keys_at(Instant::now()).down);
    }

    #[test]
    fn test_scroll_events() {
        let mut input = TerminalInput::new(TerminalConfig::default(), false);
        let now = Instant::now();
        assert_eq!(
            input.handle_event(mouse(MouseEventKind::ScrollUp, 0, 0), now),
            Some(InputEvent::Scroll(1.0))
        );
        assert_eq!(
            input.handle_event(mouse(MouseEventKind::ScrollDown, 0, 0), now),
            Some(InputEvent::Scroll(-1.0))
        );
    }

    #[test]
    fn test_pointer_motion_scaled_by_cell_size() {
        let config = TerminalConfig::default();
        let (cell_w, cell_h) = config.cell_pixels;
        let mut input = TerminalInput::new(config, false);
        let now = Instant::now();

        // first sighting only records the position
        input.handle_event(mouse(MouseEventKind::Moved, 10, 10), now);
        input.handle_event(mouse(MouseEventKind::Moved, 13, 9), now);
        input.handle_event(mouse(MouseEventKind::Moved, 14, 9), now);

        let (dx, dy) = input.take_mouse_delta_at(now);
        assert!((dx - 4.0 * cell_w).abs() < 1e-9);
        assert!((dy + cell_h).abs() < 1e-9);
        assert_eq!(input.take_mouse_delta_at(now), (0.0, 0.0));
    }

    #[test]
    fn test_arrow_keys_turn_over_time() {
        let config = TerminalConfig::default();
        let rate = config.look_rate;
        let mut input = TerminalInput::new(config, true);
        let start = Instant::now();
        input.take_mouse_delta_at(start);

        input.handle_event(key(KeyCode::Right, KeyEventKind::Press), start);
        input.handle_event(key(KeyCode::Up, KeyEventKind::Press), start);
        let (dx, dy) = input.take_mouse_delta_at(start + Duration::from_millis(100));

        assert!((dx - rate * 100.0).abs() < 1e-6);
        assert!((dy + rate * 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_pointer_reentry_after_gap_does_not_jump() {
        let config = TerminalConfig::default();
        let gap = config.pointer_gap;
        let mut input = TerminalInput::new(config, false);
        let now = Instant::now();

        input.handle_event(mouse(MouseEventKind::Moved, 10, 10), now);
        let back = now + gap + Duration::from_millis(1);
        input.handle_event(mouse(MouseEventKind::Moved, 70, 2), back);
        assert_eq!(input.take_mouse_delta_at(back), (0.0, 0.0));

        // the new position is the reference for further motion
        input.handle_event(mouse(MouseEventKind::Moved, 71, 2), back);
        let (dx, _) = input.take_mouse_delta_at(back);
        assert!(dx > 0.0);
    }

    #[test]
    fn test_focus_lost_forgets_pointer() {
        let mut input = TerminalInput::new(TerminalConfig::default(), false);
        let now = Instant::now();

        input.handle_event(mouse(MouseEventKind::Moved, 5, 5), now);
        assert_eq!(input.handle_event(Event::FocusLost, now), None);
        input.handle_event(Event::FocusGained, now);
        input.handle_event(mouse(MouseEventKind::Moved, 40, 20), now);
        assert_eq!(input.take_mouse_delta_at(now), (0.0, 0.0));
    }
}
