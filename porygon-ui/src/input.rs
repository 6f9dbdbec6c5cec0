//! Per-frame input snapshot.
//!
//! The host samples raw device state once per game tick into an
//! [`InputSample`] and feeds it to [`InputState::advance`]. Components then
//! ask edge-triggered questions ("pressed this frame", "pressed with repeat")
//! and may consume an input so that later components, or the scene-level
//! handler, no longer see it. Consumption is first-claim-wins: there is no
//! bubbling.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::primitives::Point;

/// Mouse button types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

/// Keyboard modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Named (non-character) keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    // Navigation
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,

    // Editing
    Backspace,
    Delete,
    Enter,
    Tab,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    Escape,
    Space,
    /// The backquote/tilde key, conventionally the console toggle.
    Grave,
}

/// A keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Named(NamedKey),
    Character(char),
}

impl Key {
    pub const fn named(key: NamedKey) -> Self {
        Self::Named(key)
    }

    pub const fn character(c: char) -> Self {
        Self::Character(c)
    }
}

impl From<NamedKey> for Key {
    fn from(key: NamedKey) -> Self {
        Self::Named(key)
    }
}

/// Raw device state for one tick, as delivered by the input source.
#[derive(Debug, Clone, Default)]
pub struct InputSample {
    /// Monotonic game time in seconds. Drives key repeat and cursor blink.
    pub time: f64,
    pub mouse_position: Point,
    pub buttons_down: HashSet<MouseButton>,
    pub keys_down: HashSet<Key>,
    /// Wheel movement this tick, positive = away from the user.
    pub wheel_delta: f32,
    /// Text typed this tick (OS-level, after layout/shift/compose).
    pub text: String,
    pub modifiers: Modifiers,
}

impl InputSample {
    pub fn at(time: f64) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    /// Same device state at a later time.
    pub fn at_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_mouse(mut self, x: f32, y: f32) -> Self {
        self.mouse_position = Point::new(x, y);
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.buttons_down.insert(button);
        self
    }

    pub fn with_key(mut self, key: impl Into<Key>) -> Self {
        self.keys_down.insert(key.into());
        self
    }

    pub fn with_wheel(mut self, delta: f32) -> Self {
        self.wheel_delta = delta;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// Supplies one sample per frame.
pub trait InputSource {
    fn sample(&mut self) -> InputSample;
}

/// Replays a fixed list of samples, then repeats the last one.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    samples: VecDeque<InputSample>,
    last: InputSample,
}

impl ScriptedInput {
    pub fn new(samples: impl IntoIterator<Item = InputSample>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            last: InputSample::default(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self) -> InputSample {
        if let Some(next) = self.samples.pop_front() {
            self.last = next;
        }
        // Text and wheel are per-tick deltas; never replay them.
        InputSample {
            text: std::mem::take(&mut self.last.text),
            wheel_delta: std::mem::take(&mut self.last.wheel_delta),
            ..self.last.clone()
        }
    }
}

/// Key repeat timing, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepeatConfig {
    /// Hold time before the first repeat.
    pub delay: f64,
    /// Time between repeats after the first.
    pub interval: f64,
}

impl RepeatConfig {
    pub const MIN_INTERVAL: f64 = 0.001;

    pub fn new(delay: f64, interval: f64) -> Self {
        Self {
            delay: delay.max(0.0),
            interval: interval.max(Self::MIN_INTERVAL),
        }
    }
}

impl Default for RepeatConfig {
    fn default() -> Self {
        Self::new(0.4, 0.05)
    }
}

/// Keyboard/mouse snapshot for the current frame plus derived edges.
#[derive(Debug, Default)]
pub struct InputState {
    current: InputSample,
    previous_keys: HashSet<Key>,
    previous_buttons: HashSet<MouseButton>,
    previous_mouse: Point,
    consumed_keys: HashSet<Key>,
    consumed_buttons: HashSet<MouseButton>,
    wheel_consumed: bool,
    repeat: RepeatConfig,
    /// Game time at which each held key repeats next.
    next_repeat: HashMap<Key, f64>,
    /// Keys whose repeat fired on this frame.
    repeated: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repeat(repeat: RepeatConfig) -> Self {
        Self {
            repeat,
            ..Self::default()
        }
    }

    pub fn set_repeat(&mut self, repeat: RepeatConfig) {
        self.repeat = repeat;
    }

    pub fn repeat(&self) -> RepeatConfig {
        self.repeat
    }

    /// Roll to the next frame's sample.
    ///
    /// Clears consumption, derives press/release edges against the previous
    /// sample and fires key repeats whose time has come.
    pub fn advance(&mut self, sample: InputSample) {
        let previous = std::mem::replace(&mut self.current, sample);
        self.previous_keys = previous.keys_down;
        self.previous_buttons = previous.buttons_down;
        self.previous_mouse = previous.mouse_position;

        self.consumed_keys.clear();
        self.consumed_buttons.clear();
        self.wheel_consumed = false;
        self.repeated.clear();

        let now = self.current.time;
        let keys_down = &self.current.keys_down;
        self.next_repeat.retain(|key, _| keys_down.contains(key));

        for key in keys_down {
            if !self.previous_keys.contains(key) {
                self.next_repeat.insert(*key, now + self.repeat.delay);
                continue;
            }
            if let Some(next) = self.next_repeat.get_mut(key) {
                if now >= *next {
                    self.repeated.insert(*key);
                    // Long frames fire once, not once per missed interval.
                    while *next <= now {
                        *next += self.repeat.interval;
                    }
                }
            }
        }
    }

    // =====================================================================
    // Keyboard
    // =====================================================================

    /// Held this frame (level-triggered). Ignores consumption.
    pub fn is_key_down(&self, key: Key) -> bool {
        self.current.keys_down.contains(&key)
    }

    /// Down-transition on this frame and not yet consumed.
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.current.keys_down.contains(&key)
            && !self.previous_keys.contains(&key)
            && !self.consumed_keys.contains(&key)
    }

    /// Up-transition on this frame and not yet consumed.
    pub fn is_key_released(&self, key: Key) -> bool {
        !self.current.keys_down.contains(&key)
            && self.previous_keys.contains(&key)
            && !self.consumed_keys.contains(&key)
    }

    /// Pressed this frame, or held long enough that a repeat fired.
    pub fn is_key_pressed_with_repeat(&self, key: Key) -> bool {
        if self.consumed_keys.contains(&key) {
            return false;
        }
        self.is_key_pressed(key) || self.repeated.contains(&key)
    }

    /// Claim a key for the rest of the frame.
    pub fn consume_key(&mut self, key: Key) {
        self.consumed_keys.insert(key);
    }

    pub fn is_key_consumed(&self, key: Key) -> bool {
        self.consumed_keys.contains(&key)
    }

    /// Check-and-claim in one step. Returns whether the key was pressed.
    pub fn take_key_pressed(&mut self, key: Key) -> bool {
        let pressed = self.is_key_pressed(key);
        if pressed {
            self.consume_key(key);
        }
        pressed
    }

    /// Check-and-claim with repeat.
    pub fn take_key_pressed_with_repeat(&mut self, key: Key) -> bool {
        let pressed = self.is_key_pressed_with_repeat(key);
        if pressed {
            self.consume_key(key);
        }
        pressed
    }

    pub fn modifiers(&self) -> Modifiers {
        self.current.modifiers
    }

    /// Text typed this frame. Empty once taken.
    pub fn text_input(&self) -> &str {
        &self.current.text
    }

    /// Claim the typed text so no other component inserts it too.
    pub fn take_text_input(&mut self) -> String {
        std::mem::take(&mut self.current.text)
    }

    // =====================================================================
    // Mouse
    // =====================================================================

    pub fn mouse_position(&self) -> Point {
        self.current.mouse_position
    }

    /// Movement since the previous frame.
    pub fn mouse_delta(&self) -> Point {
        self.current.mouse_position - self.previous_mouse
    }

    /// Held this frame (level-triggered). Ignores consumption.
    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.current.buttons_down.contains(&button)
    }

    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.current.buttons_down.contains(&button)
            && !self.previous_buttons.contains(&button)
            && !self.consumed_buttons.contains(&button)
    }

    pub fn is_mouse_button_released(&self, button: MouseButton) -> bool {
        !self.current.buttons_down.contains(&button)
            && self.previous_buttons.contains(&button)
            && !self.consumed_buttons.contains(&button)
    }

    pub fn consume_mouse_button(&mut self, button: MouseButton) {
        self.consumed_buttons.insert(button);
    }

    pub fn is_mouse_button_consumed(&self, button: MouseButton) -> bool {
        self.consumed_buttons.contains(&button)
    }

    /// Wheel delta this frame, zero once consumed.
    pub fn wheel_delta(&self) -> f32 {
        if self.wheel_consumed {
            0.0
        } else {
            self.current.wheel_delta
        }
    }

    pub fn consume_wheel(&mut self) {
        self.wheel_consumed = true;
    }

    /// Game time of the current sample, in seconds.
    pub fn time(&self) -> f64 {
        self.current.time
    }
}
