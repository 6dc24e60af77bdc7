//! User configuration — keybindings, ruler appearance, scale and motion.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/ruler-tui/config.toml` (default `~/.config/ruler-tui/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Color;

use crate::core::error::RulerError;
use crate::core::motion::MotionConfig;
use crate::core::scale::Scale;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the ruler screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    StepLeft,
    StepRight,
    JumpMin,
    JumpMax,
    Apply,
    ClearInput,
    ToggleHelp,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help popup).
    pub const ALL: &[Action] = &[
        Action::StepLeft,
        Action::StepRight,
        Action::JumpMin,
        Action::JumpMax,
        Action::Apply,
        Action::ClearInput,
        Action::ToggleHelp,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::StepLeft => "Previous Tick",
            Action::StepRight => "Next Tick",
            Action::JumpMin => "Jump to Min",
            Action::JumpMax => "Jump to Max",
            Action::Apply => "Apply Typed Value",
            Action::ClearInput => "Clear Input",
            Action::ToggleHelp => "Toggle Help",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::StepLeft => "step_left",
            Action::StepRight => "step_right",
            Action::JumpMin => "jump_min",
            Action::JumpMax => "jump_max",
            Action::Apply => "apply",
            Action::ClearInput => "clear_input",
            Action::ToggleHelp => "toggle_help",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// Modifiers that take part in matching; platform keys like SUPER are ignored.
const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & MODIFIER_MASK) == (event.modifiers & MODIFIER_MASK)
    }

    /// User-friendly display string (e.g. `"Ctrl+c"`, `"←"`, `"q"`).
    pub fn display(&self) -> String {
        self.render(true)
    }

    /// Config-file form (e.g. `"Ctrl+c"`, `"Left"`, `"q"`).
    fn to_config_string(&self) -> String {
        self.render(false)
    }

    fn render(&self, arrows: bool) -> String {
        let mut s = String::new();
        for (flag, name) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(name);
            }
        }
        let key: String = match (self.code, arrows) {
            (KeyCode::Left, true) => "←".into(),
            (KeyCode::Right, true) => "→".into(),
            (KeyCode::Up, true) => "↑".into(),
            (KeyCode::Down, true) => "↓".into(),
            (KeyCode::Char(' '), _) => "Space".into(),
            (KeyCode::Char(c), _) => c.to_string(),
            (KeyCode::Left, false) => "Left".into(),
            (KeyCode::Right, false) => "Right".into(),
            (KeyCode::Up, false) => "Up".into(),
            (KeyCode::Down, false) => "Down".into(),
            (KeyCode::Enter, _) => "Enter".into(),
            (KeyCode::Esc, _) => "Esc".into(),
            (KeyCode::Tab, _) => "Tab".into(),
            (KeyCode::Home, _) => "Home".into(),
            (KeyCode::End, _) => "End".into(),
            (KeyCode::PageUp, _) => "PageUp".into(),
            (KeyCode::PageDown, _) => "PageDown".into(),
            (KeyCode::F(n), _) => format!("F{n}"),
            (other, _) => format!("{other:?}"),
        };
        s.push_str(&key);
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Left"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        for part in mods {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => KeyCode::F(k[1..].parse().ok()?),
            _ => {
                // Single characters keep their case (`?`, `H`).
                let mut chars = key_part.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                KeyCode::Char(c)
            }
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── ruler ─────────────

/// Appearance, scale and motion settings for the ruler.
#[derive(Debug, Clone, PartialEq)]
pub struct RulerConfig {
    pub indicator_color: Color,
    pub tick_color: Color,
    pub label_color: Color,
    /// Terminal stand-in for label text size: bold labels read larger.
    pub label_bold: bool,
    /// Lowest value on the scale, in whole units.
    pub min_number: i64,
    /// Highest value on the scale, in whole units.
    pub max_number: i64,
    /// Value selected at startup.
    pub current_number: f64,
    /// Columns between neighbouring ticks.
    pub tick_gap: f64,
    pub touch_slop: f64,
    pub min_fling_velocity: f64,
    pub max_fling_velocity: f64,
    pub fling_deceleration: f64,
    pub snap_duration_ms: u64,
    /// Interval between animation frames.
    pub frame_ms: u64,
}

impl Default for RulerConfig {
    fn default() -> Self {
        let motion = MotionConfig::default();
        Self {
            indicator_color: Color::Blue,
            tick_color: Color::Gray,
            label_color: Color::White,
            label_bold: false,
            min_number: 10,
            max_number: 50,
            current_number: 50.0,
            tick_gap: 2.0,
            touch_slop: motion.touch_slop,
            min_fling_velocity: motion.min_fling_velocity,
            max_fling_velocity: motion.max_fling_velocity,
            fling_deceleration: motion.fling_deceleration,
            snap_duration_ms: motion.snap_duration.as_millis() as u64,
            frame_ms: 16,
        }
    }
}

impl RulerConfig {
    pub fn scale(&self) -> Result<Scale, RulerError> {
        Scale::new(self.min_number, self.max_number, self.tick_gap)
    }

    pub fn motion(&self) -> MotionConfig {
        MotionConfig {
            touch_slop: self.touch_slop,
            min_fling_velocity: self.min_fling_velocity,
            max_fling_velocity: self.max_fling_velocity,
            fling_deceleration: self.fling_deceleration,
            snap_duration: Duration::from_millis(self.snap_duration_ms),
            ..MotionConfig::default()
        }
    }

    /// Set the tick gap, kept within 1–16 columns.
    pub fn set_tick_gap(&mut self, gap: f64) {
        self.tick_gap = gap.clamp(1.0, 16.0);
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    /// Apply one `key = value` line.  Returns `false` for unknown keys;
    /// unparsable values leave the current setting alone.
    fn apply(&mut self, key: &str, value: &str) -> bool {
        fn set<T: std::str::FromStr>(slot: &mut T, value: &str) {
            if let Ok(v) = value.parse() {
                *slot = v;
            }
        }
        fn set_non_negative(slot: &mut f64, value: &str) {
            match value.parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => *slot = v,
                _ => {}
            }
        }

        match key {
            "indicator_color" => set(&mut self.indicator_color, value),
            "tick_color" => set(&mut self.tick_color, value),
            "label_color" => set(&mut self.label_color, value),
            "label_bold" => self.label_bold = value == "true",
            "min_number" => set(&mut self.min_number, value),
            "max_number" => set(&mut self.max_number, value),
            "current_number" => set(&mut self.current_number, value),
            "tick_gap" => {
                if let Ok(gap) = value.parse() {
                    self.set_tick_gap(gap);
                }
            }
            "touch_slop" => set_non_negative(&mut self.touch_slop, value),
            "min_fling_velocity" => set_non_negative(&mut self.min_fling_velocity, value),
            "max_fling_velocity" => set_non_negative(&mut self.max_fling_velocity, value),
            "fling_deceleration" => {
                set(&mut self.fling_deceleration, value);
                // Zero friction would never stop.
                self.fling_deceleration = self.fling_deceleration.max(1.0);
            }
            "snap_duration_ms" => {
                set(&mut self.snap_duration_ms, value);
                self.snap_duration_ms = self.snap_duration_ms.min(2000);
            }
            "frame_ms" => {
                set(&mut self.frame_ms, value);
                self.frame_ms = self.frame_ms.clamp(5, 200);
            }
            _ => return false,
        }
        true
    }

    fn serialise(&self, lines: &mut Vec<String>) {
        lines.extend([
            "# Appearance (color names or #rrggbb)".to_string(),
            format!("indicator_color = {}", self.indicator_color),
            format!("tick_color = {}", self.tick_color),
            format!("label_color = {}", self.label_color),
            format!("label_bold = {}", self.label_bold),
            String::new(),
            "# Scale (whole units)".to_string(),
            format!("min_number = {}", self.min_number),
            format!("max_number = {}", self.max_number),
            format!("current_number = {}", self.current_number),
            format!("tick_gap = {}", self.tick_gap),
            String::new(),
            "# Motion (columns, columns/s, columns/s², milliseconds)".to_string(),
            format!("touch_slop = {}", self.touch_slop),
            format!("min_fling_velocity = {}", self.min_fling_velocity),
            format!("max_fling_velocity = {}", self.max_fling_velocity),
            format!("fling_deceleration = {}", self.fling_deceleration),
            format!("snap_duration_ms = {}", self.snap_duration_ms),
            format!("frame_ms = {}", self.frame_ms),
            String::new(),
        ]);
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration — keybindings and ruler settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub ruler: RulerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            ruler: RulerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Built-in keybindings.  Digits and `.` are reserved for the value input.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(StepLeft, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(StepRight, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(JumpMin, vec![KeyBind::new(Home, n)]);
        m.insert(JumpMax, vec![KeyBind::new(End, n)]);
        m.insert(Apply, vec![KeyBind::new(Enter, n)]);
        m.insert(ClearInput, vec![KeyBind::new(Esc, n)]);
        m.insert(ToggleHelp, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, bind)| bind.matches(event))
            .max_by_key(|(_, bind)| bind.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    /// Format the binding list for a given action (e.g. `"←/h"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "drag/flick to scroll | {}/{}: step | type + {}: set | {}: help | {}: quit",
            self.short_binding(Action::StepLeft),
            self.short_binding(Action::StepRight),
            self.short_binding(Action::Apply),
            self.short_binding(Action::ToggleHelp),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(err) => {
                tracing::debug!("no config at {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Persist current config to disk, returning where it was written.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    pub fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            if config.ruler.apply(key, value) {
                continue;
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::debug!("ignoring unknown config key {key:?}");
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec!["# ruler-tui configuration".to_string(), String::new()];
        self.ruler.serialise(&mut lines);
        lines.extend([
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Left, Right, Up, Down, Enter, Esc, Tab,".to_string(),
            "#   Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ]);

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/ruler-tui/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("ruler-tui").join("config.toml")
}
