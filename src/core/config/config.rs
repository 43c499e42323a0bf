use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Serialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    /// Automatically close the app after this many seconds. 0.0 (or omitted) = run indefinitely.
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            title: "Blobby Bird".into(),
            auto_close: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SizeConfig {
    pub width: f32,
    pub height: f32,
}
impl SizeConfig {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}
impl Default for SizeConfig {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration in pixels/s^2 (negative = down).
    pub gravity_y: f32,
    pub pixels_per_meter: f32,
    /// Rapier wireframe overlay.
    pub debug_render: bool,
}
impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity_y: -981.0,
            pixels_per_meter: 100.0,
            debug_render: false,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Horizontal launch position; vertical launch position is always mid-screen.
    pub anchor_x: f32,
    /// Sprite size after scaling. Collider radius is a third of the width.
    pub size: SizeConfig,
    /// Upward velocity added per tap, in pixels/s. Applied to `Velocity` directly so the kick
    /// does not depend on the collider's mass.
    pub jump_speed: f32,
    pub tilt_factor: f32,
    pub tilt_min: f32,
    pub tilt_max: f32,
    /// Seconds per animation frame.
    pub frame_time: f32,
    pub frames: Vec<String>,
}
impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            anchor_x: 100.0,
            size: SizeConfig::new(60.0, 60.0),
            jump_speed: 450.0,
            tilt_factor: 0.001,
            tilt_min: -1.0,
            tilt_max: 0.5,
            frame_time: 0.1,
            frames: (1..=4)
                .map(|i| format!("sprites/frame-{i}.png"))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ObstacleConfig {
    pub width: f32,
    /// Lower bound of the height draw; the upper bound is half the window height minus this.
    pub min_height: f32,
    pub corner_radius: f32,
    /// Seconds between two spawns.
    pub spawn_interval: f32,
    /// Seconds an obstacle takes to cross the screen.
    pub traverse_duration: f32,
}
impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            width: 50.0,
            min_height: 50.0,
            corner_radius: 8.0,
            spawn_interval: 1.0,
            traverse_duration: 5.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct GameOverConfig {
    pub title: String,
    pub button_title: String,
    pub button_size: SizeConfig,
}
impl Default for GameOverConfig {
    fn default() -> Self {
        Self {
            title: "Game Over!".into(),
            button_title: "Play again".into(),
            button_size: SizeConfig::new(200.0, 44.0),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub obstacles: ObstacleConfig,
    pub game_over: GameOverConfig,
    /// Fixed RNG seed for obstacle generation; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
    /// Merge every readable layer in order (later files win field by field).
    /// Returns the config, the layers actually used and the per-layer errors.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(v) = incoming {
                            bm.insert(k, v);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        match &mut merged {
                            Some(cur) => merge_value(cur, val),
                            None => merged = Some(val),
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        let Some(val) = merged else {
            return (GameConfig::default(), used, errors);
        };
        match val.into_rust::<GameConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!(
                    "failed to deserialize merged config; using defaults: {e}"
                ));
                (GameConfig::default(), used, errors)
            }
        }
    }

    /// Exclusive upper bound of the obstacle height draw for the configured window.
    pub fn obstacle_max_height(&self) -> f32 {
        self.window.height / 2.0 - self.obstacles.min_height
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        if self.physics.gravity_y >= 0.0 {
            w.push(format!(
                "physics.gravity_y is {}; the player will not fall",
                self.physics.gravity_y
            ));
        }
        if self.physics.pixels_per_meter <= 0.0 {
            w.push("physics.pixels_per_meter must be > 0".into());
        }
        let p = &self.player;
        if p.size.width <= 0.0 || p.size.height <= 0.0 {
            w.push("player.size must be > 0".into());
        }
        if p.jump_speed <= 0.0 {
            w.push(format!(
                "player.jump_speed {} <= 0; taps will not lift the player",
                p.jump_speed
            ));
        }
        if p.tilt_min > p.tilt_max {
            w.push(format!(
                "player.tilt_min ({}) greater than tilt_max ({})",
                p.tilt_min, p.tilt_max
            ));
        }
        if p.frame_time <= 0.0 {
            w.push("player.frame_time must be > 0".into());
        }
        if p.frames.is_empty() {
            w.push("player.frames is empty; player renders as a flat sprite".into());
        }
        let o = &self.obstacles;
        if o.width <= 0.0 {
            w.push("obstacles.width must be > 0".into());
        }
        if o.min_height <= 0.0 {
            w.push("obstacles.min_height must be > 0".into());
        }
        if o.corner_radius < 0.0 {
            w.push("obstacles.corner_radius negative".into());
        }
        if o.spawn_interval <= 0.0 {
            w.push("obstacles.spawn_interval must be > 0".into());
        }
        if o.traverse_duration <= 0.0 {
            w.push("obstacles.traverse_duration must be > 0".into());
        }
        let max_h = self.obstacle_max_height();
        if max_h <= o.min_height {
            w.push(format!(
                "obstacle height range [{}, {max_h}) is empty for window height {}; every obstacle uses min_height",
                o.min_height, self.window.height
            ));
        }
        let b = &self.game_over.button_size;
        if b.width <= 0.0 || b.height <= 0.0 {
            w.push("game_over.button_size must be > 0".into());
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_validate_clean() {
        let cfg = GameConfig::default();
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
        assert_eq!(cfg.obstacle_max_height(), 250.0);
        assert_eq!(cfg.player.frames.len(), 4);
        assert_eq!(cfg.player.frames[0], "sprites/frame-1.png");
    }

    #[test]
    fn parse_sample_config() {
        let sample = r#"(
            window: (width: 1024.0, height: 768.0, title: "Test"),
            physics: (gravity_y: -600.0, pixels_per_meter: 150.0),
            player: (anchor_x: 80.0, size: (width: 90.0, height: 90.0), jump_speed: 400.0),
            obstacles: (width: 60.0, spawn_interval: 1.5),
            game_over: (title: "Ouch"),
            seed: Some(7),
        )"#;
        let cfg = GameConfig::load_from_file(write_temp(sample).path()).expect("parse config");
        assert_eq!(cfg.window.width, 1024.0);
        assert_eq!(cfg.physics.pixels_per_meter, 150.0);
        assert_eq!(cfg.player.size.width, 90.0);
        assert_eq!(cfg.player.tilt_max, 0.5, "omitted fields keep defaults");
        assert_eq!(cfg.obstacles.width, 60.0);
        assert_eq!(cfg.obstacles.traverse_duration, 5.0);
        assert_eq!(cfg.game_over.title, "Ouch");
        assert_eq!(cfg.game_over.button_title, "Play again");
        assert_eq!(cfg.seed, Some(7));
        assert!(cfg.validate().is_empty(), "expected no warnings");
    }

    #[test]
    fn validate_detects_warnings() {
        let mut bad = GameConfig::default();
        bad.window.width = 0.0;
        bad.window.height = 120.0;
        bad.window.auto_close = -1.0;
        bad.physics.gravity_y = 10.0;
        bad.player.jump_speed = 0.0;
        bad.player.tilt_min = 1.0;
        bad.player.frames.clear();
        bad.obstacles.spawn_interval = 0.0;
        let warnings = bad.validate();
        let joined = warnings.join(" | ");
        assert!(joined.contains("window dimensions must be > 0"));
        assert!(joined.contains("window.autoClose"));
        assert!(joined.contains("physics.gravity_y"));
        assert!(joined.contains("player.jump_speed"));
        assert!(joined.contains("player.tilt_min"));
        assert!(joined.contains("player.frames is empty"));
        assert!(joined.contains("obstacles.spawn_interval"));
        assert!(joined.contains("height range"), "{joined}");
        assert_eq!(warnings.len(), 8, "{joined}");
    }

    #[test]
    fn load_or_default_missing_file() {
        let (cfg, err) = GameConfig::load_or_default("this/file/does/not/exist.ron");
        assert!(err.is_some());
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn layered_merge_overrides() {
        let base = r"(
            window: (width: 900.0),
            obstacles: (width: 40.0, min_height: 30.0),
        )";
        let override_one = r#"(
            window: (title: "Custom Title"),
            obstacles: (min_height: 70.0),
        )"#;
        let (cfg, used, errors) = GameConfig::load_layered([
            write_temp(base).path().to_path_buf(),
            write_temp(override_one).path().to_path_buf(),
        ]);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        assert_eq!(used.len(), 2);
        assert_eq!(cfg.window.width, 900.0);
        assert_eq!(cfg.window.title, "Custom Title");
        assert_eq!(cfg.obstacles.width, 40.0);
        assert_eq!(cfg.obstacles.min_height, 70.0);
        assert_eq!(cfg.window.height, WindowConfig::default().height);
    }

    #[test]
    fn layered_merge_adds_sections_missing_from_base() {
        let base = r"(window: (width: 900.0))";
        let override_one = r#"(game_over: (title: "Ouch"), seed: Some(11))"#;
        let (cfg, used, errors) = GameConfig::load_layered([
            write_temp(base).path().to_path_buf(),
            write_temp(override_one).path().to_path_buf(),
        ]);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        assert_eq!(used.len(), 2);
        assert_eq!(cfg.window.width, 900.0);
        assert_eq!(cfg.game_over.title, "Ouch");
        assert_eq!(cfg.seed, Some(11));
    }

    #[test]
    fn layered_skips_missing_layer() {
        let base = r"(player: (anchor_x: 120.0))";
        let (cfg, used, errors) = GameConfig::load_layered([
            write_temp(base).path().to_path_buf(),
            std::path::PathBuf::from("missing/game.local.ron"),
        ]);
        assert_eq!(used.len(), 1);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("read error"));
        assert_eq!(cfg.player.anchor_x, 120.0);
    }

    #[test]
    fn parse_autoclose_and_validate() {
        let sample = r"(window: (autoClose: 3.25))";
        let cfg = GameConfig::load_from_file(write_temp(sample).path()).expect("parse config");
        assert!((cfg.window.auto_close - 3.25).abs() < 1e-6);
        assert!(cfg.validate().is_empty());
    }

    // Helper: create a temp file with given contents; returns handle (kept for lifetime)
    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("tmp");
        f.write_all(contents.as_bytes()).unwrap();
        f
    }
}
