//! Simulation tuning and preferences
//!
//! Persisted as JSON next to the binary; every field has a default so partial
//! files load fine.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// AI difficulty preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Multiplier on the AI paddle's speed cap
    pub fn ai_speed_factor(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.6,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.5,
        }
    }

    /// Multiplier on the AI paddle's acceleration
    pub fn ai_acceleration_factor(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.6,
        }
    }
}

/// Failure to read or write a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings i/o error: {e}"),
            SettingsError::Json(e) => write!(f, "settings parse error: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e)
    }
}

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// AI difficulty preset
    pub difficulty: Difficulty,

    // === Court ===
    pub court_width: f32,
    pub court_height: f32,
    /// Thickness of the top and bottom walls
    pub wall_thickness: f32,
    /// Width of the scoring gates at either end
    pub gate_width: f32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between the court edge and a paddle's back face
    pub paddle_margin: f32,
    pub ai_max_speed: f32,
    pub ai_acceleration: f32,
    pub player_max_speed: f32,
    pub player_acceleration: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_speed: f32,
    /// Paddle hits stop speeding the ball up here
    pub ball_max_speed: f32,
    /// Serve angle off the horizontal (degrees)
    pub serve_angle_deg: f32,
    /// Speed gained per paddle hit
    pub speed_increment: f32,
    /// Half-width of the post-paddle rebound cone (degrees)
    pub rebound_cone_deg: f32,

    // === Obstacles ===
    pub obstacle_count: u32,
    pub circle_obstacle_count: u32,

    // === Collision ===
    /// Force a vertical rebound for impacts along a rectangle's diagonal
    pub diagonal_correction: bool,
    /// Angular window of the diagonal correction (radians)
    pub diagonal_tolerance: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,

            court_width: COURT_WIDTH,
            court_height: COURT_HEIGHT,
            wall_thickness: WALL_THICKNESS,
            gate_width: GATE_WIDTH,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_margin: PADDLE_MARGIN,
            ai_max_speed: AI_MAX_SPEED,
            ai_acceleration: AI_ACCELERATION,
            player_max_speed: PLAYER_MAX_SPEED,
            player_acceleration: PLAYER_ACCELERATION,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_START_SPEED,
            ball_max_speed: BALL_MAX_SPEED,
            serve_angle_deg: SERVE_ANGLE_DEG,
            speed_increment: SPEED_INCREMENT,
            rebound_cone_deg: REBOUND_CONE_DEG,

            obstacle_count: 3,
            circle_obstacle_count: 2,

            diagonal_correction: false,
            diagonal_tolerance: DIAGONAL_TOLERANCE,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset (applies preset defaults)
    pub fn from_preset(preset: Difficulty) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a difficulty preset to the AI kinematics
    pub fn apply_preset(&mut self, preset: Difficulty) {
        self.difficulty = preset;
        self.ai_max_speed = AI_MAX_SPEED * preset.ai_speed_factor();
        self.ai_acceleration = AI_ACCELERATION * preset.ai_acceleration_factor();
    }

    /// Vertical extent the paddles may use: between the walls
    pub fn area_height(&self) -> f32 {
        self.court_height - 2.0 * self.wall_thickness
    }

    /// Read a JSON settings file; the stored difficulty sets the AI kinematics
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let mut settings: Self = serde_json::from_str(&json)?;
        settings.apply_preset(settings.difficulty);
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Load from `path`, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}): {e}", path.display());
                Self::default()
            }
        }
    }
}
