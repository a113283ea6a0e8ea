use orbit::Point;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    #[strum(serialize = "primary", serialize = "left", serialize = "1")]
    Primary,
    #[strum(serialize = "secondary", serialize = "right", serialize = "3")]
    Secondary,
}

/// Everything an outside caller may ask of the ball.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    Down { button: PointerButton, x: f64, y: f64 },
    Move {
        #[serde(default)]
        primary: bool,
        x: f64,
        y: f64,
    },
    Enter,
    Leave,
    Wait { ms: u64 },
    Reset,
    Frame,
}

impl Command {
    /// Screen position carried by pointer commands.
    pub fn position(&self) -> Option<Point> {
        match *self {
            Self::Down { x, y, .. } | Self::Move { x, y, .. } => Some(Point::new(x, y)),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Parses one JSON command per line. Blank lines and `#` comments are skipped.
pub fn parse_script(script: &str) -> Result<Vec<Command>, CommandError> {
    script
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| {
            serde_json::from_str(line.trim())
                .map_err(|source| CommandError::Parse { line: i + 1, source })
        })
        .collect()
}
