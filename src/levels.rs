//! Landmark catalogue: which photo is shown and where on the map it is.
//! Embedded at compile time from `assets/levels.json`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{RAW_IMAGE_HEIGHT, RAW_IMAGE_WIDTH, RawPoint};

const EMBEDDED_LEVELS: &str = include_str!("../assets/levels.json");
const DEFAULT_MAP_IMAGE: &str = "assets/campus_map.svg";

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level catalogue is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level catalogue has no landmarks")]
    Empty,
    #[error("target of '{id}' ({x}, {y}) lies outside the {w}x{h} map", w = RAW_IMAGE_WIDTH, h = RAW_IMAGE_HEIGHT)]
    TargetOutOfBounds { id: String, x: f64, y: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: String,
    pub name: String,
    /// URL of the photo shown before guessing.
    pub photo: String,
    /// Where the landmark is, in raw map space.
    pub target: RawPoint,
}

impl Landmark {
    /// Stand-in level aimed at the centre of the map.
    pub fn map_centre() -> Self {
        Self {
            id: "center".into(),
            name: "Campus Center".into(),
            photo: "assets/landmarks/cas.svg".into(),
            target: RawPoint::new(RAW_IMAGE_WIDTH / 2.0, RAW_IMAGE_HEIGHT / 2.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelCatalog {
    pub map_image: String,
    pub landmarks: Vec<Landmark>,
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self {
            map_image: DEFAULT_MAP_IMAGE.to_string(),
            landmarks: vec![Landmark::map_centre()],
        }
    }
}

impl LevelCatalog {
    pub fn from_json(raw: &str) -> Result<Self, LevelError> {
        let catalog: LevelCatalog = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn embedded() -> Result<Self, LevelError> {
        Self::from_json(EMBEDDED_LEVELS)
    }

    fn validate(&self) -> Result<(), LevelError> {
        if self.landmarks.is_empty() {
            return Err(LevelError::Empty);
        }
        for lm in &self.landmarks {
            if !lm.target.in_bounds() {
                return Err(LevelError::TargetOutOfBounds {
                    id: lm.id.clone(),
                    x: lm.target.x,
                    y: lm.target.y,
                });
            }
        }
        Ok(())
    }

    /// Picks a landmark from a uniform sample in [0, 1).
    pub fn pick(&self, sample: f64) -> usize {
        let n = self.landmarks.len();
        ((sample.clamp(0.0, 1.0) * n as f64).floor() as usize).min(n.saturating_sub(1))
    }

    pub fn get(&self, idx: usize) -> Option<&Landmark> {
        self.landmarks.get(idx)
    }
}
