//! The `games → screenshots → billboards` catalog document.
//!
//! Unknown keys at every level are kept in `extra` maps so a load/save cycle never drops
//! data written by other tools.

use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::core::Rect,
    foundation::error::{BillboardError, BillboardResult},
    foundation::json_num::whole_f64,
    geometry::quad::Quad,
    scene::billboard::{Billboard, BillboardId},
};

type Extra = serde_json::Map<String, serde_json::Value>;

/// Root catalog document.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Games in display order.
    pub games: Vec<Game>,
    /// Unrecognized top-level keys.
    #[serde(flatten)]
    pub extra: Extra,
}

/// One game and its screenshots.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Stable game id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Screenshots in display order.
    #[serde(default)]
    pub screenshots: Vec<Screenshot>,
    /// Unrecognized keys.
    #[serde(flatten)]
    pub extra: Extra,
}

/// One screenshot with its billboard layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screenshot {
    /// Image file name, relative to the screenshots directory.
    pub filename: String,
    /// Free-form banner size hint shown to users (for example `"1200x628"`).
    #[serde(default)]
    pub banner_size: String,
    /// Billboards on this screenshot.
    #[serde(default)]
    pub billboards: Vec<BillboardRecord>,
    /// Unrecognized keys.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Stored form of a [`Billboard`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillboardRecord {
    /// Stable billboard id.
    pub id: BillboardId,
    /// Bounding box left.
    #[serde(serialize_with = "whole_f64")]
    pub x: f64,
    /// Bounding box top.
    #[serde(serialize_with = "whole_f64")]
    pub y: f64,
    /// Bounding box width.
    #[serde(serialize_with = "whole_f64")]
    pub width: f64,
    /// Bounding box height.
    #[serde(serialize_with = "whole_f64")]
    pub height: f64,
    /// Opaque rotation value.
    #[serde(default, serialize_with = "whole_f64")]
    pub rotation: f64,
    /// Destination corners.
    pub perspective: Quad,
    /// Unrecognized keys.
    #[serde(flatten)]
    pub extra: Extra,
}

impl BillboardRecord {
    /// Live billboard for this record.
    pub fn to_billboard(&self) -> Billboard {
        Billboard {
            id: self.id.clone(),
            perspective: self.perspective,
            bounds: Rect::new(self.x, self.y, self.x + self.width, self.y + self.height),
            rotation: self.rotation,
        }
    }

    /// Overwrite the geometry fields from `billboard`, keeping `extra` untouched.
    pub fn apply(&mut self, billboard: &Billboard) {
        self.id = billboard.id.clone();
        self.x = billboard.bounds.x0;
        self.y = billboard.bounds.y0;
        self.width = billboard.bounds.width();
        self.height = billboard.bounds.height();
        self.rotation = billboard.rotation;
        self.perspective = billboard.perspective;
    }
}

impl From<&Billboard> for BillboardRecord {
    fn from(billboard: &Billboard) -> Self {
        let mut rec = Self {
            id: billboard.id.clone(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            perspective: billboard.perspective,
            extra: Extra::new(),
        };
        rec.apply(billboard);
        rec
    }
}

impl Catalog {
    /// Parse a catalog from JSON text.
    pub fn from_json_str(s: &str) -> BillboardResult<Self> {
        let catalog: Self =
            serde_json::from_str(s).map_err(|e| BillboardError::serde(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> BillboardResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| BillboardError::serde(e.to_string()))
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: &Path) -> BillboardResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read catalog '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check structural invariants: unique game ids, named screenshots, at least one
    /// billboard per screenshot.
    pub fn validate(&self) -> BillboardResult<()> {
        let mut seen = std::collections::BTreeSet::new();
        for game in &self.games {
            if game.id.trim().is_empty() {
                return Err(BillboardError::validation("game id must be non-empty"));
            }
            if !seen.insert(game.id.as_str()) {
                return Err(BillboardError::validation(format!(
                    "duplicate game id '{}'",
                    game.id
                )));
            }
            for shot in &game.screenshots {
                if shot.filename.trim().is_empty() {
                    return Err(BillboardError::validation(format!(
                        "game '{}' has a screenshot without filename",
                        game.id
                    )));
                }
                if shot.billboards.is_empty() {
                    return Err(BillboardError::validation(format!(
                        "screenshot '{}' must have at least one billboard",
                        shot.filename
                    )));
                }
            }
        }
        Ok(())
    }

    /// Game by id.
    pub fn game(&self, id: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }

    /// Screenshot by game id and file name.
    pub fn screenshot(&self, game_id: &str, filename: &str) -> Option<&Screenshot> {
        self.game(game_id)?
            .screenshots
            .iter()
            .find(|s| s.filename == filename)
    }

    /// Mutable screenshot by game id and file name.
    pub fn screenshot_mut(&mut self, game_id: &str, filename: &str) -> Option<&mut Screenshot> {
        self.games
            .iter_mut()
            .find(|g| g.id == game_id)?
            .screenshots
            .iter_mut()
            .find(|s| s.filename == filename)
    }
}

impl Screenshot {
    /// Live billboards for this screenshot, in record order.
    pub fn to_billboards(&self) -> Vec<Billboard> {
        self.billboards
            .iter()
            .map(BillboardRecord::to_billboard)
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/catalog.rs"]
mod tests;
