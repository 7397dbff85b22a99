use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::error::{BillboardError, BillboardResult},
    scene::billboard::Billboard,
    scene::catalog::{BillboardRecord, Catalog},
};

/// Persists a committed billboard as the catalog default for a screenshot.
pub trait BillboardStore {
    /// Replace billboard `index` of `screenshot` in game `game_id` with `billboard`.
    fn save_default(
        &mut self,
        game_id: &str,
        screenshot: &str,
        index: usize,
        billboard: &Billboard,
    ) -> BillboardResult<()>;
}

impl BillboardStore for Catalog {
    fn save_default(
        &mut self,
        game_id: &str,
        screenshot: &str,
        index: usize,
        billboard: &Billboard,
    ) -> BillboardResult<()> {
        let shot = self.screenshot_mut(game_id, screenshot).ok_or_else(|| {
            BillboardError::validation(format!(
                "no screenshot '{screenshot}' in game '{game_id}'"
            ))
        })?;
        let count = shot.billboards.len();
        match shot.billboards.get_mut(index) {
            Some(rec) => rec.apply(billboard),
            // Appending directly after the last record is allowed; gaps are not.
            None if index == count => shot.billboards.push(BillboardRecord::from(billboard)),
            None => {
                return Err(BillboardError::validation(format!(
                    "billboard index {index} out of range (have {count})"
                )));
            }
        }
        Ok(())
    }
}

/// [`BillboardStore`] backed by a catalog JSON file on disk.
///
/// Each save reads the current file, patches one record and replaces the file through a
/// sibling `<path>.tmp` and a rename.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Catalog file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the catalog as currently stored.
    pub fn load(&self) -> BillboardResult<Catalog> {
        Catalog::from_path(&self.path)
    }

    fn write_atomic(&self, catalog: &Catalog) -> BillboardResult<()> {
        let text = catalog.to_json_string()?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, text.as_bytes())
            .with_context(|| format!("write temp catalog '{}'", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace catalog '{}'", self.path.display()))?;
        Ok(())
    }
}

impl BillboardStore for JsonFileStore {
    #[tracing::instrument(skip(self, billboard), fields(path = %self.path.display()))]
    fn save_default(
        &mut self,
        game_id: &str,
        screenshot: &str,
        index: usize,
        billboard: &Billboard,
    ) -> BillboardResult<()> {
        let mut catalog = self.load()?;
        catalog.save_default(game_id, screenshot, index, billboard)?;
        self.write_atomic(&catalog)?;
        tracing::debug!(billboard = %billboard.id, "saved billboard default");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/store.rs"]
mod tests;
