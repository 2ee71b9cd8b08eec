//! On-disk model cache.
//!
//! One JSON artifact per entity at `<dir>/<slug>_<key hash>_gdp_model.json`. The
//! hash keeps names distinct for keys that share a slug. Writes go to a temporary
//! file in the same directory and are renamed into place.

use crate::error::Result;
use crate::forecast::FittedModel;
use crate::LOG_TARGET;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const ARTIFACT_SUFFIX: &str = "_gdp_model.json";

#[derive(Debug, Clone)]
pub struct ModelCache {
    dir: PathBuf,
}

impl ModelCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name stem for an entity: non-alphanumeric chars become `_`.
    pub fn slug(entity: &str) -> String {
        entity
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect()
    }

    /// Artifact file name: the slug plus the first 8 hex chars of the key's SHA-256.
    pub fn file_name(entity: &str) -> String {
        let digest = hex::encode(Sha256::digest(entity.as_bytes()));
        format!("{}_{}{}", Self::slug(entity), &digest[..8], ARTIFACT_SUFFIX)
    }

    pub fn path_for(&self, entity: &str) -> PathBuf {
        self.dir.join(Self::file_name(entity))
    }

    /// Fetch a usable model, or `None` when it is absent, unreadable, or stale.
    pub fn load(&self, entity: &str, fingerprint: &str) -> Result<Option<FittedModel>> {
        let path = self.path_for(entity);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let model: FittedModel = match serde_json::from_str(&raw) {
            Ok(model) => model,
            Err(e) => {
                log::warn!(
                    target: LOG_TARGET,
                    "Ignoring unreadable cached model {}: {}",
                    path.display(),
                    e
                );
                return Ok(None);
            }
        };

        if model.entity != entity {
            log::warn!(
                target: LOG_TARGET,
                "Cached model {} belongs to `{}`, not `{}`",
                path.display(),
                model.entity,
                entity
            );
            return Ok(None);
        }
        if !model.is_valid_for(entity, fingerprint) {
            log::debug!(target: LOG_TARGET, "Cached model for `{}` is stale", entity);
            return Ok(None);
        }

        Ok(Some(model))
    }

    pub fn store(&self, model: &FittedModel) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path_for(&model.entity);
        let tmp = self
            .dir
            .join(format!(".{}.tmp", Self::file_name(&model.entity)));
        std::fs::write(&tmp, serde_json::to_vec_pretty(model)?)?;
        std::fs::rename(&tmp, &path)?;

        log::debug!(target: LOG_TARGET, "Stored model for `{}` at {}", model.entity, path.display());
        Ok(path)
    }

    /// Delete the artifact for `entity`. Returns whether one existed.
    pub fn invalidate(&self, entity: &str) -> Result<bool> {
        match std::fs::remove_file(self.path_for(entity)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete every artifact in the cache directory. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            let is_artifact = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(ARTIFACT_SUFFIX));
            if is_artifact && path.is_file() {
                std::fs::remove_file(&path)?;
                removed += 1;
            }
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::LogLinearModel;
    use crate::test_utils::fixture_dir;

    fn model(entity: &str, fingerprint: &str) -> FittedModel {
        FittedModel {
            entity: entity.to_string(),
            last_period: 2023,
            fingerprint: fingerprint.to_string(),
            regression: LogLinearModel::fit(&[2022, 2023], &[1.0, 2.0]).unwrap(),
        }
    }

    #[test]
    fn slug_is_file_safe() {
        assert_eq!(ModelCache::slug("United States"), "United_States");
        assert_eq!(ModelCache::slug("../etc"), "___etc");
    }

    #[test]
    fn store_then_load() {
        let dir = fixture_dir("cache_roundtrip");
        let cache = ModelCache::new(dir.path().join("models"));
        let stored = model("South Africa", "f1");

        let path = cache.store(&stored).unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("South_Africa_"));
        assert!(name.ends_with("_gdp_model.json"));
        assert_eq!(name.len(), "South_Africa_".len() + 8 + "_gdp_model.json".len());
        assert_eq!(cache.load("South Africa", "f1").unwrap(), Some(stored));
        assert_eq!(std::fs::read_dir(cache.dir()).unwrap().count(), 1);
    }

    #[test]
    fn stale_or_foreign_models_miss() {
        let dir = fixture_dir("cache_stale");
        let cache = ModelCache::new(dir.path());
        cache.store(&model("India", "f1")).unwrap();

        assert_eq!(cache.load("India", "f2").unwrap(), None);
        assert_eq!(cache.load("Japan", "f1").unwrap(), None);

        // An artifact copied under another key's name is still refused
        std::fs::copy(cache.path_for("India"), cache.path_for("Japan")).unwrap();
        assert_eq!(cache.load("Japan", "f1").unwrap(), None);
    }

    #[test]
    fn keys_sharing_a_slug_get_separate_artifacts() {
        let dir = fixture_dir("cache_collision");
        let cache = ModelCache::new(dir.path());
        let spaced = model("United States", "f1");
        let underscored = model("United_States", "f1");

        assert_eq!(ModelCache::slug("United States"), ModelCache::slug("United_States"));
        assert_ne!(cache.path_for("United States"), cache.path_for("United_States"));

        cache.store(&spaced).unwrap();
        cache.store(&underscored).unwrap();

        assert_eq!(cache.load("United States", "f1").unwrap(), Some(spaced));
        assert_eq!(cache.load("United_States", "f1").unwrap(), Some(underscored));
        assert!(cache.invalidate("United_States").unwrap());
        assert!(cache.load("United States", "f1").unwrap().is_some());
    }

    #[test]
    fn corrupt_artifact_is_a_miss() {
        let dir = fixture_dir("cache_corrupt");
        let cache = ModelCache::new(dir.path());
        std::fs::write(cache.path_for("India"), "{not json").unwrap();

        assert_eq!(cache.load("India", "f1").unwrap(), None);
    }

    #[test]
    fn invalidate_and_clear() {
        let tmp = fixture_dir("cache_clear");
        let dir = tmp.path();
        let cache = ModelCache::new(dir);
        cache.store(&model("India", "f1")).unwrap();
        cache.store(&model("Japan", "f1")).unwrap();
        std::fs::write(dir.join("notes.txt"), "keep me").unwrap();

        assert!(cache.invalidate("India").unwrap());
        assert!(!cache.invalidate("India").unwrap());
        assert_eq!(cache.clear().unwrap(), 1);
        assert!(dir.join("notes.txt").exists());
        assert_eq!(ModelCache::new(dir.join("absent")).clear().unwrap(), 0);
    }
}
