//! Study materials: an ordered list of bookmarked links.
//!
//! The list is kept sorted by `order`, and `order` is renumbered to the
//! element index after every structural change, so it is always dense
//! `0..n-1`.

use std::sync::Arc;

use studydash_core::codec::MATERIALS_KEY;
use studydash_core::material::{StudyMaterial, default_materials, normalize_url};

use crate::store::{self, KvStore};

/// Reasons a material cannot be added or renamed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MaterialError {
    /// Title is empty or whitespace.
    #[error("material title cannot be empty")]
    TitleEmpty,
    /// URL is empty or whitespace.
    #[error("material url cannot be empty")]
    UrlEmpty,
}

/// Owns the study materials list.
pub struct MaterialRegistry {
    materials: Vec<StudyMaterial>,
    store: Arc<dyn KvStore>,
}

impl MaterialRegistry {
    /// Loads materials from `store`, falling back to the built-in seeds.
    #[must_use]
    pub fn load(store: Arc<dyn KvStore>) -> Self {
        let mut materials: Vec<StudyMaterial> =
            store::load_snapshot(store.as_ref(), MATERIALS_KEY).unwrap_or_else(default_materials);
        materials.sort_by_key(|m| m.order);
        let mut registry = Self { materials, store };
        registry.renumber();
        registry.persist();
        registry
    }

    /// Adds a link at the end of the list.
    ///
    /// The URL gets `https://` prefixed unless it already starts with
    /// `http`; a blank description is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::TitleEmpty`] or [`MaterialError::UrlEmpty`]
    /// for blank input. The list is unchanged in either case.
    pub fn add_material(
        &mut self,
        title: &str,
        url: &str,
        description: Option<&str>,
    ) -> Result<StudyMaterial, MaterialError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(MaterialError::TitleEmpty);
        }
        if url.trim().is_empty() {
            return Err(MaterialError::UrlEmpty);
        }
        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_owned);

        let material = StudyMaterial::new(
            title.to_string(),
            normalize_url(url),
            description,
            self.materials.len(),
        );
        tracing::debug!(id = %material.id, url = %material.url, "material added");
        self.materials.push(material.clone());
        self.persist();
        Ok(material)
    }

    /// Deletes a material. Built-in entries and unknown ids are ignored.
    pub fn delete_material(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        if self.materials[index].is_seed() {
            tracing::debug!(id, "refusing to delete built-in material");
            return false;
        }
        self.materials.remove(index);
        self.renumber();
        self.persist();
        true
    }

    /// Changes a material's title. Blank titles are ignored.
    pub fn rename_material(&mut self, id: &str, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        let Some(index) = self.position(id) else {
            return false;
        };
        self.materials[index].title = title.to_string();
        self.persist();
        true
    }

    /// Moves `dragged_id` to the position held by `target_id`.
    ///
    /// The dragged entry is removed and reinserted at the target's index,
    /// then every entry's `order` is reassigned to its new index. Dropping
    /// an entry on itself, or naming an unknown id, does nothing.
    pub fn reorder(&mut self, dragged_id: &str, target_id: &str) -> bool {
        if dragged_id == target_id {
            return false;
        }
        let (Some(from), Some(to)) = (self.position(dragged_id), self.position(target_id)) else {
            return false;
        };
        let moved = self.materials.remove(from);
        self.materials.insert(to, moved);
        self.renumber();
        tracing::debug!(dragged_id, from, to, "materials reordered");
        self.persist();
        true
    }

    /// Materials in display order.
    #[must_use]
    pub fn materials(&self) -> &[StudyMaterial] {
        &self.materials
    }

    /// Looks up a material by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&StudyMaterial> {
        self.materials.iter().find(|m| m.id == id)
    }

    /// Number of materials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Returns `true` if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.materials.iter().position(|m| m.id == id)
    }

    fn renumber(&mut self) {
        for (index, material) in self.materials.iter_mut().enumerate() {
            material.order = index;
        }
    }

    fn persist(&self) {
        store::save_snapshot(self.store.as_ref(), MATERIALS_KEY, self.materials.as_slice());
    }
}

/// Opens a material's URL in the system browser.
///
/// Failures are logged and otherwise ignored.
pub fn open_in_browser(material: &StudyMaterial) {
    if let Err(err) = open::that_detached(&material.url) {
        tracing::warn!(url = %material.url, error = %err, "could not open browser");
    }
}
