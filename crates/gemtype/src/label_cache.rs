// this_file: crates/gemtype/src/label_cache.rs

//! Rendered labels, kept for the life of the engine
//!
//! Status banners and error messages get drawn over and over with the same
//! text. Each (text, scale) pair is rendered once; later requests get the
//! same shared surface back. Entries are only dropped with the cache.

use std::sync::Arc;

use parking_lot::Mutex;

use gemtype_core::{error::Result, types::Surface};

struct LabelEntry {
    text: String,
    scale: f32,
    surface: Arc<Surface>,
}

/// Append-only label store, safe to share between render threads
#[derive(Default)]
pub struct LabelCache {
    entries: Mutex<Vec<LabelEntry>>,
}

impl LabelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The surface stored for exactly this text and scale, if any
    pub fn get(&self, text: &str, scale: f32) -> Option<Arc<Surface>> {
        self.entries
            .lock()
            .iter()
            .find(|e| e.scale == scale && e.text == text)
            .map(|e| Arc::clone(&e.surface))
    }

    /// Return the stored surface or render, store and return a new one
    ///
    /// The lock is held while rendering, so two threads asking for the same
    /// label at once still end up with one surface. A failed render stores
    /// nothing.
    pub fn get_or_render<F>(&self, text: &str, scale: f32, render: F) -> Result<Arc<Surface>>
    where
        F: FnOnce() -> Result<Surface>,
    {
        let mut entries = self.entries.lock();
        if let Some(entry) = entries.iter().find(|e| e.scale == scale && e.text == text) {
            log::trace!("Label cache hit for {:?} at {}", text, scale);
            return Ok(Arc::clone(&entry.surface));
        }

        let surface = Arc::new(render()?);
        entries.try_reserve(1)?;
        entries.push(LabelEntry {
            text: text.to_owned(),
            scale,
            surface: Arc::clone(&surface),
        });
        log::debug!(
            "Cached label {:?} at {} ({} labels)",
            text,
            scale,
            entries.len()
        );
        Ok(surface)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl std::fmt::Debug for LabelCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelCache")
            .field("labels", &self.len())
            .finish()
    }
}
