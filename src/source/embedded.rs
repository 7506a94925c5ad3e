//! Embedded migration source backed by rust-embed

use super::MigrationSource;
use crate::error::Result;
use crate::storage::EmbeddedStore;
use rust_embed::RustEmbed;

/// Source over migrations embedded in the binary
pub type EmbeddedSource<E> = MigrationSource<EmbeddedStore<E>>;

impl<E: RustEmbed> MigrationSource<EmbeddedStore<E>> {
    /// Build a source from the embedded folder `E`, rooted at `subpath`
    pub fn embedded(subpath: impl AsRef<str>) -> Result<Self> {
        let store = EmbeddedStore::<E>::new(subpath);
        log::debug!("Opening embedded migration source {}", store.subpath());
        MigrationSource::new(store)
    }
}
