//! Source registry keyed by location scheme
//!
//! Maps a scheme name (`file`, or anything the application registers) to a
//! constructor. The registry is an ordinary value owned by the embedding
//! migration engine; there is no global state.

use crate::error::{Error, Result};
use crate::source::{FileSource, Location, SourceDriver};
use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "config")]
use crate::config::SourceConfig;

/// Constructor turning a location string into an opened source
pub type SourceConstructor = Box<dyn Fn(&str) -> Result<Box<dyn SourceDriver>> + Send + Sync>;

/// Registry of source constructors by scheme
pub struct SourceRegistry {
    constructors: HashMap<String, SourceConstructor>,
}

impl SourceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registry with the built-in `file` scheme
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.constructors.insert(
            "file".to_string(),
            Box::new(|location: &str| {
                FileSource::open(location).map(|source| Box::new(source) as Box<dyn SourceDriver>)
            }),
        );
        registry
    }

    /// Register a constructor for `scheme`
    ///
    /// # Returns
    /// * `Ok(())` - If the scheme was free
    /// * `Err(Error)` - If a constructor is already registered for it
    pub fn register<F>(&mut self, scheme: impl Into<String>, constructor: F) -> Result<()>
    where
        F: Fn(&str) -> Result<Box<dyn SourceDriver>> + Send + Sync + 'static,
    {
        let scheme = scheme.into();
        if self.constructors.contains_key(&scheme) {
            return Err(Error::configuration(format!(
                "Migration source scheme '{}' is already registered",
                scheme
            )));
        }

        self.constructors.insert(scheme, Box::new(constructor));
        Ok(())
    }

    /// Open a location with the constructor registered for its scheme
    pub fn open(&self, location: &str) -> Result<Box<dyn SourceDriver>> {
        let parsed = Location::parse(location)?;
        let constructor = self
            .constructors
            .get(&parsed.scheme)
            .ok_or_else(|| Error::UnknownScheme(parsed.scheme.clone()))?;

        log::debug!("Opening migration source for scheme '{}'", parsed.scheme);
        constructor(location)
    }

    /// Open the source named by a configuration
    #[cfg(feature = "config")]
    pub fn open_config(&self, config: &SourceConfig) -> Result<Box<dyn SourceDriver>> {
        config.validate()?;
        self.open(&config.url)
    }

    pub fn has_scheme(&self, scheme: &str) -> bool {
        self.constructors.contains_key(scheme)
    }

    /// Registered schemes, sorted
    pub fn schemes(&self) -> Vec<String> {
        let mut schemes: Vec<String> = self.constructors.keys().cloned().collect();
        schemes.sort();
        schemes
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("schemes", &self.schemes())
            .finish()
    }
}
