//! Persistent mapping from design layer names to existing components.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Version written to new registry documents.
pub const REGISTRY_VERSION: &str = "1.0";

/// Maps a design layer name to a component in the target codebase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentMapping {
    /// Trigger text, matched case-insensitively as a substring of node names.
    pub figma_name: String,
    /// Component identifier used as the JSX tag.
    pub component: String,
    /// Import path of the component module.
    pub path: String,
    /// Extra props rendered on every use of the component.
    #[serde(default)]
    pub props: IndexMap<String, Value>,
}

impl ComponentMapping {
    pub fn new(
        figma_name: impl Into<String>,
        component: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            figma_name: figma_name.into(),
            component: component.into(),
            path: path.into(),
            props: IndexMap::new(),
        }
    }

    /// Add a prop.
    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    /// Named import statement for the component.
    pub fn import_line(&self) -> String {
        format!("import {{ {} }} from '{}';", self.component, self.path)
    }
}

/// On-disk registry layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryDocument {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub mappings: Vec<ComponentMapping>,
}

impl Default for RegistryDocument {
    fn default() -> Self {
        Self {
            version: default_version(),
            mappings: Vec::new(),
        }
    }
}

fn default_version() -> String {
    REGISTRY_VERSION.to_string()
}

/// Storage backend for a registry document.
pub trait RegistryStore {
    /// Load the stored document. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<RegistryDocument>>;

    /// Replace the stored document.
    fn save(&mut self, document: &RegistryDocument) -> Result<()>;
}

/// Registry stored as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RegistryStore for JsonFileStore {
    fn load(&self) -> Result<Option<RegistryDocument>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn save(&mut self, document: &RegistryDocument) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut text = serde_json::to_string_pretty(document)?;
        text.push('\n');
        fs::write(&self.path, text)?;
        Ok(())
    }
}

/// In-memory store, mainly for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: Option<RegistryDocument>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing document.
    pub fn with_document(document: RegistryDocument) -> Self {
        Self {
            document: Some(document),
            saves: 0,
        }
    }

    /// Number of completed saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl RegistryStore for MemoryStore {
    fn load(&self) -> Result<Option<RegistryDocument>> {
        Ok(self.document.clone())
    }

    fn save(&mut self, document: &RegistryDocument) -> Result<()> {
        self.document = Some(document.clone());
        self.saves += 1;
        Ok(())
    }
}

/// Component mappings backed by a [`RegistryStore`].
///
/// Mappings are only ever added or updated; nothing here removes one.
pub struct ComponentRegistry {
    store: Box<dyn RegistryStore>,
    document: RegistryDocument,
}

impl ComponentRegistry {
    /// Open a registry. A missing or unreadable document yields an empty
    /// registry.
    pub fn open<S: RegistryStore + 'static>(store: S) -> Self {
        let document = match store.load() {
            Ok(Some(document)) => document,
            Ok(None) => {
                info!("Registry not found, starting empty");
                RegistryDocument::default()
            }
            Err(err) => {
                warn!(error = err.to_string().as_str(); "Failed to load registry, starting empty");
                RegistryDocument::default()
            }
        };
        debug!(mappings = document.mappings.len(); "Opened component registry");

        Self {
            store: Box::new(store),
            document,
        }
    }

    /// Registry with no backing file.
    pub fn in_memory(mappings: Vec<ComponentMapping>) -> Self {
        Self::open(MemoryStore::with_document(RegistryDocument {
            mappings,
            ..Default::default()
        }))
    }

    pub fn mappings(&self) -> &[ComponentMapping] {
        &self.document.mappings
    }

    pub fn is_empty(&self) -> bool {
        self.document.mappings.is_empty()
    }

    /// Register a mapping and persist the registry.
    ///
    /// An existing mapping whose trigger matches case-insensitively is updated
    /// in place; otherwise the mapping is appended.
    pub fn register(&mut self, mapping: ComponentMapping) -> Result<()> {
        let trigger = mapping.figma_name.to_lowercase();
        match self
            .document
            .mappings
            .iter_mut()
            .find(|existing| existing.figma_name.to_lowercase() == trigger)
        {
            Some(existing) => {
                debug!(figma_name = mapping.figma_name.as_str(); "Updating component mapping");
                existing.component = mapping.component;
                existing.path = mapping.path;
                existing.props = mapping.props;
            }
            None => {
                debug!(figma_name = mapping.figma_name.as_str(); "Adding component mapping");
                self.document.mappings.push(mapping);
            }
        }
        self.store.save(&self.document)
    }

    /// Find the mapping for a node name.
    ///
    /// Longer triggers are tried first so that "Primary Button" wins over
    /// "Button". Triggers of equal length keep registration order.
    pub fn find_match(&self, node_name: &str) -> Option<&ComponentMapping> {
        let name = node_name.to_lowercase();
        let mut candidates: Vec<&ComponentMapping> = self
            .document
            .mappings
            .iter()
            .filter(|mapping| !mapping.figma_name.is_empty())
            .collect();
        candidates.sort_by_key(|mapping| std::cmp::Reverse(mapping.figma_name.chars().count()));
        candidates
            .into_iter()
            .find(|mapping| name.contains(&mapping.figma_name.to_lowercase()))
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("mappings", &self.document.mappings)
            .finish_non_exhaustive()
    }
}
