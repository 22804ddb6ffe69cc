//! Loading indicator wiring
//!
//! The host page may carry a spinner element per layer, looked up by the
//! derived id `"Spinner {name}"`. Absence of an indicator is not an error:
//! show/hide become no-ops. Updates are guarded by the owning layer
//! instance, not just the name, so a rapid detach/reattach of the same name
//! cannot receive indicator events from the previous attach cycle.

use std::sync::Mutex;

use crate::{layers::layer::LayerId, prelude::HashMap};

/// Derives the indicator element id for a layer name
pub fn spinner_id(layer_name: &str) -> String {
    format!("Spinner {layer_name}")
}

/// Host-page spinner contract
pub trait LoadingIndicator: Send + Sync {
    fn show(&self);
    fn hide(&self);
}

#[derive(Default)]
struct RegistryInner {
    indicators: HashMap<String, Box<dyn LoadingIndicator>>,
    /// Layer instance currently bound to each indicator id
    owners: HashMap<String, LayerId>,
}

/// Registry of loading indicators keyed by derived id
#[derive(Default)]
pub struct IndicatorRegistry {
    inner: Mutex<RegistryInner>,
}

impl IndicatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the host's indicator under a derived id
    pub fn register(&self, id: impl Into<String>, indicator: Box<dyn LoadingIndicator>) {
        let mut inner = self.inner.lock().expect("indicator registry poisoned");
        inner.indicators.insert(id.into(), indicator);
    }

    /// Drop the host's indicator for an id
    pub fn unregister(&self, id: &str) {
        let mut inner = self.inner.lock().expect("indicator registry poisoned");
        inner.indicators.remove(id);
        inner.owners.remove(id);
    }

    /// Record the layer instance that owns an indicator id from now on
    pub(crate) fn bind(&self, id: &str, owner: LayerId) {
        let mut inner = self.inner.lock().expect("indicator registry poisoned");
        inner.owners.insert(id.to_string(), owner);
    }

    /// Release an indicator id if `owner` still holds it, hiding the spinner
    /// so a detach mid-load does not leave it spinning
    pub(crate) fn release(&self, id: &str, owner: LayerId) {
        let mut inner = self.inner.lock().expect("indicator registry poisoned");
        if inner.owners.get(id) == Some(&owner) {
            inner.owners.remove(id);
            if let Some(indicator) = inner.indicators.get(id) {
                indicator.hide();
            }
        }
    }

    /// Show the indicator, provided `owner` is still the bound instance
    pub fn show(&self, id: &str, owner: LayerId) {
        let inner = self.inner.lock().expect("indicator registry poisoned");
        if inner.owners.get(id) == Some(&owner) {
            if let Some(indicator) = inner.indicators.get(id) {
                indicator.show();
            }
        }
    }

    /// Hide the indicator, provided `owner` is still the bound instance
    pub fn hide(&self, id: &str, owner: LayerId) {
        let inner = self.inner.lock().expect("indicator registry poisoned");
        if inner.owners.get(id) == Some(&owner) {
            if let Some(indicator) = inner.indicators.get(id) {
                indicator.hide();
            }
        }
    }

    /// The instance currently bound to an indicator id, if any
    pub fn owner(&self, id: &str) -> Option<LayerId> {
        let inner = self.inner.lock().expect("indicator registry poisoned");
        inner.owners.get(id).copied()
    }
}

impl std::fmt::Debug for IndicatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock().expect("indicator registry poisoned");
        f.debug_struct("IndicatorRegistry")
            .field("indicators", &inner.indicators.len())
            .field("owners", &inner.owners.len())
            .finish()
    }
}
