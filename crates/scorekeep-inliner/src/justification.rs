//! Type-erased justification objects.
//!
//! A justification is a domain object "responsible for" a constraint match,
//! used only for score explanation. Type erasure lets one index hold
//! justifications of different entity types.

use std::any::Any;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Reference to a justification object involved in a constraint match.
#[derive(Clone)]
pub struct JustificationRef {
    /// Type name of the object (e.g., "Shift", "Employee").
    type_name: String,
    /// String representation for display.
    display: String,
    /// Type-erased object for programmatic access.
    object: Arc<dyn Any + Send + Sync>,
}

impl JustificationRef {
    /// Creates a justification reference from a concrete object.
    pub fn new<T: Clone + Debug + Send + Sync + 'static>(object: &T) -> Self {
        Self {
            type_name: std::any::type_name::<T>().to_string(),
            display: format!("{:?}", object),
            object: Arc::new(object.clone()),
        }
    }

    /// Creates a justification reference with a custom display string.
    pub fn with_display<T: Clone + Send + Sync + 'static>(object: &T, display: String) -> Self {
        Self {
            type_name: std::any::type_name::<T>().to_string(),
            display,
            object: Arc::new(object.clone()),
        }
    }

    /// Attempts to downcast to the concrete object type.
    pub fn as_object<T: 'static>(&self) -> Option<&T> {
        self.object.downcast_ref::<T>()
    }

    /// Returns the display string.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Returns the short type name (without module path).
    pub fn short_type_name(&self) -> &str {
        self.type_name
            .rsplit("::")
            .next()
            .unwrap_or(&self.type_name)
    }
}

impl Debug for JustificationRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JustificationRef")
            .field("type", &self.short_type_name())
            .field("display", &self.display)
            .finish()
    }
}

impl PartialEq for JustificationRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.display == other.display
    }
}

impl Eq for JustificationRef {}

impl Hash for JustificationRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_name.hash(state);
        self.display.hash(state);
    }
}
