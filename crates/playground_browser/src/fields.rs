//! Grouping of field metadata for the add-column menu.

use crate::PinnedFields;
use playground_core::FieldDescriptor;

/// Unpinned fields split into custom and system groups.
#[derive(Debug, Clone, Default, PartialEq, derive_getters::Getters)]
pub struct FieldGroups {
    /// Tenant-defined fields
    custom: Vec<FieldDescriptor>,
    /// Fields built into the model
    system: Vec<FieldDescriptor>,
}

impl FieldGroups {
    /// Whether any field can still be pinned.
    pub fn has_available(&self) -> bool {
        !self.custom.is_empty() || !self.system.is_empty()
    }

    /// Total number of fields across both groups.
    pub fn len(&self) -> usize {
        self.custom.len() + self.system.len()
    }

    /// Whether both groups are empty.
    pub fn is_empty(&self) -> bool {
        !self.has_available()
    }
}

/// Splits the fields that are not yet pinned into custom and system groups,
/// keeping the service's order within each group.
pub fn group_unpinned_fields(fields: &[FieldDescriptor], pinned: &PinnedFields) -> FieldGroups {
    let (custom, system) = fields
        .iter()
        .filter(|f| !pinned.contains(f.id()))
        .cloned()
        .partition(FieldDescriptor::is_custom);
    FieldGroups { custom, system }
}
