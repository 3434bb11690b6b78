//! Security metadata handler: `read-permission`, `write-permission`.
//!
//! Only permission names are recorded. Whether a user holds a permission is
//! decided elsewhere.

use crate::metadata::MetadataStore;
use crate::model::{FieldDescriptor, SECURITY_NAMESPACE};

use super::{attribute, ns, AttributeNode, FieldMetadataHandler};

const READ_PERMISSION: &str = "read-permission";
const WRITE_PERMISSION: &str = "write-permission";

/// Reads and writes the permission attributes of a field.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecuritySchema;

impl FieldMetadataHandler for SecuritySchema {
    fn namespace(&self) -> &'static str {
        SECURITY_NAMESPACE
    }

    fn prefix(&self) -> &'static str {
        "security"
    }

    fn read(&self, node: &dyn AttributeNode, store: &mut MetadataStore, field: &FieldDescriptor) {
        if let Some(permission) = attribute(node, READ_PERMISSION, SECURITY_NAMESPACE) {
            store.set_read_permission(field.name.as_str(), Some(permission));
        }
        if let Some(permission) = attribute(node, WRITE_PERMISSION, SECURITY_NAMESPACE) {
            store.set_write_permission(field.name.as_str(), Some(permission));
        }
    }

    fn write(&self, node: &mut dyn AttributeNode, store: &MetadataStore, field: &FieldDescriptor) {
        if let Some(permission) = store.read_permission_for(&field.name) {
            node.set(&ns(READ_PERMISSION, SECURITY_NAMESPACE), permission);
        }
        if let Some(permission) = store.write_permission_for(&field.name) {
            node.set(&ns(WRITE_PERMISSION, SECURITY_NAMESPACE), permission);
        }
    }
}
