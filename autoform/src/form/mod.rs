//! Form assembly from one primary schema and any number of additional
//! schemata.
//!
//! Assembly runs in two phases over a per-pass working state
//! ([`AutoFields`]):
//! 1. **Fields** ([`process_fields`]): every schema contributes its fields,
//!    with widget, mode, omission and permission metadata applied, to the
//!    main field collection or to a group.
//! 2. **Moves** ([`process_field_moves`]): every schema's ordering
//!    directives are replayed, additional schemata first and the primary
//!    schema last.

pub mod assembly;
pub mod fields;
pub mod group;
pub mod moves;
pub mod process;

pub use assembly::{AutoFields, FormDeclaration, FormMode, PermissionChecker};
pub use fields::{prefixed_name, FieldCollection, FormField};
pub use group::{find_group, DeclaredGroup, Group, GroupFactory};
pub use moves::{move_field, process_field_moves};
pub use process::process_fields;
