//! Castkit platform core contracts.
//!
//! This crate contains the cross-platform data model and capability seams
//! used by the capture engine without coupling to a concrete OS backend:
//!
//! - [`Source`] / [`SourceId`]: the normalized identity of a display or window
//! - [`SourceEnumerator`]: what every platform enumerator provides
//! - [`PermissionGate`]: OS capture consent, a no-op where the OS has none
//! - [`PlatformCapabilities`] / [`BackendId`]: what capture paths exist here

pub mod capability;
pub mod permission;
pub mod source;

pub use capability::*;
pub use permission::*;
pub use source::*;
