//! Screen-capture permission gate.
//!
//! Only some platforms (macOS) require explicit user consent before pixels
//! can be captured. Everywhere else the gate is [`NoPermissionGate`], which
//! always reports [`PermissionState::Granted`], so callers never branch on
//! the platform themselves.

use serde::{Deserialize, Serialize};

/// OS-level screen capture authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    Granted,
    Denied,
    Undetermined,
}

impl PermissionState {
    pub fn is_granted(self) -> bool {
        self == PermissionState::Granted
    }
}

/// Query and request OS capture consent.
///
/// Implementations must read the state fresh from the OS on every call; the
/// user can revoke consent at any time outside the process.
pub trait PermissionGate: Send + Sync {
    /// Current state, without prompting the user.
    fn check(&self) -> PermissionState;

    /// Trigger the OS consent flow if consent is not yet granted.
    ///
    /// **May block** for an OS-determined, potentially unbounded time while
    /// the user responds. Callers that need to stay responsive must run this
    /// off their main control path.
    fn request(&self) -> bool;

    /// Whether this platform actually gates capture on consent.
    fn is_required(&self) -> bool {
        true
    }
}

/// Gate for platforms without a capture consent model.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPermissionGate;

impl PermissionGate for NoPermissionGate {
    fn check(&self) -> PermissionState {
        PermissionState::Granted
    }

    fn request(&self) -> bool {
        true
    }

    fn is_required(&self) -> bool {
        false
    }
}
