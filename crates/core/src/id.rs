// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! String identifiers assigned outside this process.
//!
//! Provider names come from configuration and registration handles come back
//! from a provider's confirmation receipt, so neither is generated locally.

/// Define a newtype identifier wrapping `SmolStr`.
///
/// Generates `new()`, `as_str()`, `Display`, `From<&str>`, `From<String>`,
/// `PartialEq<str>`, `PartialEq<&str>`, `Borrow<str>` and `Deref<Target = str>`.
///
/// ```ignore
/// define_id! {
///     /// Handle a provider returned for a deployed job.
///     pub struct RegistrationId;
/// }
/// ```
#[macro_export]
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub smol_str::SmolStr);

        impl $name {
            pub fn new(id: impl Into<smol_str::SmolStr>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }
    };
}

crate::define_id! {
    /// Name of an automation provider (`keeper`, `relay`, ...).
    ///
    /// Unique within one orchestrator; the selector and the job registry key
    /// assignments by it.
    pub struct ProviderId;
}

impl ProviderId {
    pub const KEEPER: &'static str = "keeper";
    pub const RELAY: &'static str = "relay";

    pub fn keeper() -> Self {
        Self::new(Self::KEEPER)
    }

    pub fn relay() -> Self {
        Self::new(Self::RELAY)
    }
}

crate::define_id! {
    /// Provider-native handle for a deployed job: an upkeep id for the
    /// keeper registry, a task id for the relay network.
    pub struct RegistrationId;
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
