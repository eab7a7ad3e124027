// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative macros shared by the upkeep crates.
//!
//! - [`simple_display!`]: `Display` for enums whose variants print as fixed strings
//! - [`setters!`]: chainable setters for config structs with many defaults

/// Implement `Display` by mapping each enum variant to a string literal.
///
/// ```ignore
/// uk_core::simple_display! {
///     Priority {
///         Low => "low",
///         High => "high",
///     }
/// }
/// ```
#[macro_export]
macro_rules! simple_display {
    ($enum:ty { $( $variant:ident $(( $($ignore:tt)* ))? => $str:expr ),+ $(,)? }) => {
        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(match self {
                    $( Self::$variant $(( $($ignore)* ))? => $str, )+
                })
            }
        }
    };
}

/// Generate consuming setter methods inside an `impl` block.
///
/// - `into { field: Type }`: setter accepts `impl Into<Type>`
/// - `set { field: Type }`: setter accepts `Type`
/// - `option { field: Type }`: field is `Option<Type>`, setter wraps in `Some`
///
/// ```ignore
/// impl KeeperConfig {
///     uk_core::setters! {
///         set { bond: u128, poll_interval: Duration }
///     }
/// }
/// ```
#[macro_export]
macro_rules! setters {
    (
        $(into {
            $( $into_field:ident : $into_ty:ty ),* $(,)?
        })?
        $(set {
            $( $set_field:ident : $set_ty:ty ),* $(,)?
        })?
        $(option {
            $( $opt_field:ident : $opt_ty:ty ),* $(,)?
        })?
    ) => {
        $($(
            pub fn $into_field(mut self, v: impl Into<$into_ty>) -> Self {
                self.$into_field = v.into();
                self
            }
        )*)?

        $($(
            pub fn $set_field(mut self, v: $set_ty) -> Self {
                self.$set_field = v;
                self
            }
        )*)?

        $($(
            pub fn $opt_field(mut self, v: impl Into<$opt_ty>) -> Self {
                self.$opt_field = Some(v.into());
                self
            }
        )*)?
    };
}
