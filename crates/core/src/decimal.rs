// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Serde helpers for `u128` amounts.
//!
//! Use with `#[serde(with = "uk_core::decimal")]`. Amounts are written as
//! decimal strings; reading also accepts plain integers, since neither JSON
//! numbers nor TOML integers can carry a full `u128`.

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;

pub fn serialize<S: Serializer>(n: &u128, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&n.to_string())
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
    deserializer.deserialize_any(DecimalVisitor)
}

struct DecimalVisitor;

impl Visitor<'_> for DecimalVisitor {
    type Value = u128;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an unsigned integer or decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u128, E> {
        Ok(v as u128)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u128, E> {
        u128::try_from(v).map_err(|_| E::custom("negative amount"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u128, E> {
        v.trim().parse().map_err(E::custom)
    }
}

/// `Option<u128>` variant; pair with `#[serde(default)]`.
pub mod option {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    struct Wrapped(#[serde(with = "super")] u128);

    pub fn serialize<S: Serializer>(n: &Option<u128>, serializer: S) -> Result<S::Ok, S::Error> {
        match n {
            Some(n) => super::serialize(n, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u128>, D::Error> {
        Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(n)| n))
    }
}

#[cfg(test)]
#[path = "decimal_tests.rs"]
mod tests;
