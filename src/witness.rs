// Copyright 2024 Wladimir Palant
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Per-decoder identity used to compare trie edges without knowing their payload type.
//!
//! A witness is allocated once per *construction act*: each call to
//! [`crate::decode::create_decoder`] gets a witness distinct from every other call, including
//! calls that happen to decode into the same Rust type. Built-in decoders are constructed exactly
//! once behind a `OnceLock`, so repeated calls to e.g. [`crate::decode::int`] always return a
//! decoder carrying the same witness and therefore merge into the same trie edge.

use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque per-decoder identity.
///
/// Two witnesses compare equal if and only if they were produced by the same construction act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Witness(u64);

impl Witness {
    /// Allocates a witness distinct from every other witness ever allocated in this process.
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn distinct_constructions_never_equal() {
        assert_ne!(Witness::fresh(), Witness::fresh());
    }

    #[test]
    fn witness_is_copy_and_reusable() {
        let w = Witness::fresh();
        let also_w = w;
        assert_eq!(w, also_w);
    }
}
