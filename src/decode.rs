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

//! Named, typed parsers from a single path token to an optional value.

use std::fmt::{self, Debug};
use std::sync::{Arc, OnceLock};

use crate::witness::Witness;

/// A named parser from a token string to an optional value of type `T`.
///
/// `decode` must be a pure, total function: it never panics and never blocks. Returning `None`
/// means the token is rejected by this decoder, not that decoding failed in some exceptional way.
pub struct Decoder<T> {
    name: String,
    decode: Arc<dyn Fn(&str) -> Option<T> + Send + Sync>,
    pub(crate) witness: Witness,
}

impl<T> Decoder<T> {
    /// The name this decoder was constructed with, used only for diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the decoder against a single token.
    pub fn decode(&self, token: &str) -> Option<T> {
        (self.decode)(token)
    }
}

impl<T> Clone for Decoder<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            decode: self.decode.clone(),
            witness: self.witness,
        }
    }
}

impl<T> Debug for Decoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder").field("name", &self.name).finish()
    }
}

/// Constructs a user decoder with a fresh, globally unique witness.
///
/// Every call allocates a new witness, even when called twice with the same name and an
/// equivalent decode function: two separately constructed decoders are never considered the same
/// edge in a trie, as required by the witness invariant (see [`crate::witness::Witness`]).
pub fn create_decoder<T, F>(name: impl Into<String>, decode: F) -> Decoder<T>
where
    F: Fn(&str) -> Option<T> + Send + Sync + 'static,
{
    Decoder {
        name: name.into(),
        decode: Arc::new(decode),
        witness: Witness::fresh(),
    }
}

macro_rules! builtin_decoder {
    ($(#[$doc:meta])* $fn_name:ident, $name:literal, $ty:ty, $parse:expr) => {
        $(#[$doc])*
        pub fn $fn_name() -> Decoder<$ty> {
            static INSTANCE: OnceLock<Decoder<$ty>> = OnceLock::new();
            INSTANCE
                .get_or_init(|| create_decoder($name, $parse))
                .clone()
        }
    };
}

builtin_decoder!(
    /// The canonical `int` decoder, parsing a token as `i64`.
    int,
    "int",
    i64,
    |token: &str| token.parse::<i64>().ok()
);

builtin_decoder!(
    /// The canonical `int32` decoder, parsing a token as `i32`.
    int32,
    "int32",
    i32,
    |token: &str| token.parse::<i32>().ok()
);

builtin_decoder!(
    /// The canonical `int64` decoder, parsing a token as `i64`. Shares no edge with [`int`]: it
    /// is a distinct construction act even though the payload type is the same.
    int64,
    "int64",
    i64,
    |token: &str| token.parse::<i64>().ok()
);

builtin_decoder!(
    /// The canonical `float` decoder, parsing a token as `f64`.
    float,
    "float",
    f64,
    |token: &str| token.parse::<f64>().ok()
);

builtin_decoder!(
    /// The canonical `bool` decoder, parsing `"true"`/`"false"` tokens.
    boolean,
    "bool",
    bool,
    |token: &str| token.parse::<bool>().ok()
);

builtin_decoder!(
    /// The canonical `string` decoder. Accepts every token, decoding it verbatim.
    string,
    "string",
    String,
    |token: &str| Some(token.to_owned())
);

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn builtins_reject_and_accept() {
        assert_eq!(int().decode("42"), Some(42));
        assert_eq!(int().decode("abc"), None);
        assert_eq!(int().decode("4.2"), None);
        assert_eq!(int32().decode("42"), Some(42));
        assert_eq!(int32().decode("abc"), None);
        assert_eq!(float().decode("4.2"), Some(4.2));
        assert_eq!(boolean().decode("true"), Some(true));
        assert_eq!(boolean().decode("nope"), None);
        assert_eq!(string().decode("anything at all"), Some("anything at all".to_owned()));
    }

    #[test]
    fn builtin_is_a_single_canonical_construction() {
        assert_eq!(int().witness, int().witness);
        assert_ne!(int().witness, int64().witness);
        assert_ne!(int().witness, float().witness);
    }

    #[test]
    fn user_decoders_never_share_a_witness() {
        let a = create_decoder::<i64, _>("a", |s| s.parse().ok());
        let b = create_decoder::<i64, _>("a", |s| s.parse().ok());
        assert_ne!(a.witness, b.witness);
    }
}
