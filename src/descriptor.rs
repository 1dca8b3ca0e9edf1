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

//! A component descriptor is the label carried by one trie edge.

use std::any::Any;
use std::fmt::{self, Debug};
use std::sync::Arc;

use crate::decode::Decoder;
use crate::witness::Witness;

/// One edge label in the trie.
///
/// Two descriptors are considered the same edge (and hence merge during insertion) according to
/// the rules in the module documentation: literals compare by string equality, variables compare
/// by decoder witness, and `TrailingSlash`/`FullSplat` always compare equal to themselves.
#[derive(Clone)]
pub(crate) enum Descriptor {
    Literal(String),
    Variable(VariableDescriptor),
    TrailingSlash,
    FullSplat,
}

impl PartialEq for Descriptor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Variable(a), Self::Variable(b)) => a.witness == b.witness,
            (Self::TrailingSlash, Self::TrailingSlash) => true,
            (Self::FullSplat, Self::FullSplat) => true,
            _ => false,
        }
    }
}

impl Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => write!(f, "Literal({s:?})"),
            Self::Variable(v) => write!(f, "Variable({})", v.name),
            Self::TrailingSlash => write!(f, "TrailingSlash"),
            Self::FullSplat => write!(f, "FullSplat"),
        }
    }
}

/// A type-erased view of a [`Decoder`] suitable for storage as a trie edge label.
///
/// The decoded value is boxed as `dyn Any` here; [`crate::shape::Var`] downcasts it back to its
/// concrete type when the handler is applied, relying on the witness check performed during the
/// trie walk to guarantee the downcast succeeds.
#[derive(Clone)]
pub(crate) struct VariableDescriptor {
    pub(crate) witness: Witness,
    name: String,
    decode: Arc<dyn Fn(&str) -> Option<Box<dyn Any + Send + Sync>> + Send + Sync>,
}

impl VariableDescriptor {
    pub(crate) fn from_decoder<T: Send + Sync + 'static>(decoder: &Decoder<T>) -> Self {
        let decoder = decoder.clone();
        Self {
            witness: decoder.witness,
            name: decoder.name().to_owned(),
            decode: Arc::new(move |token| {
                let value: T = decoder.decode(token)?;
                let boxed: Box<dyn Any + Send + Sync> = Box::new(value);
                Some(boxed)
            }),
        }
    }

    pub(crate) fn decode(&self, token: &str) -> Option<Box<dyn Any + Send + Sync>> {
        (self.decode)(token)
    }
}
