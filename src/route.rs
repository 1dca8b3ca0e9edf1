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

//! Pairs a [`Shape`] with a handler, erasing both behind a single closure the trie can store.

use std::fmt;
use std::sync::Arc;

use crate::descriptor::Descriptor;
use crate::shape::{Apply, RawBundle, Shape, ShapeOps};

/// A URI shape paired with a handler whose arity and argument types match it.
///
/// The correspondence between shape and handler is checked once, here, at construction time: see
/// [`route`].
#[derive(Clone)]
pub struct Route<Output> {
    pub(crate) descriptors: Vec<Descriptor>,
    apply: Arc<dyn Fn(&mut RawBundle) -> Output + Send + Sync>,
}

impl<Output> Route<Output> {
    pub(crate) fn apply(&self, bundle: &mut RawBundle) -> Output {
        (self.apply)(bundle)
    }
}

impl<Output> fmt::Debug for Route<Output> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("descriptors", &self.descriptors)
            .finish_non_exhaustive()
    }
}

/// Pairs `shape` with `handler`, producing a route ready for insertion into a [`crate::Router`].
///
/// `handler`'s type is fixed by `shape`: a shape with no variables demands `Fn() -> Output`, one
/// variable demands `Fn(T) -> impl Fn() -> Output`, and so on, one curry step per variable in
/// declaration order. A handler with the wrong arity or argument types simply doesn't compile —
/// there is no runtime arity check to get wrong.
// ShapeOps is sealed on purpose: it must not be nameable outside this crate.
#[allow(private_bounds)]
pub fn route<S, Output>(shape: S, handler: impl Apply<S::Args, Output> + Send + Sync + 'static) -> Route<Output>
where
    S: Shape + ShapeOps,
    Output: 'static,
{
    let mut descriptors = Vec::new();
    shape.descriptors(&mut descriptors);
    Route {
        descriptors,
        apply: Arc::new(move |bundle| {
            let args = S::decode_args(bundle);
            handler.apply(args)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;
    use crate::decode::int;
    use crate::shape::{nil, var};
    use std::collections::VecDeque;

    #[test]
    fn route_applies_its_handler() {
        let r = route(var(int(), nil()), |i: i64| move || format!("id {i}"));
        let mut bundle: RawBundle = VecDeque::new();
        bundle.push_back(Box::new(42i64));
        assert_eq!(r.apply(&mut bundle), "id 42");
    }
}
