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

//! Typed, ordered sequences of descriptors that fix a route's handler arity at compile time.
//!
//! A [`Shape`] is built bottom-up, terminator first: [`nil`], [`trailing_slash`] or
//! [`full_splat`] produce the tail, and [`lit`]/[`var`] prepend further components. Each [`var`]
//! contributes one argument to [`Shape::Args`], a right-nested pair type rather than a flat
//! tuple — `(T1, (T2, ()))` for two variables, `()` for none — which lets the handler be applied
//! by straightforward structural recursion without a bound on arity.
//!
//! The handler itself is curried to match: a zero-variable route is handled by `Fn() -> Output`,
//! a one-variable route by `Fn(T) -> G` where `G` handles the rest, and so on. This is enforced by
//! the [`Apply`] trait, which the compiler refuses to satisfy for a handler whose arity or
//! argument types disagree with the shape.

use std::any::Any;
use std::collections::VecDeque;

use crate::decode::Decoder;
use crate::descriptor::{Descriptor, VariableDescriptor};

/// One value decoded during a match, not yet downcast to its static type.
pub(crate) type RawBundle = VecDeque<Box<dyn Any + Send + Sync>>;

/// A typed, ordered sequence of route components.
///
/// See the module documentation for how shapes are built and how they determine a handler's
/// argument list. The actual descriptor/decode machinery lives on the crate-private
/// [`ShapeOps`] supertrait: callers outside this crate only ever need `Shape` as a bound.
pub trait Shape {
    /// The handler argument list this shape demands, as a right-nested pair type.
    type Args;
}

/// Crate-private half of [`Shape`]: how a shape lowers itself into trie edges and back into
/// handler arguments. Kept off the public trait so [`Descriptor`] never has to be public.
pub(crate) trait ShapeOps: Shape {
    /// Appends this shape's descriptors, in declaration order, to `out`.
    fn descriptors(&self, out: &mut Vec<Descriptor>);

    /// Pops one raw value per [`Var`] in this shape and downcasts it to its static type.
    ///
    /// # Panics
    ///
    /// Panics if the bundle runs out of entries or a downcast fails. Both indicate that the trie
    /// walk that produced `bundle` did not correspond to this shape — a corrupted router, not a
    /// recoverable condition (see the handler application invariant in the crate documentation).
    fn decode_args(bundle: &mut RawBundle) -> Self::Args;
}

/// Shape terminator: the route ends here, no trailing slash or splat.
#[derive(Debug, Clone, Copy, Default)]
pub struct End;

/// Shape terminator matching the empty token produced by a path ending in `/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithTrailingSlash;

/// Shape terminator matching zero or more remaining tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithFullSplat;

/// A literal path component prepended to `Rest`.
#[derive(Debug, Clone)]
pub struct Lit<Rest> {
    literal: String,
    rest: Rest,
}

/// A decoded variable prepended to `Rest`, contributing `T` to the handler's argument list.
#[derive(Debug, Clone)]
pub struct Var<T, Rest> {
    decoder: Decoder<T>,
    rest: Rest,
}

impl Shape for End {
    type Args = ();
}

impl ShapeOps for End {
    fn descriptors(&self, _out: &mut Vec<Descriptor>) {}

    fn decode_args(_bundle: &mut RawBundle) -> Self::Args {}
}

impl Shape for WithTrailingSlash {
    type Args = ();
}

impl ShapeOps for WithTrailingSlash {
    fn descriptors(&self, out: &mut Vec<Descriptor>) {
        out.push(Descriptor::TrailingSlash);
    }

    fn decode_args(_bundle: &mut RawBundle) -> Self::Args {}
}

impl Shape for WithFullSplat {
    type Args = ();
}

impl ShapeOps for WithFullSplat {
    fn descriptors(&self, out: &mut Vec<Descriptor>) {
        out.push(Descriptor::FullSplat);
    }

    fn decode_args(_bundle: &mut RawBundle) -> Self::Args {}
}

impl<Rest: Shape> Shape for Lit<Rest> {
    type Args = Rest::Args;
}

impl<Rest: ShapeOps> ShapeOps for Lit<Rest> {
    fn descriptors(&self, out: &mut Vec<Descriptor>) {
        out.push(Descriptor::Literal(self.literal.clone()));
        self.rest.descriptors(out);
    }

    fn decode_args(bundle: &mut RawBundle) -> Self::Args {
        Rest::decode_args(bundle)
    }
}

impl<T: Send + Sync + 'static, Rest: Shape> Shape for Var<T, Rest> {
    type Args = (T, Rest::Args);
}

impl<T: Send + Sync + 'static, Rest: ShapeOps> ShapeOps for Var<T, Rest> {
    fn descriptors(&self, out: &mut Vec<Descriptor>) {
        out.push(Descriptor::Variable(VariableDescriptor::from_decoder(&self.decoder)));
        self.rest.descriptors(out);
    }

    fn decode_args(bundle: &mut RawBundle) -> Self::Args {
        let raw = bundle
            .pop_front()
            .expect("matcher produced fewer values than the shape declares variables");
        let value = *raw
            .downcast::<T>()
            .expect("decoded value's type does not match this shape's variable type");
        (value, Rest::decode_args(bundle))
    }
}

/// Shape ending in `End`: no trailing slash, no splat.
pub fn nil() -> End {
    End
}

/// Shape ending in `TrailingSlash`.
pub fn trailing_slash() -> WithTrailingSlash {
    WithTrailingSlash
}

/// Shape ending in `FullSplat`, consuming the rest of the path.
pub fn full_splat() -> WithFullSplat {
    WithFullSplat
}

/// Prepends a literal path component to `rest`.
pub fn lit<Rest: Shape>(literal: impl Into<String>, rest: Rest) -> Lit<Rest> {
    Lit {
        literal: literal.into(),
        rest,
    }
}

/// Prepends a decoded variable to `rest`, contributing `T` to the handler's argument list.
pub fn var<T: Send + Sync + 'static, Rest: Shape>(decoder: Decoder<T>, rest: Rest) -> Var<T, Rest> {
    Var { decoder, rest }
}

/// A handler curried to match a shape's argument list.
///
/// Blanket-implemented for every `Fn() -> Output` (the `Args = ()` base case) and, recursively,
/// for every `Fn(T) -> G` where `G: Apply<Rest, Output>` (the `Args = (T, Rest)` case). A plain
/// closure chain such as `|i: i64| move || format!("id {i}")` satisfies this automatically; there
/// is no need to name the trait at the call site.
pub trait Apply<Args, Output> {
    /// Applies `self` to `args`, fully consuming the argument list.
    fn apply(&self, args: Args) -> Output;
}

impl<Output, F> Apply<(), Output> for F
where
    F: Fn() -> Output,
{
    fn apply(&self, _args: ()) -> Output {
        self()
    }
}

impl<T, Rest, Output, F, G> Apply<(T, Rest), Output> for F
where
    F: Fn(T) -> G,
    G: Apply<Rest, Output>,
{
    fn apply(&self, args: (T, Rest)) -> Output {
        let (value, rest) = args;
        self(value).apply(rest)
    }
}
