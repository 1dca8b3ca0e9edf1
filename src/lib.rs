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

//! A statically typed URI router.
//!
//! A route is a [`shape`] — an ordered sequence of literals, typed variables, a trailing slash or
//! a full splat — paired with a handler whose argument list the shape fixes at compile time. Many
//! routes are compiled into a [`Router`], a trie keyed by path component that shares structure
//! between routes with a common prefix. Matching an incoming URI walks that trie, decoding one
//! token per variable, and finally applies the matched route's handler to the decoded values —
//! with no downcast that the type system didn't already prove would succeed.
//!
//! ```
//! use typetrie_router::decode::int;
//! use typetrie_router::shape::{lit, nil, trailing_slash, var};
//! use typetrie_router::{create, route};
//!
//! let router = create([
//!     route(lit("home", lit("about", nil())), || "about page".to_string()),
//!     route(
//!         lit("home", var(int(), trailing_slash())),
//!         |id: i64| move || format!("Product Page. Product Id : {id}"),
//!     ),
//!     route(nil(), || "404 Not found".to_string()),
//! ]);
//!
//! assert_eq!(router.match_uri("/home/about").as_deref(), Some("about page"));
//! assert_eq!(
//!     router.match_uri("/home/100001/").as_deref(),
//!     Some("Product Page. Product Id : 100001")
//! );
//! assert_eq!(router.match_uri("/").as_deref(), Some("404 Not found"));
//! assert_eq!(router.match_uri(""), None);
//! ```
//!
//! # What this crate does not do
//!
//! There is no textual route syntax here (no parsing of strings like `/home/:int/`) — that is a
//! syntactic front-end that would sit on top of [`shape`]'s constructors and is not part of this
//! crate. There is likewise no HTTP method filtering, no request/response handling, and no
//! backtracking across sibling edges once one has accepted a token: see [`Router::match_uri`] for
//! why that keeps matching linear in the number of path segments.

pub mod decode;
mod descriptor;
mod route;
pub mod shape;
mod trie;
mod witness;

#[cfg(test)]
mod tests;

pub use route::{route, Route};
pub use router::{create, Router, RouterBuilder};

mod router;
