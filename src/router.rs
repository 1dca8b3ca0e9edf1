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

//! Tokenizes an input URI, walks the compiled trie, and dispatches into the matched handler.

use std::collections::VecDeque;
use std::fmt;

use crate::descriptor::Descriptor;
use crate::route::Route;
use crate::shape::RawBundle;
use crate::trie::Trie;

/// A compiled, immutable routing table.
///
/// Build one with [`Router::builder`] or [`create`], then resolve URIs with
/// [`Router::match_uri`]. A `Router` holds no interior mutability and is safe to share across
/// threads without synchronization: every field is fixed after [`RouterBuilder::build`] returns.
pub struct Router<Output> {
    trie: Trie<Output>,
}

impl<Output> Router<Output> {
    /// Returns a builder that routes can be pushed into before compiling the router.
    pub fn builder() -> RouterBuilder<Output> {
        RouterBuilder {
            trie: Trie::builder(),
        }
    }

    /// Matches `uri` against the routing table, returning the matched handler's result.
    ///
    /// Returns `None` if `uri` is empty (after trimming whitespace) or if no route accepts it.
    /// See the module documentation of [`crate::shape`] for what happens to argument types that
    /// don't match: that can only be a construction-time compile error, never a match-time
    /// failure.
    pub fn match_uri(&self, uri: &str) -> Option<Output> {
        let tokens = tokenize(uri)?;
        let mut tokens: VecDeque<&str> = tokens.iter().map(String::as_str).collect();
        let mut bundle: RawBundle = VecDeque::new();
        let node = walk(&self.trie, Trie::<Output>::root(), &mut tokens, &mut bundle)?;
        let route = self.trie.route(node)?;
        Some(route.apply(&mut bundle))
    }
}

impl<Output> fmt::Debug for Router<Output> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

/// Builder for a [`Router`]. Routes pushed earlier take precedence over routes pushed later
/// whenever both would match the same URI (see [`Router::match_uri`]).
pub struct RouterBuilder<Output> {
    trie: crate::trie::TrieBuilder<Output>,
}

impl<Output> fmt::Debug for RouterBuilder<Output> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterBuilder").finish_non_exhaustive()
    }
}

impl<Output> RouterBuilder<Output> {
    /// Adds `route` to the table. If a route already occupies the exact same shape, the new one
    /// replaces it (a warning is logged, insertion does not fail).
    pub fn push(&mut self, route: Route<Output>) {
        let descriptors = route.descriptors.clone();
        self.trie.push(descriptors, route);
    }

    /// Compiles the routing table. The result no longer supports insertion; build a new router to
    /// add routes.
    pub fn build(self) -> Router<Output> {
        Router {
            trie: self.trie.build(),
        }
    }
}

/// Builds a compiled [`Router`] directly from a list of routes, preserving their order as the
/// match-time precedence.
pub fn create<Output>(routes: impl IntoIterator<Item = Route<Output>>) -> Router<Output> {
    let mut builder = Router::builder();
    for route in routes {
        builder.push(route);
    }
    builder.build()
}

/// Splits a URI into its token stream: path segments followed by flattened query tokens.
///
/// Returns `None` for an empty (post-trim) URI; an empty token stream (for `uri == "/"`) is not
/// the same thing and is returned as `Some(vec![])`.
fn tokenize(uri: &str) -> Option<Vec<String>> {
    let uri = uri.trim();
    if uri.is_empty() {
        return None;
    }

    let (path, query) = match uri.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (uri, None),
    };

    let mut tokens = path_tokens(path);
    if let Some(query) = query {
        tokens.extend(query_tokens(query));
    }
    Some(tokens)
}

/// A leading `/` is stripped before splitting, so `"/"` alone yields zero tokens (matching a root
/// route declared with [`crate::shape::nil`]) while `"/foo/"` yields `["foo", ""]` (the trailing
/// empty token that [`crate::shape::trailing_slash`] matches).
fn path_tokens(path: &str) -> Vec<String> {
    let path = path.strip_prefix('/').unwrap_or(path);
    if path.is_empty() {
        Vec::new()
    } else {
        path.split('/').map(str::to_owned).collect()
    }
}

/// `k=v` becomes `[k, v]`; a bare `k` becomes `[k]`.
fn query_tokens(query: &str) -> Vec<String> {
    if query.is_empty() {
        return Vec::new();
    }
    let mut tokens = Vec::new();
    for pair in query.split('&') {
        match pair.split_once('=') {
            Some((key, value)) => {
                tokens.push(key.to_owned());
                tokens.push(value.to_owned());
            }
            None => tokens.push(pair.to_owned()),
        }
    }
    tokens
}

/// Walks the trie from `node`, committing to the first edge that accepts each token.
///
/// Once an edge is committed, there is no backtracking: a downstream mismatch fails the whole
/// match rather than trying a sibling edge that was skipped over. This keeps matching linear in
/// the number of tokens and makes precedence a direct consequence of insertion order.
fn walk<Output>(
    trie: &Trie<Output>,
    mut node: usize,
    tokens: &mut VecDeque<&str>,
    bundle: &mut RawBundle,
) -> Option<usize> {
    loop {
        let Some(token) = tokens.pop_front() else {
            return Some(node);
        };

        let mut next = None;
        for (descriptor, child) in trie.children(node) {
            match descriptor {
                Descriptor::Literal(literal) => {
                    if literal == token {
                        next = Some(*child);
                        break;
                    }
                }
                Descriptor::Variable(variable) => {
                    if let Some(value) = variable.decode(token) {
                        bundle.push_back(value);
                        next = Some(*child);
                        break;
                    }
                }
                Descriptor::TrailingSlash => {
                    if token.is_empty() {
                        next = Some(*child);
                        break;
                    }
                }
                Descriptor::FullSplat => {
                    tokens.clear();
                    next = Some(*child);
                    break;
                }
            }
        }

        node = next?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn path_tokens_root_is_empty() {
        assert_eq!(path_tokens("/"), Vec::<String>::new());
    }

    #[test]
    fn path_tokens_trailing_slash_leaves_empty_token() {
        assert_eq!(path_tokens("/home/about/"), vec!["home", "about", ""]);
    }

    #[test]
    fn path_tokens_no_trailing_slash() {
        assert_eq!(path_tokens("/home/about"), vec!["home", "about"]);
    }

    #[test]
    fn query_tokens_flatten_pairs_and_bare_keys() {
        assert_eq!(
            query_tokens("k=:int&q=:bool"),
            vec!["k", ":int", "q", ":bool"]
        );
        assert_eq!(query_tokens("q1=yes"), vec!["q1", "yes"]);
        assert_eq!(query_tokens("bare"), vec!["bare"]);
    }

    #[test]
    fn tokenize_empty_uri_is_none() {
        assert_eq!(tokenize(""), None);
        assert_eq!(tokenize("   "), None);
    }
}
