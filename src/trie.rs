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

//! The trie that backs [`crate::Router`]: a mutable builder keyed by [`Descriptor`], frozen into
//! an array-backed form for matching.
//!
//! Unlike a byte-prefix-compressed trie, edges here are never merged or split mid-component: a
//! full [`Descriptor`] is either shared between two routes (literal edges with identical text,
//! or variable edges whose decoders came from the same construction act) or it is not, and each
//! node's children are scanned in the order they were first inserted. That insertion order is the
//! match-time precedence: see [`Trie::lookup`].

use crate::descriptor::Descriptor;
use crate::route::Route;

/// A node while the trie is still being built.
struct BuilderNode<Output> {
    route: Option<Route<Output>>,
    children: Vec<(Descriptor, BuilderNode<Output>)>,
}

impl<Output> Default for BuilderNode<Output> {
    fn default() -> Self {
        Self {
            route: None,
            children: Vec::new(),
        }
    }
}

impl<Output> BuilderNode<Output> {
    fn insert(&mut self, descriptors: &[Descriptor], route: Route<Output>) {
        match descriptors.split_first() {
            None => {
                if self.route.is_some() {
                    log::warn!("route overwritten for an already-registered path");
                }
                self.route = Some(route);
            }
            Some((descriptor, rest)) => {
                let existing = self.children.iter().position(|(d, _)| d == descriptor);
                let index = existing.unwrap_or_else(|| {
                    self.children.push((descriptor.clone(), BuilderNode::default()));
                    self.children.len() - 1
                });
                self.children[index].1.insert(rest, route);
            }
        }
    }
}

/// A node in the compiled, immutable trie.
struct Node<Output> {
    route: Option<Route<Output>>,
    children: Vec<(Descriptor, usize)>,
}

/// The compiled trie, ready for lookups.
///
/// Compilation just flattens the builder tree into a single vector addressed by index, so that
/// walking it never needs to follow pointers through boxed nodes.
pub(crate) struct Trie<Output> {
    nodes: Vec<Node<Output>>,
}

impl<Output> Trie<Output> {
    const ROOT: usize = 0;

    pub(crate) fn builder() -> TrieBuilder<Output> {
        TrieBuilder {
            root: BuilderNode::default(),
        }
    }

    /// Returns the node reached by following `descriptor` from `node`, if any edge accepts
    /// `token`, consuming `token` as part of the decision for `Variable` edges.
    ///
    /// The caller drives the walk; this only resolves a single step so that `Variable` decoding
    /// and `FullSplat`'s "consume everything" behavior stay in the matcher, where the collected
    /// bundle lives.
    pub(crate) fn children(&self, node: usize) -> &[(Descriptor, usize)] {
        &self.nodes[node].children
    }

    pub(crate) fn route(&self, node: usize) -> Option<&Route<Output>> {
        self.nodes[node].route.as_ref()
    }

    pub(crate) fn root() -> usize {
        Self::ROOT
    }
}

/// Builder for a [`Trie`].
pub(crate) struct TrieBuilder<Output> {
    root: BuilderNode<Output>,
}

impl<Output> TrieBuilder<Output> {
    /// Inserts `route` at the path described by `descriptors`. If a route already occupies that
    /// exact path, the new route wins; the previous one is discarded after a warning.
    pub(crate) fn push(&mut self, descriptors: Vec<Descriptor>, route: Route<Output>) {
        self.root.insert(&descriptors, route);
    }

    /// Flattens the builder tree into the compiled, array-backed representation.
    pub(crate) fn build(self) -> Trie<Output> {
        let mut nodes = Vec::new();
        flatten(self.root, &mut nodes);
        Trie { nodes }
    }
}

/// Appends `node` (and, recursively, its children) to `nodes`, returning `node`'s own index.
fn flatten<Output>(node: BuilderNode<Output>, nodes: &mut Vec<Node<Output>>) -> usize {
    let index = nodes.len();
    nodes.push(Node {
        route: None,
        children: Vec::new(),
    });

    let children: Vec<(Descriptor, usize)> = node
        .children
        .into_iter()
        .map(|(descriptor, child)| (descriptor, flatten(child, nodes)))
        .collect();

    nodes[index].route = node.route;
    nodes[index].children = children;
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;
    use crate::decode::int;
    use crate::route::route;
    use crate::shape::{lit, nil, var};

    #[test]
    fn sibling_literals_share_no_edge_but_preserve_order() {
        let mut builder = Trie::<&'static str>::builder();
        let a = route(lit("a", nil()), || "a");
        let b = route(lit("b", nil()), || "b");
        builder.push(a.descriptors.clone(), a);
        builder.push(b.descriptors.clone(), b);
        let trie = builder.build();

        let children = trie.children(Trie::<&'static str>::root());
        assert_eq!(children.len(), 2);
        assert!(matches!(&children[0].0, Descriptor::Literal(s) if s == "a"));
        assert!(matches!(&children[1].0, Descriptor::Literal(s) if s == "b"));
    }

    #[test]
    fn identical_prefix_is_shared_structurally() {
        let mut builder = Trie::<&'static str>::builder();
        let a = route(lit("home", var(int(), nil())), |_: i64| || "int");
        let b = route(lit("home", nil()), || "home");
        builder.push(a.descriptors.clone(), a);
        builder.push(b.descriptors.clone(), b);
        let trie = builder.build();

        let root_children = trie.children(Trie::<&'static str>::root());
        assert_eq!(root_children.len(), 1, "both routes share the \"home\" edge");
    }
}
