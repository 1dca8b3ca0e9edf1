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

//! End-to-end scenario covering insertion precedence, structural sharing, trailing slashes and
//! full splats together, rather than in isolation.

use test_log::test;

use crate::decode::{boolean, float, int, string};
use crate::shape::{full_splat, lit, nil, trailing_slash, var};
use crate::{create, route};

fn build_router() -> crate::Router<String> {
    create([
        route(lit("home", lit("about", nil())), || "about page".to_owned()),
        route(
            lit("home", var(int(), trailing_slash())),
            |id: i64| move || format!("Product Page. Product Id : {id}"),
        ),
        route(
            lit("home", var(float(), trailing_slash())),
            |number: f64| move || format!("Float page. number : {number}"),
        ),
        route(
            lit("contact", var(string(), var(int(), nil()))),
            |name: String| {
                move |number: i64| {
                    let name = name.clone();
                    move || format!("Contact page. Hi, {name}. Number {number}")
                }
            },
        ),
        route(
            lit("home", lit("products", full_splat())),
            || "full splat page".to_owned(),
        ),
        route(
            lit("home", var(string(), full_splat())),
            |s: String| move || format!("Wildcard page. {s}"),
        ),
        route(
            lit("contact", var(string(), var(boolean(), nil()))),
            |name: String| {
                move |call_me_later: bool| {
                    let name = name.clone();
                    move || format!("Contact Page2. Name {name}. Call me later: {call_me_later}")
                }
            },
        ),
        route(nil(), || "404 Not found".to_owned()),
    ])
}

#[test]
fn worked_example_matches_expectations() {
    let router = build_router();

    assert_eq!(router.match_uri("/home/about").as_deref(), Some("about page"));
    assert_eq!(router.match_uri("/home/about/"), None);
    assert_eq!(
        router.match_uri("/home/100001/").as_deref(),
        Some("Product Page. Product Id : 100001")
    );
    assert_eq!(
        router.match_uri("/home/100001.1/").as_deref(),
        Some("Float page. number : 100001.1")
    );
    assert_eq!(
        router.match_uri("/home/products/xyz\nabc").as_deref(),
        Some("full splat page")
    );
    assert_eq!(
        router.match_uri("/home/product1/").as_deref(),
        Some("Wildcard page. product1")
    );
    assert_eq!(
        router.match_uri("/contact/bikal/123456").as_deref(),
        Some("Contact page. Hi, bikal. Number 123456")
    );
    assert_eq!(
        router.match_uri("/contact/bob/false").as_deref(),
        Some("Contact Page2. Name bob. Call me later: false")
    );
    assert_eq!(router.match_uri("/").as_deref(), Some("404 Not found"));
    assert_eq!(router.match_uri(""), None);
}

#[test]
fn decoder_rejection_falls_through_to_a_later_sibling() {
    let router = build_router();
    // `123456` parses as int, so the earlier-declared `/contact/*/:int` wins over
    // `/contact/:string/:bool` even though both would otherwise match.
    assert!(router
        .match_uri("/contact/bikal/123456")
        .unwrap()
        .starts_with("Contact page."));
    // `false` does not parse as int, so the decoder rejection falls through to the
    // later-declared route without blocking on the first one.
    assert!(router
        .match_uri("/contact/bob/false")
        .unwrap()
        .starts_with("Contact Page2."));
}

#[test]
fn query_tokens_are_appended_after_path_tokens() {
    let router = create([route(
        lit("search", var(string(), nil())),
        |term: String| move || format!("search for {term}"),
    )]);
    // The path contributes only the `search` literal; the query's bare key `term` flattens to a
    // single token that fills the route's one declared variable, demonstrating that query tokens
    // are just more tokens appended to the same stream, not a separate matching phase.
    assert_eq!(
        router.match_uri("/search?term").as_deref(),
        Some("search for term")
    );
    // Leftover tokens after the shape is exhausted are not silently ignored.
    assert_eq!(router.match_uri("/search?term&extra"), None);
}

#[test]
fn building_the_same_router_twice_behaves_identically() {
    let a = build_router();
    let b = build_router();
    for uri in [
        "/home/about",
        "/home/100001/",
        "/contact/bikal/123456",
        "/",
        "",
    ] {
        assert_eq!(a.match_uri(uri), b.match_uri(uri));
    }
}
