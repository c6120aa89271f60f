use super::convention::{decide, guess, DECISION_TABLE};
use super::{parse_internal, RuleTable, Router};
use crate::error::RouterError;
use crate::registry::{FnRegistry, StaticRegistry};
use crate::route::{DEFAULT_ACTION, DEFAULT_CONTROLLER};

/// Registry answering every question with fixed booleans
fn fixed(module: bool, controller: bool) -> impl crate::registry::Registry {
    FnRegistry::new(move |_: &str| module, move |_: &str, _: &str| controller)
}

fn site_registry() -> StaticRegistry {
    StaticRegistry::new()
        .with_controller("News")
        .with_controller("Blog")
        .with_module("Blog", ["Post"])
        .with_module("Shop", ["Cart"])
}

#[test]
fn test_zero_segments_always_default() {
    for (m, c) in [(false, false), (true, false), (false, true), (true, true)] {
        let route = guess(&[], "html", &fixed(m, c)).unwrap();
        assert_eq!(route.module(), "");
        assert_eq!(route.controller(), DEFAULT_CONTROLLER);
        assert_eq!(route.action(), DEFAULT_ACTION);
        assert!(route.params().is_empty());
    }
}

#[test]
fn test_one_segment_module_wins_over_controller() {
    let route = guess(&["blog"], "html", &fixed(true, true)).unwrap();
    assert_eq!(route.module(), "Blog");
    assert_eq!(route.controller(), DEFAULT_CONTROLLER);
    assert_eq!(route.action(), DEFAULT_ACTION);
}

#[test]
fn test_one_segment_controller_then_action() {
    let route = guess(&["news"], "html", &fixed(false, true)).unwrap();
    assert_eq!(route.module(), "");
    assert_eq!(route.controller(), "News");
    assert_eq!(route.action(), DEFAULT_ACTION);

    let route = guess(&["contacts"], "json", &fixed(false, false)).unwrap();
    assert_eq!(route.controller(), DEFAULT_CONTROLLER);
    assert_eq!(route.action(), "Contacts");
    assert_eq!(route.format(), "json");
}

#[test]
fn test_two_segments() {
    let route = guess(&["blog", "post"], "html", &fixed(true, true)).unwrap();
    assert_eq!(
        (route.module(), route.controller(), route.action()),
        ("Blog", "Post", DEFAULT_ACTION)
    );

    let route = guess(&["blog", "archive"], "html", &fixed(true, false)).unwrap();
    assert_eq!(
        (route.module(), route.controller(), route.action()),
        ("Blog", DEFAULT_CONTROLLER, "Archive")
    );

    let route = guess(&["blog", "post"], "html", &fixed(false, true)).unwrap();
    assert_eq!(
        (route.module(), route.controller(), route.action()),
        ("", "Blog", "Post")
    );

    let err = guess(&["blog", "post"], "html", &fixed(false, false)).unwrap_err();
    assert_eq!(
        err,
        RouterError::RouteNotFound {
            path: "/blog/post".to_string()
        }
    );
}

#[test]
fn test_two_segments_root_controller_probe_has_no_module() {
    let registry = FnRegistry::new(
        |_: &str| false,
        |module: &str, name: &str| module.is_empty() && name == "blog",
    );
    let route = guess(&["blog", "post"], "html", &registry).unwrap();
    assert_eq!(route.controller(), "Blog");
    assert_eq!(route.action(), "Post");
}

#[test]
fn test_three_segments_need_module_and_controller() {
    let route = guess(&["shop", "cart", "add"], "html", &fixed(true, true)).unwrap();
    assert_eq!(
        (route.module(), route.controller(), route.action()),
        ("Shop", "Cart", "Add")
    );

    for (m, c) in [(false, false), (true, false), (false, true)] {
        assert!(guess(&["shop", "cart", "add"], "html", &fixed(m, c)).is_err());
    }
}

#[test]
fn test_four_or_more_segments_never_resolve() {
    for n in 4..8 {
        let segments: Vec<&str> = std::iter::repeat("x").take(n).collect();
        for (m, c) in [(false, false), (true, true)] {
            assert!(matches!(
                guess(&segments, "html", &fixed(m, c)),
                Err(RouterError::RouteNotFound { .. })
            ));
        }
    }
}

#[test]
fn test_decision_rows_are_mutually_exclusive() {
    // Every (module, root controller, module controller) answer combination
    // selects at most one row per arity.
    for arity in 0..=3 {
        let segments: Vec<&str> = ["a", "b", "c"][..arity].to_vec();
        for bits in 0..8u8 {
            let module = bits & 1 != 0;
            let root_controller = bits & 2 != 0;
            let module_controller = bits & 4 != 0;
            let registry = FnRegistry::new(
                move |_: &str| module,
                move |m: &str, _: &str| {
                    if m.is_empty() {
                        root_controller
                    } else {
                        module_controller
                    }
                },
            );
            let matching = DECISION_TABLE
                .iter()
                .filter(|d| d.accepts(&segments, &registry))
                .count();
            assert!(matching <= 1, "arity {arity} bits {bits:03b}");
            if arity <= 1 {
                assert_eq!(matching, 1, "arity {arity} bits {bits:03b}");
            }
            assert_eq!(decide(&segments, &registry).is_some(), matching == 1);
        }
    }
}

#[test]
fn test_names_are_capitalized_regardless_of_url_casing() {
    let route = guess(&["sHOP", "cART", "aDD"], "html", &fixed(true, true)).unwrap();
    assert_eq!(route.module(), "SHOP");
    assert_eq!(route.controller(), "CART");
    assert_eq!(route.action(), "ADD");
}

#[test]
fn test_router_rule_table_hit() {
    let rules = RuleTable::from_pairs([("/a/<0>/b", "/m/<0>/show")]).unwrap();
    let router = Router::new(rules, StaticRegistry::new());
    let route = router.resolve("/a/X/b").unwrap();
    assert_eq!(route.module(), "m");
    assert_eq!(route.controller(), "X");
    assert_eq!(route.action(), "show");
    assert_eq!(route.format(), "html");
}

#[test]
fn test_router_rule_table_uses_extension_format() {
    let rules = RuleTable::from_pairs([("/shop/<0>", "/shop/cart/add(id=<0>,qty=1)")]).unwrap();
    let router = Router::new(rules, StaticRegistry::new());
    let route = router.resolve("/shop/5.json").unwrap();
    assert_eq!(route.format(), "json");
    let params: Vec<_> = route.params().iter().collect();
    assert_eq!(params, vec![("id", "5"), ("qty", "1")]);
}

#[test]
fn test_router_rule_names_are_not_capitalized() {
    let rules = RuleTable::from_pairs([("/cart", "/shop/cart/view")]).unwrap();
    let router = Router::new(rules, StaticRegistry::new());
    let route = router.resolve("/cart").unwrap();
    assert_eq!(route.module(), "shop");
    assert_eq!(route.controller(), "cart");
}

#[test]
fn test_router_malformed_rule_target_surfaces() {
    let rules = RuleTable::from_pairs([("/broken", "broken/target")]).unwrap();
    let router = Router::new(rules, site_registry());
    let err = router.resolve("/broken").unwrap_err();
    assert_eq!(
        err,
        RouterError::InvalidInternalPath {
            path: "broken/target".to_string()
        }
    );
}

#[test]
fn test_router_convention_fallback() {
    let router = Router::new(RuleTable::new(), site_registry());

    let route = router.resolve("/").unwrap();
    assert_eq!(route.to_internal_path(), "///");

    let route = router.resolve("/blog").unwrap();
    assert_eq!(route.module(), "Blog");
    assert_eq!(route.controller(), DEFAULT_CONTROLLER);

    let route = router.resolve("/news/archive.json").unwrap();
    assert_eq!(
        (route.module(), route.controller(), route.action()),
        ("", "News", "Archive")
    );
    assert_eq!(route.format(), "json");

    let route = router.resolve("/shop/cart/add").unwrap();
    assert_eq!(route.to_internal_path(), "/Shop/Cart/Add");
}

#[test]
fn test_router_not_found_names_base_path() {
    let router = Router::new(RuleTable::new(), site_registry());
    let err = router.resolve("/a/b/c/d.html").unwrap_err();
    assert_eq!(
        err,
        RouterError::RouteNotFound {
            path: "/a/b/c/d".to_string()
        }
    );

    let err = router.resolve("/unknown/thing").unwrap_err();
    assert_eq!(err.path(), "/unknown/thing");
}

#[test]
fn test_not_found_path_from_guess_vs_router() {
    let base = "//blog///x/y/z/w";
    let parts = super::segments(base);

    let err = guess(&parts, "html", &site_registry()).unwrap_err();
    assert_eq!(err.path(), "/blog/x/y/z/w");

    let router = Router::new(RuleTable::new(), site_registry());
    let err = router.resolve(base).unwrap_err();
    assert_eq!(err.path(), base);
}

#[test]
fn test_round_trip_through_canonical_path() {
    let rules = RuleTable::from_pairs([
        ("/item/<0>", "/shop/cart/add(id=<0>)"),
        ("/home", "///"),
        ("/page/<0>", "//<0>/"),
    ])
    .unwrap();
    let router = Router::new(rules, StaticRegistry::new());

    for url in ["/item/7", "/home", "/page/about"] {
        let route = router.resolve(url).unwrap();
        let reparsed = parse_internal(&route.to_internal_path()).unwrap();
        assert!(route.same_target(&reparsed), "{url}");
        // Params are not part of the canonical form.
        assert!(reparsed.params().is_empty());
    }
}

#[test]
fn test_router_custom_extensions_and_default_format() {
    let router = Router::new(RuleTable::new(), site_registry())
        .with_extensions(["xml", ".rss"])
        .unwrap()
        .with_default_format("json");
    assert_eq!(router.extensions(), &["xml".to_string(), "rss".to_string()]);

    let route = router.resolve("/news.rss").unwrap();
    assert_eq!(route.format(), "rss");
    assert_eq!(route.controller(), "News");

    let route = router.resolve("/news").unwrap();
    assert_eq!(route.format(), "json");

    assert!(Router::new(RuleTable::new(), site_registry())
        .with_extensions(["html", ""])
        .is_err());
}
