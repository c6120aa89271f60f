// Scalability and concurrency tests for the router
//
// A large rule table is scanned linearly; these tests make sure the last
// rule is still found, that misses fall through to conventions, and that one
// read-only router can be shared by many threads.

use super::{RuleTable, Router};
use crate::registry::{FnRegistry, Registry, StaticRegistry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

fn large_table(n: usize) -> RuleTable {
    RuleTable::from_pairs((0..n).map(|i| {
        (
            format!("/api/v1/resource{i}/<0>"),
            format!("/api/resource{i}/show(id=<0>)"),
        )
    }))
    .unwrap()
}

#[test]
fn test_router_with_many_rules_finds_last_rule() {
    let router = Router::new(large_table(500), StaticRegistry::new());

    for i in 0..100 {
        let route = router
            .resolve(&format!("/api/v1/resource499/{i}.json"))
            .unwrap();
        assert_eq!(route.controller(), "resource499");
        assert_eq!(route.params().get("id"), Some(i.to_string().as_str()));
        assert_eq!(route.format(), "json");
    }
}

#[test]
fn test_router_with_many_rules_falls_through_to_convention() {
    let registry = StaticRegistry::new().with_module("Reports", ["Daily"]);
    let router = Router::new(large_table(200), registry);

    let route = router.resolve("/reports/daily/export").unwrap();
    assert_eq!(route.module(), "Reports");
    assert_eq!(route.controller(), "Daily");
    assert_eq!(route.action(), "Export");
}

#[test]
fn test_router_shared_across_threads() {
    let registry = StaticRegistry::new()
        .with_controller("News")
        .with_module("Blog", ["Post"]);
    let router = Arc::new(Router::new(large_table(50), registry));

    thread::scope(|scope| {
        for t in 0..8 {
            let router = Arc::clone(&router);
            scope.spawn(move || {
                for i in 0..200 {
                    let route = router
                        .resolve(&format!("/api/v1/resource{}/{}", t, i))
                        .unwrap();
                    assert_eq!(route.controller(), format!("resource{t}"));

                    let route = router.resolve("/news/latest").unwrap();
                    assert_eq!(route.controller(), "News");
                    assert_eq!(route.action(), "Latest");
                }
            });
        }
    });
}

#[test]
fn test_oracles_called_per_probe_without_memoization() {
    struct Counting {
        modules: AtomicUsize,
        controllers: AtomicUsize,
    }

    impl Registry for Counting {
        fn exists_module(&self, _name: &str) -> bool {
            self.modules.fetch_add(1, Ordering::SeqCst);
            false
        }

        fn exists_controller(&self, _module: &str, _name: &str) -> bool {
            self.controllers.fetch_add(1, Ordering::SeqCst);
            false
        }
    }

    let counting = Arc::new(Counting {
        modules: AtomicUsize::new(0),
        controllers: AtomicUsize::new(0),
    });
    let router = Router::new(RuleTable::new(), Arc::clone(&counting));

    // One segment, nothing exists: the module probe runs for each of the
    // three rows, the controller probe for the two rows that reach it.
    let route = router.resolve("/contacts").unwrap();
    assert_eq!(route.action(), "Contacts");
    assert_eq!(counting.modules.load(Ordering::SeqCst), 3);
    assert_eq!(counting.controllers.load(Ordering::SeqCst), 2);

    // Resolving again asks again.
    router.resolve("/contacts").unwrap();
    assert_eq!(counting.modules.load(Ordering::SeqCst), 6);
}

#[test]
fn test_fn_registry_router_is_sync() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}

    let registry = FnRegistry::new(|m: &str| m == "blog", |_: &str, _: &str| false);
    let router = Router::new(RuleTable::new(), registry);
    assert_send_sync(&router);
    assert_eq!(router.resolve("/blog").unwrap().module(), "Blog");
}
