use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mvcroute::{RuleTable, Router, StaticRegistry};

fn example_rules() -> Vec<(String, String)> {
    let mut rules = vec![
        ("/post/<0>/comments/<1>".to_string(), "/blog/comment/show(post=<0>,id=<1>)".to_string()),
        ("/post/<0>".to_string(), "/blog/post/show(id=<0>)".to_string()),
        ("/archive/<0>-<1>".to_string(), "/blog/archive/month(year=<0>,month=<1>)".to_string()),
        ("/about".to_string(), "//page/show(slug=about)".to_string()),
    ];
    for i in 0..50 {
        rules.push((
            format!("/landing/{i}/<0>"),
            format!("/promo/landing/show(campaign={i},ref=<0>)"),
        ));
    }
    rules
}

fn example_registry() -> StaticRegistry {
    StaticRegistry::new()
        .with_controller("Page")
        .with_controller("News")
        .with_module("Blog", ["Post", "Comment", "Archive"])
        .with_module("Shop", ["Cart", "Checkout"])
}

fn bench_resolve_throughput(c: &mut Criterion) {
    let rules = RuleTable::from_pairs(example_rules()).expect("valid rules");
    let router = Router::new(rules, example_registry());

    c.bench_function("resolve_rule_table", |b| {
        let test_paths = [
            "/post/42",
            "/post/42/comments/7.json",
            "/archive/2024-05",
            "/about.html",
            "/landing/49/newsletter",
        ];
        b.iter(|| {
            for path in test_paths.iter() {
                let res = router.resolve(path);
                black_box(&res);
            }
        })
    });

    c.bench_function("resolve_convention", |b| {
        let test_paths = [
            "/",
            "/blog",
            "/news/latest.json",
            "/shop/cart/add",
            "/nowhere/at/all/really",
        ];
        b.iter(|| {
            for path in test_paths.iter() {
                let res = router.resolve(path);
                black_box(&res);
            }
        })
    });
}

criterion_group!(benches, bench_resolve_throughput);
criterion_main!(benches);
