//! Integration tests for the two rankers.
//!
//! These run the sampler and the iterative solver on small hand-built graphs
//! with known answers, and check the two agree on larger ones.

use surfrank::{
    iterate_pagerank, iterate_pagerank_with_stats, sample_pagerank, ConvergenceCriterion, Error,
    LinkGraph, Method, RankConfig,
};

fn seeded() -> RankConfig {
    RankConfig::default().with_seed(2024)
}

/// Seven-page site in the shape of a small course corpus.
///
/// ```text
/// 1 -> 2          4 -> 2, 5
/// 2 -> 1, 3       5 -> 1, 2, 3, 4, 6
/// 3 -> 2, 4       6 -> 7
/// 7 -> (nothing)
/// ```
fn site() -> LinkGraph {
    LinkGraph::from_links([
        ("1.html", vec!["2.html"]),
        ("2.html", vec!["1.html", "3.html"]),
        ("3.html", vec!["2.html", "4.html"]),
        ("4.html", vec!["2.html", "5.html"]),
        ("5.html", vec!["1.html", "2.html", "3.html", "4.html", "6.html"]),
        ("6.html", vec!["7.html"]),
        ("7.html", vec![]),
    ])
    .unwrap()
}

#[test]
fn two_page_mutual_link() {
    let graph = LinkGraph::from_links([("A", vec!["B"]), ("B", vec!["A"])]).unwrap();

    let sampled = sample_pagerank(&graph, seeded()).unwrap();
    assert!((sampled.get("A").unwrap() - 0.5).abs() < 0.01);
    assert!((sampled.get("B").unwrap() - 0.5).abs() < 0.01);

    let iterated = iterate_pagerank(&graph, seeded()).unwrap();
    assert!((iterated.get("A").unwrap() - 0.5).abs() < 0.001);
    assert!((iterated.get("B").unwrap() - 0.5).abs() < 0.001);
}

#[test]
fn dangling_page_outranks_its_only_referrer() {
    let graph = LinkGraph::from_links([("A", vec!["B"]), ("B", vec![])]).unwrap();
    for method in Method::ALL {
        let ranks = method.rank(&graph, seeded()).unwrap();
        let (a, b) = (ranks.get("A").unwrap(), ranks.get("B").unwrap());
        assert!(b > a, "{}: A={a} B={b}", method.name());
    }
}

#[test]
fn single_isolated_page() {
    let graph = LinkGraph::from_links([("A", Vec::<&str>::new())]).unwrap();
    for method in Method::ALL {
        let ranks = method.rank(&graph, seeded()).unwrap();
        assert_eq!(ranks.len(), 1);
        assert!((ranks.get("A").unwrap() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn empty_graph_is_rejected_by_both() {
    let graph = LinkGraph::new();
    for method in Method::ALL {
        let err = method.rank(&graph, seeded()).unwrap_err();
        assert!(matches!(err, Error::InvalidGraph(_)), "{err:?}");
    }
}

#[test]
fn sampling_tracks_iteration_on_site() {
    let graph = site();
    let iterated = iterate_pagerank(&graph, RankConfig::default().with_threshold(1e-9)).unwrap();
    let sampled = sample_pagerank(&graph, seeded().with_sample_count(100_000)).unwrap();

    for (page, score) in iterated.iter() {
        let estimate = sampled.get(page.as_str()).unwrap();
        assert!(
            (estimate - score).abs() < 0.02,
            "{page}: sampled {estimate}, iterated {score}"
        );
    }
}

#[test]
fn hub_target_ranks_first_on_site() {
    let ranks = iterate_pagerank(&site(), RankConfig::default()).unwrap();
    let top = ranks.top_n(1);
    assert_eq!(top[0].0.as_str(), "2.html");
}

#[test]
fn criteria_reach_the_same_ranks() {
    let graph = site();
    let base = RankConfig::default().with_threshold(1e-9);
    let sweep = iterate_pagerank_with_stats(&graph, base).unwrap();
    let trailing = iterate_pagerank_with_stats(
        &graph,
        base.with_criterion(ConvergenceCriterion::TrailingDeltas { window: 7 }),
    )
    .unwrap();

    assert!(sweep.delta < 1e-9);
    for (page, score) in sweep.ranks.iter() {
        assert!((trailing.ranks.get(page.as_str()).unwrap() - score).abs() < 1e-6);
    }
}

#[test]
fn lower_damping_flattens_ranks() {
    let graph = site();
    let spread = |damping: f64| {
        let ranks = iterate_pagerank(&graph, RankConfig::default().with_damping(damping)).unwrap();
        let scores: Vec<f64> = ranks.iter().map(|(_, s)| s).collect();
        let max = scores.iter().copied().fold(f64::MIN, f64::max);
        let min = scores.iter().copied().fold(f64::MAX, f64::min);
        max - min
    };
    assert!(spread(0.5) < spread(0.85));
}

#[test]
fn graph_is_untouched_by_ranking() {
    let graph = site();
    let before = graph.clone();
    for method in Method::ALL {
        method.rank(&graph, seeded()).unwrap();
    }
    assert_eq!(graph, before);
}

#[test]
fn invalid_settings_are_reported() {
    let graph = site();
    let err = iterate_pagerank(&graph, RankConfig::default().with_damping(1.2)).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}
