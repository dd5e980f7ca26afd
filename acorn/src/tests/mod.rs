use crate::bayesian_network::*;
use crate::circuit::*;
use crate::tests::checks::*;
use crate::*;
use acorn_networks::Specification;
use itertools::*;
use tracing_test::*;

mod checks;

fn tiny() -> BayesianNetwork {
    network(Specification::Tiny)
}

#[test]
fn chain00() {
    let bn = tiny();
    check_exact1("chain/{}", 1.0, &bn, &Evidence::empty());
    check_exact1("chain/A=0", 0.6, &bn, &evidence(&[("A", "0")]));
    check_exact1("chain/B=0", 0.6 * 0.9 + 0.4 * 0.2, &bn, &evidence(&[("B", "0")]));
    check_exact1("chain/A=0,B=0", 0.54, &bn, &evidence(&[("A", "0"), ("B", "0")]));
    check_exact1("chain/A=1,B=1", 0.4 * 0.8, &bn, &evidence(&[("A", "1"), ("B", "1")]));
}

#[test]
#[traced_test]
fn chain01_both_orders() {
    let bn = tiny();
    for order in [names(&["B", "A"]), names(&["A", "B"])] {
        let c = compile(&bn, &order).unwrap();
        let pr = |pins: &[(&str, &str)]| c.probability(&evidence(pins)).unwrap();
        assert!((pr(&[]) - 1.0).abs() < PRECISION);
        assert!((pr(&[("A", "0")]) - 0.6).abs() < PRECISION);
        assert!((pr(&[("B", "0")]) - 0.62).abs() < PRECISION);
        assert!((pr(&[("A", "0"), ("B", "0")]) - 0.54).abs() < PRECISION);
    }
}

#[test]
fn chain02_root_is_a_single_sum() {
    let bn = tiny();
    let c = compile(&bn, &names(&["B", "A"])).unwrap();
    assert_eq!(c.buckets().len(), 1);
    let (scope, factor) = c.buckets().iter().next().unwrap();
    assert!(scope.is_empty());
    assert_eq!(factor.len(), 1);
    assert!(matches!(c.root().kind, NodeKind::Sum(_)));
    assert_eq!(c.root().children().len(), 2);
}

#[test]
fn chain03_stats() {
    let bn = tiny();
    let c = compile(&bn, &names(&["B", "A"])).unwrap();
    let s = c.stats();
    // B: 4 indicator*parameter products, summed onto A (2 sums);
    // A: 2 products, merged with B's sums (2 products), then one sum.
    assert_eq!(s.parameter, 6);
    assert_eq!(s.indicator, 4);
    assert_eq!(s.product, 8);
    assert_eq!(s.sum, 3);
    assert_eq!(s.total, s.parameter + s.indicator + s.product + s.sum);
    // indicator nodes are not shared, so the graph holds more of them than counted
    assert_eq!(c.circuit_size(), 6 + 6 + 8 + 3);
}

#[test]
fn chain04_marginals() {
    let bn = tiny();
    let c = compile(&bn, &names(&["B", "A"])).unwrap();
    let m = c.marginal("A", &evidence(&[("B", "0")])).unwrap();
    assert_eq!(m[0].0, "0");
    assert!((m[0].1 - 0.54 / 0.62).abs() < PRECISION);
    assert!((m[1].1 - 0.08 / 0.62).abs() < PRECISION);
    let m = c.marginal("A", &evidence(&[("A", "1")])).unwrap();
    assert_eq!(m, vec![("0".to_string(), 0.0), ("1".to_string(), 1.0)]);
    let all = c.marginals(&Evidence::empty()).unwrap();
    assert!((all["B"][1].1 - 0.38).abs() < PRECISION);
}

#[test]
fn errors00_bad_order() {
    let bn = tiny();
    for order in [names(&["A"]), names(&["A", "B", "B"]), names(&["A", "B", "C"])] {
        let err = compile(&bn, &order).unwrap_err();
        assert!(err.is_config(), "{}", err);
    }
}

#[test]
fn errors01_bad_evidence() {
    let bn = tiny();
    let c = compile(&bn, &names(&["B", "A"])).unwrap();
    assert!(c.probability(&evidence(&[("C", "0")])).unwrap_err().is_config());
    assert!(c.probability(&evidence(&[("A", "7")])).unwrap_err().is_config());
    assert!(c.marginal("C", &Evidence::empty()).unwrap_err().is_config());
}

#[test]
fn errors02_bad_table_fails_before_compiling() {
    let src = r#"{ "variables": [
        { "name": "A", "states": ["0", "1"], "parents": [], "table": [0.6, 0.4] },
        { "name": "B", "states": ["0", "1"], "parents": ["A"], "table": [0.9, 0.1] }
    ] }"#;
    let err = run(src).unwrap_err();
    assert!(err.is_config(), "{}", err);
}

#[test]
fn errors03_zero_probability_evidence() {
    let bn = network(Specification::Asia);
    let c = run_network(&bn, None, &Options::default()).unwrap();
    // `either` is a deterministic or of lung and tub
    let e = evidence(&[("either", "no"), ("lung", "yes")]);
    assert_eq!(c.probability(&e).unwrap(), 0.0);
    assert!(c.marginal("dysp", &e).unwrap_err().is_config());
}

#[test]
fn errors04_malformed_networks_fail_on_load() {
    let cycle = r#"{ "variables": [
        { "name": "A", "states": ["0", "1"], "parents": ["B"], "table": [0.9, 0.2, 0.1, 0.8] },
        { "name": "B", "states": ["0", "1"], "parents": ["A"], "table": [0.9, 0.2, 0.1, 0.8] }
    ] }"#;
    let unnormalized = r#"{ "variables": [
        { "name": "A", "states": ["0", "1"], "table": [0.6, 0.9] }
    ] }"#;
    let self_parent = r#"{ "variables": [
        { "name": "A", "states": ["0", "1"], "parents": ["A"], "table": [0.9, 0.2, 0.1, 0.8] }
    ] }"#;
    let order = names(&["A", "B"]);
    for src in [cycle, unnormalized, self_parent] {
        let err = run_with(src, Some(&order[..1]), &Options::default()).unwrap_err();
        assert!(err.is_config(), "{}", err);
    }
}

#[test]
fn oneshot00_queries() {
    let bn = tiny();
    let pr = inference::probability(&bn, &evidence(&[("B", "0")])).unwrap();
    assert!((pr - 0.62).abs() < PRECISION);
    let m = inference::posterior(&bn, "A", &evidence(&[("B", "0")])).unwrap();
    assert!((m[1].1 - 0.08 / 0.62).abs() < PRECISION);
    let err = inference::probability(&bn, &evidence(&[("B", "9")])).unwrap_err();
    assert!(err.is_config());
}

#[test]
fn evaluate00_is_deterministic() {
    let bn = network(Specification::Cancer);
    let c = run_network(&bn, None, &Options::default()).unwrap();
    let e = evidence(&[("Xray", "positive")]);
    let a = evaluate(c.root(), Some(&e));
    let b = evaluate(c.root(), Some(&e));
    assert_eq!(a.to_bits(), b.to_bits());
    let memo = Evaluator::new(Some(&e)).eval(c.root());
    assert!((a - memo).abs() < PRECISION);
}

#[test]
fn trace00_steps() {
    let bn = network(Specification::Sprinkler);
    let order = names(&["WetGrass", "Sprinkler", "Rain", "Cloudy"]);
    let c = compile_with(&bn, &order, &Options::traced()).unwrap();
    let kinds = c.steps().iter().map(|s| (s.var.as_str(), s.kind)).collect_vec();
    assert_eq!(
        kinds,
        vec![
            ("WetGrass", compile::StepKind::Leaf),
            ("Sprinkler", compile::StepKind::Eliminated),
            ("Rain", compile::StepKind::Eliminated),
            ("Cloudy", compile::StepKind::Eliminated),
        ]
    );
    assert_eq!(format!("{}", c.steps()[0].result), "Sprinkler,Rain");
    assert!(c.steps().last().unwrap().result.is_empty());
    assert!(c.largest_factor().unwrap() >= 4);

    let quiet = compile(&bn, &order).unwrap();
    assert!(quiet.steps().is_empty());
}
