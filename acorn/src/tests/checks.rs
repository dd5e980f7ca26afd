use crate::bayesian_network::*;
use crate::factor::*;
use crate::utils::render::*;
use crate::*;
use acorn_networks::Specification;
use itertools::*;
use tracing::*;

pub const PRECISION: f64 = 1e-9;

pub fn names(vs: &[&str]) -> Vec<String> {
    vs.iter().map(|v| v.to_string()).collect_vec()
}

pub fn network(spec: Specification) -> BayesianNetwork {
    BayesianNetwork::from_json(spec.json()).unwrap()
}

pub fn evidence(pins: &[(&str, &str)]) -> Evidence {
    pins.iter().cloned().collect()
}

/// Pr(evidence) by summing the full joint over every assignment.
pub fn brute_force(bn: &BayesianNetwork, evidence: &Evidence) -> f64 {
    let vars = bn.variables().cloned().collect_vec();
    let tables: HashMap<String, Factor<f64>> = vars
        .iter()
        .map(|v| (v.clone(), factor_table(bn, bn.variable(v).unwrap()).unwrap()))
        .collect();
    let domains = vars.iter().map(|v| bn.states(v).unwrap()).collect_vec();
    let mut total = 0.0;
    for world in assignments(&domains) {
        let consistent = vars
            .iter()
            .zip(world.iter())
            .all(|(v, s)| evidence.admits(v, s));
        if !consistent {
            continue;
        }
        let lookup: HashMap<&str, &str> = vars
            .iter()
            .zip(world.iter())
            .map(|(v, s)| (v.as_str(), s.as_str()))
            .collect();
        total += vars
            .iter()
            .map(|v| {
                let table = &tables[v];
                let key = table
                    .scope()
                    .vars()
                    .iter()
                    .map(|x| lookup[x.as_str()].to_string())
                    .collect_vec();
                *table.get(&key).unwrap()
            })
            .product::<f64>();
    }
    total
}

/// Every single-variable pin, plus the empty evidence.
pub fn single_pins(bn: &BayesianNetwork) -> Vec<Evidence> {
    let mut es = vec![Evidence::empty()];
    for v in bn.variables() {
        for s in bn.states(v).unwrap() {
            es.push(Evidence::empty().pin(v, s));
        }
    }
    es
}

pub fn check_probability(s: &str, c: &Compiled, bn: &BayesianNetwork, e: &Evidence) {
    let compiled = c.probability(e).unwrap();
    let expected = brute_force(bn, e);
    debug!("[{s}] Pr({e}) compiled: {compiled}, enumerated: {expected}");
    assert!(
        (compiled - expected).abs() < PRECISION,
        "[check_probability][{s}][{e}]((expected: {expected}) - (actual: {compiled})).abs < {PRECISION}"
    );
}

pub fn check_against_enumeration(s: &str, bn: &BayesianNetwork, order: &[String]) {
    let c = compile(bn, order).unwrap();
    let es = single_pins(bn);
    let compiled = c.probabilities(&es).unwrap();
    let expected = es.iter().map(|e| brute_force(bn, e)).collect_vec();
    println!("expecting: {}", renderfloats(&expected, true));
    println!("computed:  {}", renderfloats(&compiled, true));
    izip!(es.iter(), compiled, expected).for_each(|(e, pr, f)| {
        assert!(
            (f - pr).abs() < PRECISION,
            "[check_against_enumeration][{s}][{e}]((expected: {f}) - (actual: {pr})).abs < {PRECISION}"
        );
    });
}

pub fn check_exact1(s: &str, expected: f64, bn: &BayesianNetwork, e: &Evidence) {
    let c = run_network(bn, None, &Options::default()).unwrap();
    let pr = c.probability(e).unwrap();
    assert!(
        (expected - pr).abs() < PRECISION,
        "[check_exact1][{s}]((expected: {expected}) - (actual: {pr})).abs < {PRECISION}"
    );
}
