use crate::bayesian_network::BayesianNetwork;
use crate::data::*;
use crate::factor::factor_table;
use itertools::Itertools;

#[macro_export]
macro_rules! print_network {
    ( $bn:expr ) => {{
        match $crate::bayesian_network::describe_network(&$bn) {
            Ok(s) => println!("{}", s),
            Err(e) => println!("{}", e),
        }
    }};
}

/// Lists every variable with its states, parents and conditional table.
pub fn describe_network(bn: &BayesianNetwork) -> Result<String> {
    let order = bn.reverse_topological_order()?;
    let mut out = vec![order.iter().rev().join(" < ")];
    for name in order.iter().rev() {
        let v = bn.variable(name)?;
        out.push(v.name.clone());
        out.push(format!("    assignments: {}", v.states.join(",")));
        out.push(format!("    parents    : {}", v.parents.join(",")));
        out.push("    CPT".to_string());
        for (key, p) in factor_table(bn, v)?.iter() {
            let given = v
                .parents
                .iter()
                .zip(key.iter().skip(1))
                .map(|(p, s)| format!("{}={}", p, s))
                .join(", ");
            out.push(format!("            P({} = {}\t| {})\t: {}", v.name, key[0], given, p));
        }
    }
    Ok(out.join("\n"))
}
