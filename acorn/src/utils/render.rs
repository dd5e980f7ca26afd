/// helper functions for rendering
use crate::circuit::*;
use crate::inference::Marginal;
use itertools::*;

pub fn rendervec(fs: &[String]) -> String {
    format!("[{}]", fs.join(", "))
}

pub fn renderfloats(fs: &[f64], high_prec: bool) -> String {
    rendervec(&fs.iter().map(|x| fmt_f64(high_prec)(*x)).collect_vec())
}

pub fn fmt_f64(high_precision: bool) -> impl Fn(f64) -> String {
    if high_precision {
        move |x: f64| format!("{}", x)
    } else {
        move |x: f64| format!("{:.4}", x)
    }
}

pub fn render_marginal(var: &str, m: &Marginal, high_precision: bool) -> String {
    format!(
        "{}: {}",
        var,
        m.iter()
            .map(|(s, p)| format!("{}={}", s, fmt_f64(high_precision)(*p)))
            .join(", ")
    )
}

/// An indented dump of the circuit below `node`, down to `depth` levels.
/// Shared nodes are printed again wherever they occur.
pub fn render_circuit(node: &Node, depth: usize) -> String {
    let mut out = vec![];
    render_circuit_h(node, 0, depth, &mut out);
    out.join("\n")
}

fn render_circuit_h(node: &Node, indent: usize, depth: usize, out: &mut Vec<String>) {
    out.push(format!("{}{}", " ".repeat(indent * 2), node));
    if indent >= depth {
        return;
    }
    for c in node.children() {
        render_circuit_h(c, indent + 1, depth, out);
    }
}
