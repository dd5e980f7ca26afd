use crate::circuit::*;
use crate::compile::Compiled;
use crate::data::*;
use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::*;

/// A posterior over one variable's states, in declaration order.
pub type Marginal = Vec<(String, f64)>;

impl Compiled {
    pub fn validate_evidence(&self, evidence: &Evidence) -> Result<()> {
        evidence.validate(|v| self.domains.get(v).map(|states| states.as_slice()))
    }

    fn eval_unchecked(&self, evidence: &Evidence) -> f64 {
        Evaluator::new(Some(evidence)).eval(self.root())
    }

    /// Pr(evidence).
    pub fn probability(&self, evidence: &Evidence) -> Result<f64> {
        self.validate_evidence(evidence)?;
        let p = self.eval_unchecked(evidence);
        trace!("Pr({}) = {}", evidence, p);
        Ok(p)
    }

    /// Pr(e) for every `e`, evaluated in parallel over the shared circuit.
    pub fn probabilities(&self, evidence: &[Evidence]) -> Result<Vec<f64>> {
        for e in evidence {
            self.validate_evidence(e)?;
        }
        Ok(self.eval_batch_unchecked(evidence))
    }

    fn eval_batch_unchecked(&self, evidence: &[Evidence]) -> Vec<f64> {
        evidence
            .par_iter()
            .map(|e| self.eval_unchecked(e))
            .collect()
    }

    /// Pr(var = s | evidence) for each state `s` of `var`.
    pub fn marginal(&self, var: &str, evidence: &Evidence) -> Result<Marginal> {
        let span = span!(Level::DEBUG, "marginal", var = var);
        let _enter = span.enter();
        let states = match self.domains.get(var) {
            Some(states) => states.clone(),
            None => return config(&format!("unknown query variable `{}`", var)),
        };
        self.validate_evidence(evidence)?;
        let z = self.eval_unchecked(evidence);
        if z == 0.0 {
            return config(&format!("evidence {} has probability zero", evidence));
        }
        let joint = states
            .iter()
            .map(|s| match evidence.get(var) {
                Some(pinned) if pinned != s.as_str() => None,
                _ => Some(evidence.clone().pin(var, s)),
            })
            .collect::<Vec<_>>();
        let pinned = joint.iter().flatten().cloned().collect::<Vec<_>>();
        let mut ps = self.eval_batch_unchecked(&pinned).into_iter();
        let out: Marginal = states
            .into_iter()
            .zip(joint)
            .map(|(s, e)| {
                let p = match e {
                    None => 0.0,
                    Some(_) => ps.next().unwrap_or(0.0) / z,
                };
                (s, p)
            })
            .collect();
        debug!("{:?}", out);
        Ok(out)
    }

    /// Posteriors for every variable, in declaration order.
    pub fn marginals(&self, evidence: &Evidence) -> Result<IndexMap<String, Marginal>> {
        self.domains
            .keys()
            .map(|v| Ok((v.clone(), self.marginal(v, evidence)?)))
            .collect()
    }
}
