use std::fmt;

/// Diagnostic node counters. An indicator signature (variable, state) is
/// counted once per compilation no matter how many indicator nodes carry it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeStats {
    pub total: usize,
    pub sum: usize,
    pub product: usize,
    pub parameter: usize,
    pub indicator: usize,
}

impl fmt::Display for NodeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total: {}, sum: {}, product: {}, parameter: {}, indicator: {}",
            self.total, self.sum, self.product, self.parameter, self.indicator
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_every_counter() {
        let s = NodeStats {
            total: 21,
            sum: 3,
            product: 8,
            parameter: 6,
            indicator: 4,
        };
        assert_eq!(
            format!("{}", s),
            "total: 21, sum: 3, product: 8, parameter: 6, indicator: 4"
        );
        assert_eq!(NodeStats::default().total, 0);
    }
}
