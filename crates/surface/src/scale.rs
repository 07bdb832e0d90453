//! Linear scales mapping a continuous domain onto a continuous range.

/// A linear mapping from `domain` to `range`, with the semantics of
/// `d3.scaleLinear` (no clamping, no rounding).
///
/// A degenerate domain (both ends equal) maps every input to the middle of
/// the range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    /// A scale that multiplies its domain by `factor`: the range is
    /// `[factor * d0, factor * d1]`.
    pub fn uniform(domain: [f64; 2], factor: f64) -> Self {
        Self::new(domain, [factor * domain[0], factor * domain[1]])
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// Maps a domain value to the range.
    pub fn apply(&self, value: f64) -> f64 {
        let t = normalize(self.domain, value);
        interpolate(self.range, t)
    }

    /// Maps a range value back to the domain.
    pub fn invert(&self, value: f64) -> f64 {
        let t = normalize(self.range, value);
        interpolate(self.domain, t)
    }
}

fn normalize([a, b]: [f64; 2], value: f64) -> f64 {
    let span = b - a;
    if span == 0.0 {
        0.5
    } else if span.is_nan() {
        f64::NAN
    } else {
        (value - a) / span
    }
}

fn interpolate([a, b]: [f64; 2], t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_map_exactly() {
        let scale = LinearScale::uniform([-5.0, 5.0], 50.0);
        assert_eq!(scale.range(), [-250.0, 250.0]);
        assert_eq!(scale.apply(-5.0), -250.0);
        assert_eq!(scale.apply(5.0), 250.0);
        assert_eq!(scale.apply(0.0), 0.0);
        assert!((scale.apply(2.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_extrapolates_outside_domain() {
        let scale = LinearScale::new([0.0, 1.0], [0.0, 10.0]);
        assert_eq!(scale.apply(2.0), 20.0);
        assert_eq!(scale.apply(-1.0), -10.0);
    }

    #[test]
    fn test_invert() {
        let scale = LinearScale::new([0.0, 4.0], [100.0, 300.0]);
        assert_eq!(scale.apply(1.0), 150.0);
        assert_eq!(scale.invert(150.0), 1.0);
    }

    #[test]
    fn test_degenerate_domain_maps_to_midpoint() {
        let scale = LinearScale::new([0.0, 0.0], [0.0, 0.0]);
        assert_eq!(scale.apply(3.0), 0.0);

        let scale = LinearScale::new([2.0, 2.0], [10.0, 20.0]);
        assert_eq!(scale.apply(7.0), 15.0);
    }
}
