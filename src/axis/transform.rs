//! One-dimensional affine transforms.
//!
//! All quantity-to-pixel mapping reduces to `y = (x + pre_offset) * multiplier`.
//! Keeping the offset on the input side means a range start can be
//! subtracted before scaling, which preserves precision for large epoch
//! values.

/// `y = (x + pre_offset) * multiplier`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    multiplier: f64,
    pre_offset: f64,
}

impl AffineTransform {
    pub fn new(multiplier: f64, pre_offset: f64) -> Self {
        AffineTransform { multiplier, pre_offset }
    }

    pub fn identity() -> Self {
        AffineTransform::new(1.0, 0.0)
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn apply(&self, x: f64) -> f64 {
        (x + self.pre_offset) * self.multiplier
    }

    /// The transform mapping outputs of `self` back to its inputs.
    pub fn invert(&self) -> AffineTransform {
        AffineTransform::new(1.0 / self.multiplier, -self.pre_offset * self.multiplier)
    }

    /// The transform applying `self` first, `then` second.
    pub fn concat(&self, then: &AffineTransform) -> AffineTransform {
        AffineTransform::new(
            self.multiplier * then.multiplier,
            self.pre_offset + then.pre_offset / self.multiplier,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_and_invert_round_trip() {
        let t = AffineTransform::new(2.5, -10.0);
        let inv = t.invert();
        for x in [-100.0, 0.0, 3.7, 1e9] {
            let y = t.apply(x);
            assert!((inv.apply(y) - x).abs() < 1e-6 * x.abs().max(1.0));
        }
    }

    #[test]
    fn concat_composes_in_order() {
        let first = AffineTransform::new(2.0, 1.0);
        let second = AffineTransform::new(3.0, -4.0);
        let composed = first.concat(&second);
        for x in [-5.0, 0.0, 12.5] {
            let expected = second.apply(first.apply(x));
            assert!((composed.apply(x) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn identity_is_neutral() {
        let t = AffineTransform::new(0.5, 8.0);
        let composed = AffineTransform::identity().concat(&t);
        assert!((composed.apply(3.0) - t.apply(3.0)).abs() < 1e-12);
    }
}
