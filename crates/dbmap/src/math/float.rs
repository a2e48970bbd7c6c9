pub trait FloatAsExt: Sized {
    /// Returns `Some(f)` is f is finite else returns None
    ///
    /// Returns None for NaN and +/- infty
    fn into_finite(self) -> Option<Self>;
}

impl FloatAsExt for f64 {
    fn into_finite(self) -> Option<f64> {
        self.is_finite().then_some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::FloatAsExt;

    #[test]
    fn as_finite_test() {
        assert_eq!(0.0_f64.into_finite(), Some(0.0));
        assert_eq!((-0.01_f64).into_finite(), Some(-0.01));
        assert_eq!(f64::NAN.into_finite(), None);
        assert_eq!(f64::NEG_INFINITY.into_finite(), None);
    }
}
