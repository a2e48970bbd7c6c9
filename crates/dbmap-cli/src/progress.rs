use std::fmt::Display;

/// Rays processed out of the most a trace can cast
pub struct Progress {
    pub current: usize,
    pub max: usize,
}

impl Progress {
    pub fn percent(&self) -> f32 {
        if self.max == 0 {
            return 1.0;
        }
        (self.current as f64 / self.max as f64).clamp(0.0, 1.0) as f32
    }
}

impl Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} rays",
            PercentBar {
                percent: self.percent(),
                width: 50
            },
            self.current
        )
    }
}

pub struct PercentBar {
    pub percent: f32,
    pub width: usize,
}

impl Display for PercentBar {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let filled = ((self.width - 1) as f32 * self.percent).round() as usize;
        write!(
            f,
            "[{empty:=>width_left$}>{empty:.<width_right$}] {percent:.1}%",
            empty = "",
            width_left = filled,
            width_right = self.width - 1 - filled,
            percent = 100. * self.percent
        )
    }
}
