use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Zeroable, Pod)]
pub struct Rgb(pub [f32; 3]);

/// Straight (non premultiplied) alpha
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Zeroable, Pod)]
pub struct Rgba(pub [f32; 4]);

impl Rgb {
    pub const fn from_array(arr: [f32; 3]) -> Self {
        Self(arr)
    }

    pub const fn with_alpha(self, alpha: f32) -> Rgba {
        let [r, g, b] = self.0;
        Rgba([r, g, b, alpha])
    }

    /// Hue is in turns: 0 and 1 are red, 0.5 is cyan.
    /// Saturation and value are in [0, 1].
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        if saturation == 0.0 {
            return Self([value, value, value]);
        }
        let h = hue.rem_euclid(1.0) * 6.0;
        let sector = h.floor();
        let f = h - sector;
        let p = value * (1.0 - saturation);
        let q = value * (1.0 - saturation * f);
        let t = value * (1.0 - saturation * (1.0 - f));

        match sector as u32 % 6 {
            0 => Self([value, t, p]),
            1 => Self([q, value, p]),
            2 => Self([p, value, t]),
            3 => Self([p, q, value]),
            4 => Self([t, p, value]),
            _ => Self([value, p, q]),
        }
    }
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba([0.0, 0.0, 0.0, 0.0]);

    pub const fn to_array(self) -> [f32; 4] {
        self.0
    }
}

impl From<[f32; 3]> for Rgb {
    fn from(val: [f32; 3]) -> Self {
        Rgb::from_array(val)
    }
}

pub mod linear {
    use super::Rgb;

    pub const RED: Rgb = Rgb::from_array([1.0, 0.0, 0.0]);
    pub const CYAN: Rgb = Rgb::from_array([0.0, 1.0, 1.0]);
}

#[cfg(test)]
mod tests {
    use super::{linear, Rgb};

    fn close(a: Rgb, b: Rgb) -> bool {
        a.0.iter().zip(b.0).all(|(a, b)| (a - b).abs() < 1e-6)
    }

    #[test]
    fn hsv_primaries() {
        assert!(close(Rgb::from_hsv(0.0, 1.0, 1.0), linear::RED));
        assert!(close(Rgb::from_hsv(1.0 / 6.0, 1.0, 1.0), Rgb([1.0, 1.0, 0.0])));
        assert!(close(Rgb::from_hsv(1.0 / 3.0, 1.0, 1.0), Rgb([0.0, 1.0, 0.0])));
        assert!(close(Rgb::from_hsv(0.5, 1.0, 1.0), linear::CYAN));
        assert!(close(Rgb::from_hsv(2.0 / 3.0, 1.0, 1.0), Rgb([0.0, 0.0, 1.0])));
        assert!(close(Rgb::from_hsv(1.0, 1.0, 1.0), linear::RED));
    }

    #[test]
    fn hsv_grey() {
        assert!(close(Rgb::from_hsv(0.3, 0.0, 0.5), Rgb([0.5, 0.5, 0.5])));
    }

    #[test]
    fn alpha() {
        assert_eq!(Rgb::from([0.2, 0.4, 0.6]).with_alpha(0.5).to_array(), [0.2, 0.4, 0.6, 0.5]);
    }
}
