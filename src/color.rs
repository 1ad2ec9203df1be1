use rand::Rng;

use crate::error::{SpiroError, SpiroResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#RRGGBB` hex string (the form the color picker hands over).
    pub fn from_hex(s: &str) -> SpiroResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SpiroError::invalid_parameter(format!(
                "color '{s}' is not a #RRGGBB hex string"
            )));
        }
        let v = u32::from_str_radix(hex, 16)
            .map_err(|e| SpiroError::invalid_parameter(format!("color '{s}': {e}")))?;
        Ok(Self {
            r: (v >> 16) as u8,
            g: (v >> 8) as u8,
            b: v as u8,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            r: rng.random(),
            g: rng.random(),
            b: rng.random(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ColorMode {
    Single(Rgb),
    RandomPerCycle,
}

/// Builds the per-curve color list: one entry for `Single`, one independently
/// drawn color per cycle for `RandomPerCycle`. The result is never empty
/// (`cycles >= 1` is validated upstream).
pub fn assign_colors(mode: ColorMode, cycles: u32, rng: &mut impl Rng) -> Vec<Rgb> {
    match mode {
        ColorMode::Single(color) => vec![color],
        ColorMode::RandomPerCycle => (0..cycles.max(1)).map(|_| Rgb::random(rng)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn hex_roundtrip() {
        let c = Rgb::from_hex("#FF00A7").unwrap();
        assert_eq!(c, Rgb::new(255, 0, 167));
        assert_eq!(c.to_hex(), "#FF00A7");
        assert_eq!(Rgb::from_hex("00ff00").unwrap(), Rgb::new(0, 255, 0));
    }

    #[test]
    fn hex_rejects_malformed() {
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("#GG0000").is_err());
        assert!(Rgb::from_hex("").is_err());
    }

    #[test]
    fn single_mode_yields_one_color() {
        let mut rng = StdRng::seed_from_u64(7);
        let colors = assign_colors(ColorMode::Single(Rgb::new(1, 2, 3)), 5, &mut rng);
        assert_eq!(colors, vec![Rgb::new(1, 2, 3)]);
    }

    #[test]
    fn random_per_cycle_yields_one_color_per_cycle() {
        let mut rng = StdRng::seed_from_u64(7);
        let colors = assign_colors(ColorMode::RandomPerCycle, 6, &mut rng);
        // Values are unconstrained over the u8 range; assert shape only.
        assert_eq!(colors.len(), 6);
    }
}
