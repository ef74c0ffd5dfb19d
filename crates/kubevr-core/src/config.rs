//! Configuration values shared by the plugin and the demo.

use std::str::FromStr;

use glam::Vec3;
use rand::Rng;

use crate::error::ColorError;

/// sRGB color of the cursor beam, parsed from `#rrggbb` or `0xrrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl CursorColor {
    /// Orange-red used when nothing else is configured.
    pub const DEFAULT: Self = Self::from_hex(0xEB4511);

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }
}

impl Default for CursorColor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for CursorColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .unwrap_or(trimmed);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError(s.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|_| ColorError(s.to_string()))
    }
}

/// Where new pods appear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PodLayoutConfig {
    /// Pods spawn with `x` and `z` in `[-half_extent, half_extent)`.
    pub spawn_half_extent: f32,
    /// Spawn height; pods are dropped in from above the floor.
    pub spawn_height: f32,
}

impl Default for PodLayoutConfig {
    fn default() -> Self {
        Self {
            spawn_half_extent: 25.0,
            spawn_height: 10.0,
        }
    }
}

impl PodLayoutConfig {
    /// Independent random spawn position. Not stable across reconnects.
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let extent = self.spawn_half_extent.abs();
        if extent == 0.0 {
            return Vec3::new(0.0, self.spawn_height, 0.0);
        }
        Vec3::new(
            rng.gen_range(-extent..extent),
            self.spawn_height,
            rng.gen_range(-extent..extent),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_default_color_is_orange_red() {
        assert_eq!(
            CursorColor::default(),
            CursorColor {
                r: 0xEB,
                g: 0x45,
                b: 0x11
            }
        );
    }

    #[test]
    fn test_parse_color_forms() {
        assert_eq!("#3774E0".parse::<CursorColor>(), Ok(CursorColor::from_hex(0x3774E0)));
        assert_eq!("0xff0000".parse::<CursorColor>(), Ok(CursorColor::from_hex(0xFF0000)));
        assert_eq!("00ff00".parse::<CursorColor>(), Ok(CursorColor::from_hex(0x00FF00)));
        assert!("#fff".parse::<CursorColor>().is_err());
        assert!("#gg0000".parse::<CursorColor>().is_err());
    }

    #[test]
    fn test_random_positions_stay_in_bounds() {
        let config = PodLayoutConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..256 {
            let p = config.random_position(&mut rng);
            assert!((-25.0..25.0).contains(&p.x), "x out of range: {}", p.x);
            assert!((-25.0..25.0).contains(&p.z), "z out of range: {}", p.z);
            assert_eq!(p.y, 10.0);
        }
    }

    #[test]
    fn test_zero_extent_spawns_at_origin_column() {
        let config = PodLayoutConfig {
            spawn_half_extent: 0.0,
            spawn_height: 3.0,
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(config.random_position(&mut rng), Vec3::new(0.0, 3.0, 0.0));
    }
}
