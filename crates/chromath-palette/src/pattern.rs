//! Hue patterns for generated palettes.
//!
//! A pattern turns a base hue into `n` hue angles. The first angle is always
//! the base hue; every angle is in `[0, 360)`.
//!
//! | Pattern     | Rule                                           |
//! |-------------|------------------------------------------------|
//! | `Golden`    | successive golden-angle (≈137.5°) steps         |
//! | `Even`      | `360 / n` spacing, a full rainbow               |
//! | `Analogous` | evenly spread over `base ± 60°`                 |
//! | `Triadic`   | three 120° families, each stepping by 15°       |
//! | `Mono`      | the base hue repeated                           |
//!
//! Golden-angle steps never revisit a hue closely, so neighbouring digits
//! stay distinguishable however many colors are requested.

/// 360 / φ².
pub const GOLDEN_ANGLE: f32 = 137.507_76;

/// How hues are spread around the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HuePattern {
    Golden,
    Even,
    Analogous,
    Triadic,
    Mono,
}

impl HuePattern {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Golden => "golden",
            Self::Even => "even",
            Self::Analogous => "analogous",
            Self::Triadic => "triadic",
            Self::Mono => "mono",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Self::all().iter().copied().find(|p| p.name() == lower)
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Golden,
            Self::Even,
            Self::Analogous,
            Self::Triadic,
            Self::Mono,
        ]
    }

    /// Exactly `n` hue angles starting at `base`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hues(self, base: f32, n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| {
                let i = i as f32;
                let offset = match self {
                    Self::Golden => i * GOLDEN_ANGLE,
                    Self::Even => i * 360.0 / n as f32,
                    Self::Analogous if n > 1 => {
                        // 0, +s, -s, +2s, -2s, ... reaching 60° at the ends.
                        let step = 60.0 / (n / 2) as f32;
                        let k = (i / 2.0).ceil();
                        if (i as usize) % 2 == 1 { k * step } else { -k * step }
                    }
                    Self::Triadic => (i % 3.0) * 120.0 + (i / 3.0).floor() * 15.0,
                    Self::Analogous | Self::Mono => 0.0,
                };
                wrap(base + offset)
            })
            .collect()
    }
}

fn wrap(h: f32) -> f32 {
    h.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        let d = (a - b).abs() % 360.0;
        d.min(360.0 - d) < 1e-3
    }

    #[test]
    fn count_and_first_hue() {
        for &p in HuePattern::all() {
            for n in [1, 4, 10] {
                let hues = p.hues(200.0, n);
                assert_eq!(hues.len(), n, "{}", p.name());
                assert!(close(hues[0], 200.0), "{}", p.name());
            }
        }
    }

    #[test]
    fn hues_in_range() {
        for &p in HuePattern::all() {
            for h in p.hues(-725.0, 12) {
                assert!((0.0..360.0).contains(&h), "{} gave {h}", p.name());
            }
        }
    }

    #[test]
    fn zero_hues() {
        assert!(HuePattern::Golden.hues(0.0, 0).is_empty());
    }

    #[test]
    fn golden_steps() {
        let hues = HuePattern::Golden.hues(0.0, 3);
        assert!(close(hues[1], GOLDEN_ANGLE));
        assert!(close(hues[2], 2.0 * GOLDEN_ANGLE));
    }

    #[test]
    fn even_spacing() {
        let hues = HuePattern::Even.hues(10.0, 4);
        assert!(close(hues[1], 100.0));
        assert!(close(hues[3], 280.0));
    }

    #[test]
    fn analogous_stays_within_sixty_degrees() {
        for h in HuePattern::Analogous.hues(180.0, 9) {
            assert!((120.0..=240.0).contains(&h), "{h}");
        }
    }

    #[test]
    fn triadic_families() {
        let hues = HuePattern::Triadic.hues(0.0, 6);
        assert!(close(hues[1], 120.0));
        assert!(close(hues[2], 240.0));
        assert!(close(hues[3], 15.0));
    }

    #[test]
    fn mono_repeats() {
        assert!(HuePattern::Mono.hues(42.0, 5).iter().all(|&h| close(h, 42.0)));
    }

    #[test]
    fn from_name_roundtrips() {
        for &p in HuePattern::all() {
            assert_eq!(HuePattern::from_name(p.name()), Some(p));
        }
        assert_eq!(HuePattern::from_name("GOLDEN"), Some(HuePattern::Golden));
        assert_eq!(HuePattern::from_name("plaid"), None);
    }
}
