//! Built-in ring renderer.
//!
//! A compact stand-in for the real art algorithm: it reads the traits back out of the seed and
//! draws concentric rings on a flow-displaced grid. Output is a pure function of the seed and
//! width.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::Digest as _;

use crate::foundation::core::Seed;
use crate::foundation::error::{QqlError, QqlResult};
use crate::render::backend::{FrameRGBA, RenderMetadata, RenderResult, Renderer};
use crate::seed::reverse::traits_from_seed;
use crate::traits::catalog::{COLOR_PALETTE, TraitSet};

struct Palette {
    name: &'static str,
    backgrounds: &'static [(&'static str, [u8; 3])],
    inks: &'static [[u8; 3]],
}

const PALETTES: &[Palette] = &[
    Palette {
        name: "Austin",
        backgrounds: &[("Cream", [242, 232, 213]), ("Charcoal", [43, 43, 43])],
        inks: &[[224, 90, 58], [242, 177, 52], [58, 124, 165], [29, 53, 87], [241, 250, 238]],
    },
    Palette {
        name: "Berlin",
        backgrounds: &[("White", [244, 244, 240]), ("Black", [17, 17, 17])],
        inks: &[[200, 30, 40], [20, 20, 20], [120, 120, 120], [230, 200, 60]],
    },
    Palette {
        name: "Edinburgh",
        backgrounds: &[("Slate", [60, 74, 87]), ("Fog", [217, 220, 214])],
        inks: &[[120, 40, 60], [70, 110, 90], [190, 160, 110], [40, 50, 70], [230, 225, 210]],
    },
    Palette {
        name: "Fidenza",
        backgrounds: &[("Paper", [239, 230, 214]), ("Ink", [26, 26, 26])],
        inks: &[[230, 90, 60], [30, 80, 150], [240, 190, 60], [30, 30, 30], [160, 200, 190]],
    },
    Palette {
        name: "Miami",
        backgrounds: &[("Pink", [247, 198, 217]), ("Teal", [31, 181, 172])],
        inks: &[[255, 110, 160], [40, 200, 210], [255, 220, 90], [120, 70, 190]],
    },
    Palette {
        name: "Seoul",
        backgrounds: &[("Ivory", [246, 241, 231]), ("Navy", [27, 42, 73])],
        inks: &[[210, 50, 60], [30, 70, 140], [250, 200, 50], [40, 40, 40], [90, 160, 110]],
    },
    Palette {
        name: "Seattle",
        backgrounds: &[("Mist", [223, 230, 233]), ("Forest", [31, 59, 45])],
        inks: &[[60, 110, 80], [110, 140, 160], [200, 120, 60], [230, 230, 220]],
    },
];

fn palette(name: &str) -> &'static Palette {
    PALETTES
        .iter()
        .find(|p| p.name == name)
        .unwrap_or(&PALETTES[0])
}

/// Background color names offered by `palette_name`. Empty for unknown palettes.
pub fn background_names(palette_name: &str) -> Vec<&'static str> {
    PALETTES
        .iter()
        .find(|p| p.name == palette_name)
        .map(|p| p.backgrounds.iter().map(|(n, _)| *n).collect())
        .unwrap_or_default()
}

/// The built-in renderer.
#[derive(Clone, Copy, Debug, Default)]
pub struct SketchRenderer;

impl SketchRenderer {
    /// Create a renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for SketchRenderer {
    #[tracing::instrument(skip(self), fields(seed = %seed))]
    fn render(&mut self, seed: &Seed, width: u32) -> QqlResult<RenderResult> {
        if width == 0 {
            return Err(QqlError::render("render width must be non-zero"));
        }
        let height = sketch_height(width)?;
        let traits =
            traits_from_seed(seed).map_err(|e| QqlError::render(format!("decode seed: {e}")))?;
        Ok(Sketch::new(seed, &traits, width, height).draw(seed))
    }
}

/// Canvas height for `width` at the 4:5 aspect ratio.
fn sketch_height(width: u32) -> QqlResult<u32> {
    width
        .checked_mul(5)
        .map(|w| (w / 4).max(1))
        .ok_or_else(|| QqlError::render(format!("render width {width} is too large")))
}

struct Sketch<'a> {
    rng: StdRng,
    traits: &'a TraitSet,
    palette: &'static Palette,
    width: u32,
    height: u32,
}

impl<'a> Sketch<'a> {
    fn new(seed: &Seed, traits: &'a TraitSet, width: u32, height: u32) -> Self {
        let digest = sha2::Sha256::digest(seed.as_str().as_bytes());
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        Self {
            rng: StdRng::seed_from_u64(u64::from_le_bytes(head)),
            traits,
            palette: palette(traits.get(COLOR_PALETTE).unwrap_or("Austin")),
            width,
            height,
        }
    }

    fn t(&self, key: &str) -> &'a str {
        self.traits.get(key).unwrap_or("")
    }

    fn draw(mut self, seed: &Seed) -> RenderResult {
        let (bg_name, bg_rgb) =
            self.palette.backgrounds[self.rng.gen_range(0..self.palette.backgrounds.len())];
        let mut frame = FrameRGBA::filled(self.width, self.height, bg_rgb);

        let w = self.width as f64;
        let h = self.height as f64;
        let margin = w * match self.t("margin") {
            "Crisp" => 0.05,
            "Wide" => 0.12,
            _ => 0.0,
        };
        let step = (w * match self.t("spacing") {
            "Dense" => 0.04,
            "Sparse" => 0.11,
            _ => 0.07,
        })
        .max(2.0);
        let base_radius = w * match self.t("ringSize") {
            "Small" => 0.012,
            "Large" => 0.035,
            _ => 0.022,
        };
        let (vmin, vmax) = match self.t("sizeVariety") {
            "Variable" => (0.6, 1.6),
            "Wild" => (0.3, 3.0),
            _ => (1.0, 1.0),
        };
        let turbulence = match self.t("turbulence") {
            "Low" => 0.3,
            "High" => 0.9,
            _ => 0.0,
        };
        let reach = step * if self.t("morphing") == "On" { 1.5 } else { 0.6 };
        let linear_angle = self.rng.gen_range(0.0..TAU);
        let radial_offset = self.rng.gen_range(-1.0..1.0);
        let ink_count = match self.t("colorVariety") {
            "Low" => 2,
            "Medium" => 3,
            _ => self.palette.inks.len(),
        }
        .min(self.palette.inks.len());
        let ring_counts = self.ring_counts(seed);

        let (cx, cy) = (w / 2.0, h / 2.0);
        let mut num_points = 0u64;
        let mut y = margin + step / 2.0;
        while y < h - margin {
            let mut x = margin + step / 2.0;
            while x < w - margin {
                let keep = match self.t("structure") {
                    "Formation" => self.rng.gen_bool(0.6),
                    _ => true,
                };
                if keep {
                    let radial = (y - cy).atan2(x - cx);
                    let mut angle = match self.t("flowField") {
                        "Horizontal" => 0.0,
                        "Diagonal" => FRAC_PI_4,
                        "Vertical" => FRAC_PI_2,
                        "Random Linear" => linear_angle,
                        "Explosive" => radial,
                        "Spiral" => radial + FRAC_PI_4,
                        "Circular" => radial + FRAC_PI_2,
                        _ => radial + radial_offset,
                    };
                    angle += turbulence * self.rng.gen_range(-1.0..1.0);
                    let px = x + reach * angle.cos();
                    let py = y + reach * angle.sin();
                    let radius = base_radius * self.rng.gen_range(vmin..=vmax);
                    let rings = ring_counts[self.rng.gen_range(0..ring_counts.len())];
                    let first_ink = self.rng.gen_range(0..ink_count);

                    if self.t("structure") == "Shadows" {
                        let shadow = darken(bg_rgb);
                        stamp_disc(&mut frame, px + radius * 0.3, py + radius * 0.3, radius, shadow);
                    }
                    self.stamp_rings(&mut frame, px, py, radius, rings, first_ink, ink_count);
                    num_points += 1;
                }
                x += step;
            }
            y += step;
        }

        let mut metadata = RenderMetadata::new(bg_name, num_points);
        let extra = &mut metadata.extra;
        extra.insert("colorPalette".into(), self.palette.name.into());
        extra.insert("flowField".into(), self.t("flowField").into());
        extra.insert("structure".into(), self.t("structure").into());
        extra.insert("ringVariant".into(), seed.ring_variant().to_string().into());
        extra.insert("width".into(), self.width.into());
        extra.insert("height".into(), self.height.into());
        extra.insert(
            "traits".into(),
            serde_json::to_value(self.traits).unwrap_or(serde_json::Value::Null),
        );

        RenderResult { frame, metadata }
    }

    fn ring_counts(&self, seed: &Seed) -> Vec<u32> {
        if seed.is_two_rings() {
            return vec![2];
        }
        let mut counts = Vec::new();
        for (key, n) in [("bullseyeRings1", 1), ("bullseyeRings3", 3), ("bullseyeRings7", 7)] {
            if self.t(key) == "On" {
                counts.push(n);
            }
        }
        if counts.is_empty() {
            counts.extend([1, 2, 3]);
        }
        counts
    }

    #[allow(clippy::too_many_arguments)]
    fn stamp_rings(
        &mut self,
        frame: &mut FrameRGBA,
        x: f64,
        y: f64,
        radius: f64,
        rings: u32,
        first_ink: usize,
        ink_count: usize,
    ) {
        let thickness: f64 = match self.t("ringThickness") {
            "Thin" => 0.15,
            "Thick" => 0.4,
            _ => self.rng.gen_range(0.1..0.5),
        };
        let mode = self.t("colorMode");
        let band = radius / rings as f64;
        for ring in 0..rings {
            let outer = radius - band * ring as f64;
            let inner = (outer - band * thickness.max(0.05) * 2.0).max(0.0);
            let ink = match mode {
                "Stacked" => (first_ink + ring as usize) % ink_count,
                "Zebra" => (first_ink + (ring as usize % 2)) % ink_count,
                _ => first_ink,
            };
            stamp_annulus(frame, x, y, inner, outer, self.palette.inks[ink]);
        }
    }
}

fn darken(rgb: [u8; 3]) -> [u8; 3] {
    rgb.map(|c| (c as u16 * 3 / 5) as u8)
}

fn stamp_disc(frame: &mut FrameRGBA, x: f64, y: f64, r: f64, rgb: [u8; 3]) {
    stamp_annulus(frame, x, y, 0.0, r, rgb);
}

fn stamp_annulus(frame: &mut FrameRGBA, x: f64, y: f64, inner: f64, outer: f64, rgb: [u8; 3]) {
    if outer <= 0.0 {
        return;
    }
    let x0 = (x - outer).floor().max(0.0) as u32;
    let y0 = (y - outer).floor().max(0.0) as u32;
    let x1 = ((x + outer).ceil().max(0.0) as u32).min(frame.width);
    let y1 = ((y + outer).ceil().max(0.0) as u32).min(frame.height);
    let (in2, out2) = (inner * inner, outer * outer);
    for py in y0..y1 {
        for px in x0..x1 {
            let dx = px as f64 + 0.5 - x;
            let dy = py as f64 + 0.5 - y;
            let d2 = dx * dx + dy * dy;
            if d2 >= in2 && d2 <= out2 {
                let i = (py as usize * frame.width as usize + px as usize) * 4;
                frame.data[i..i + 3].copy_from_slice(&rgb);
                frame.data[i + 3] = 255;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sketch.rs"]
mod tests;
