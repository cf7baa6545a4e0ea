use image::Rgba;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Multiplier to expand hex color shorthand (e.g., F -> FF)
pub(crate) const HEX_SHORTHAND_MULTIPLIER: u8 = 17;

/// Tolerance for floating point drift at the edges of the 0.0-1.0 range
const EPSILON: f64 = 1e-10;

/// Normalized RGB color with values 0.0-1.0
pub type NormalizedColor = [f64; 3];

/// A validated RGBA color with 8-bit channels
///
/// Values of this type can only be built from in-range components, so every
/// `Color` handed out by the parser is complete and valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
  r: u8,
  g: u8,
  b: u8,
  a: u8,
}

/// The only way a color specification can fail
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
  /// No notation matched the input, or every match produced out-of-range values
  #[error("Not valid color!")]
  NoMatch,
}

impl Color {
  /// Create an opaque color
  pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b, a: 255 }
  }

  /// Create a color with an explicit alpha
  pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }

  /// Build an opaque color from unchecked integer components
  ///
  /// Returns `None` if any component is above 255.
  pub fn try_from_components(r: u32, g: u32, b: u32) -> Option<Self> {
    Some(Self::from_rgb(channel(r)?, channel(g)?, channel(b)?))
  }

  /// Build an opaque color from normalized channels
  ///
  /// Returns `None` if a channel falls outside 0.0-1.0 or is not finite.
  pub fn try_from_normalized(color: NormalizedColor) -> Option<Self> {
    let to_u8 = |v: f64| -> Option<u8> {
      if !v.is_finite() || !(-EPSILON..=1.0 + EPSILON).contains(&v) {
        return None;
      }
      Some((v.clamp(0.0, 1.0) * 255.0).round() as u8)
    };

    Some(Self::from_rgb(
      to_u8(color[0])?,
      to_u8(color[1])?,
      to_u8(color[2])?,
    ))
  }

  pub fn red(&self) -> u8 {
    self.r
  }

  pub fn green(&self) -> u8 {
    self.g
  }

  pub fn blue(&self) -> u8 {
    self.b
  }

  pub fn alpha(&self) -> u8 {
    self.a
  }

  /// Convert to normalized RGB (alpha dropped)
  pub fn normalized(&self) -> NormalizedColor {
    [
      self.r as f64 / 255.0,
      self.g as f64 / 255.0,
      self.b as f64 / 255.0,
    ]
  }

  /// Convert to HSV (hue: 0-360 degrees, saturation: 0-100, value: 0-100)
  pub fn to_hsv(&self) -> (f64, f64, f64) {
    let [r, g, b] = self.normalized();

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
      0.0
    } else if max == r {
      60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
      60.0 * (((b - r) / delta) + 2.0)
    } else {
      60.0 * (((r - g) / delta) + 4.0)
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    let s = if max == 0.0 { 0.0 } else { delta / max };

    (h, s * 100.0, max * 100.0)
  }

  /// Canonical hex rendering, e.g. `#007396`
  pub fn to_hex(&self) -> String {
    format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
  }

  /// Canonical rgb rendering, e.g. `rgb 0 115 150`
  pub fn to_rgb_string(&self) -> String {
    format!("rgb {} {} {}", self.r, self.g, self.b)
  }
}

fn channel(value: u32) -> Option<u8> {
  u8::try_from(value).ok()
}

impl fmt::Display for Color {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_hex())
  }
}

impl FromStr for Color {
  type Err = ColorError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    crate::parser::default_parser()
      .map_err(|_| ColorError::NoMatch)?
      .try_parse(s)
  }
}

impl From<Color> for Rgba<u8> {
  fn from(color: Color) -> Self {
    Rgba([color.r, color.g, color.b, color.a])
  }
}
