use crate::color::{Color, NormalizedColor};

/// Largest accepted hue, in degrees
pub const HUE_MAX: u32 = 359;

/// Largest accepted percentage for saturation, value, lightness and CMYK inks
pub const PERCENT_MAX: u32 = 100;

fn percent(value: u32) -> Option<f64> {
  (value <= PERCENT_MAX).then_some(value as f64 / PERCENT_MAX as f64)
}

fn hue(value: u32) -> Option<f64> {
  (value <= HUE_MAX).then_some(value as f64)
}

/// Place chroma `c` and second component `x` in the sector selected by `hue`
fn chroma_to_rgb(hue: f64, c: f64, x: f64) -> NormalizedColor {
  match (hue / 60.0).floor() as u32 {
    0 => [c, x, 0.0],
    1 => [x, c, 0.0],
    2 => [0.0, c, x],
    3 => [0.0, x, c],
    4 => [x, 0.0, c],
    _ => [c, 0.0, x],
  }
}

fn second_component(hue: f64, c: f64) -> f64 {
  c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs())
}

fn offset(rgb: NormalizedColor, m: f64) -> NormalizedColor {
  [rgb[0] + m, rgb[1] + m, rgb[2] + m]
}

/// Convert HSV (hue 0-359, saturation 0-100, value 0-100) to a color
///
/// Returns `None` when a component is out of range.
pub fn from_hsv(h: u32, s: u32, v: u32) -> Option<Color> {
  let (h, s, v) = (hue(h)?, percent(s)?, percent(v)?);

  let c = v * s;
  let x = second_component(h, c);
  let m = v - c;

  Color::try_from_normalized(offset(chroma_to_rgb(h, c, x), m))
}

/// Convert HSL (hue 0-359, saturation 0-100, lightness 0-100) to a color
///
/// Returns `None` when a component is out of range.
pub fn from_hsl(h: u32, s: u32, l: u32) -> Option<Color> {
  let (h, s, l) = (hue(h)?, percent(s)?, percent(l)?);

  let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
  let x = second_component(h, c);
  let m = l - c / 2.0;

  Color::try_from_normalized(offset(chroma_to_rgb(h, c, x), m))
}

/// Convert CMYK ink percentages (each 0-100) to a color
///
/// Returns `None` when a component is out of range.
pub fn from_cmyk(c: u32, m: u32, y: u32, k: u32) -> Option<Color> {
  let (c, m, y, k) = (percent(c)?, percent(m)?, percent(y)?, percent(k)?);

  let key = 1.0 - k;
  Color::try_from_normalized([(1.0 - c) * key, (1.0 - m) * key, (1.0 - y) * key])
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_hsv_primaries() {
    assert_eq!(from_hsv(0, 100, 100), Some(Color::from_rgb(255, 0, 0)));
    assert_eq!(from_hsv(120, 100, 100), Some(Color::from_rgb(0, 255, 0)));
    assert_eq!(from_hsv(240, 100, 100), Some(Color::from_rgb(0, 0, 255)));
    assert_eq!(from_hsv(0, 0, 0), Some(Color::from_rgb(0, 0, 0)));
  }

  #[test]
  fn test_hsv_reconstructs() {
    let color = from_hsv(359, 50, 100).unwrap();
    assert_eq!(color, Color::from_rgb(255, 128, 130));

    let (h, s, v) = color.to_hsv();
    assert!((h - 359.0).abs() < 1.0, "hue {h}");
    assert!((s - 50.0).abs() < 1.0, "saturation {s}");
    assert!((v - 100.0).abs() < 1.0, "value {v}");
  }

  #[test]
  fn test_hsv_out_of_range() {
    assert_eq!(from_hsv(360, 50, 50), None);
    assert_eq!(from_hsv(0, 101, 50), None);
    assert_eq!(from_hsv(0, 50, 101), None);
  }

  #[test]
  fn test_hsl() {
    assert_eq!(from_hsl(0, 100, 50), Some(Color::from_rgb(255, 0, 0)));
    assert_eq!(from_hsl(0, 0, 100), Some(Color::from_rgb(255, 255, 255)));
    assert_eq!(from_hsl(120, 100, 25), Some(Color::from_rgb(0, 128, 0)));
    assert_eq!(from_hsl(200, 0, 50), Some(Color::from_rgb(128, 128, 128)));
    assert_eq!(from_hsl(999, 0, 0), None);
  }

  #[test]
  fn test_cmyk() {
    assert_eq!(from_cmyk(79, 40, 0, 66), Some(Color::from_rgb(18, 52, 87)));
    assert_eq!(from_cmyk(0, 0, 0, 0), Some(Color::from_rgb(255, 255, 255)));
    assert_eq!(from_cmyk(0, 0, 0, 100), Some(Color::from_rgb(0, 0, 0)));
    assert_eq!(from_cmyk(0, 0, 101, 0), None);
  }
}
