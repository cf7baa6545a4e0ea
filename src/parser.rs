use crate::color::{Color, ColorError};
use crate::named::lookup_named_color;
use crate::rules::RuleSet;
use anyhow::{anyhow, Result};
use rayon::prelude::*;
use std::sync::LazyLock;
use tracing::debug;

/// Examples shown to users who do not know what to type
const USAGE_EXAMPLES: &[&str] = &[
  "darkCyan",
  "#007396",
  "rgb 255 100 200",
  "hex ff a0 ff",
  "hsv 359 50 100",
  "hsl 0 100 50",
  "cmyk 79 40 0 66",
];

static DEFAULT_PARSER: LazyLock<Result<ColorParser>> = LazyLock::new(ColorParser::new);

/// Configuration for color parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
  /// Try standard color names and `#` hex literals before the notation rules
  pub named_colors: bool,
  /// Keep trying later rules when a matching rule yields out-of-range values.
  /// When unset, the first matching rule decides the result.
  pub fallthrough_on_invalid: bool,
}

impl Default for ParserConfig {
  fn default() -> Self {
    Self {
      named_colors: true,
      fallthrough_on_invalid: true,
    }
  }
}

/// Resolves free-form text into a validated [`Color`]
///
/// Holds the compiled rule table; build it once and share it by reference.
#[derive(Debug)]
pub struct ColorParser {
  rules: RuleSet,
  config: ParserConfig,
}

impl ColorParser {
  /// Create a parser with the standard notations and default configuration
  pub fn new() -> Result<Self> {
    Self::with_config(ParserConfig::default())
  }

  pub fn with_config(config: ParserConfig) -> Result<Self> {
    Ok(Self {
      rules: RuleSet::standard()?,
      config,
    })
  }

  pub fn config(&self) -> &ParserConfig {
    &self.config
  }

  pub fn rules(&self) -> &RuleSet {
    &self.rules
  }

  /// Parse a color specification
  ///
  /// # Arguments
  /// * `text` - The user's raw text, e.g. "darkCyan" or "hsv 359 50 100"
  ///
  /// # Returns
  /// The parsed color, or `None` if no notation matched with valid values
  pub fn parse(&self, text: &str) -> Option<Color> {
    self.parse_with_config(text, &self.config)
  }

  /// Parse a color specification with a per-call configuration
  pub fn parse_with_config(&self, text: &str, config: &ParserConfig) -> Option<Color> {
    if config.named_colors {
      if let Some(color) = lookup_named_color(text) {
        debug!(%color, "Resolved named color");
        return Some(color);
      }
    }

    self.rules.decode(text, config.fallthrough_on_invalid)
  }

  /// Like [`ColorParser::parse`], with the failure as an error value
  pub fn try_parse(&self, text: &str) -> Result<Color, ColorError> {
    self.parse(text).ok_or(ColorError::NoMatch)
  }

  /// Parse many specifications in parallel, keeping input order
  pub fn parse_many<S>(&self, texts: &[S]) -> Vec<Option<Color>>
  where
    S: AsRef<str> + Sync,
  {
    texts.par_iter().map(|t| self.parse(t.as_ref())).collect()
  }
}

/// Shared parser with the default configuration
pub fn default_parser() -> Result<&'static ColorParser> {
  DEFAULT_PARSER
    .as_ref()
    .map_err(|e| anyhow!("Failed to build color rules: {:#}", e))
}

/// Parse a color specification with the shared default parser
pub fn parse_color(text: &str) -> Option<Color> {
  default_parser().ok()?.parse(text)
}

/// Parse many color specifications in parallel with the shared default parser
pub fn parse_colors<S>(texts: &[S]) -> Vec<Option<Color>>
where
  S: AsRef<str> + Sync,
{
  match default_parser() {
    Ok(parser) => parser.parse_many(texts),
    Err(_) => vec![None; texts.len()],
  }
}

/// Help message listing one example per accepted notation
pub fn usage_text() -> String {
  let mut text = String::from("Write the color, for example:\n");
  for example in USAGE_EXAMPLES {
    text.push_str("- ");
    text.push_str(example);
    text.push('\n');
  }
  text
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::named::color_names;

  fn parse(text: &str) -> Option<Color> {
    parse_color(text)
  }

  #[test]
  fn test_named_colors() {
    assert_eq!(parse("darkCyan"), Some(Color::from_rgb(0, 139, 139)));
    for name in color_names() {
      let color = parse(name).unwrap();
      assert_eq!(color.alpha(), 255, "{name}");
    }
  }

  #[test]
  fn test_hex_literals() {
    assert_eq!(parse("#007396"), Some(Color::from_rgba(0, 115, 150, 255)));
    assert_eq!(parse("#fff"), Some(Color::from_rgba(255, 255, 255, 255)));
  }

  #[test]
  fn test_rgb_with_and_without_commas() {
    let expected = Some(Color::from_rgb(255, 100, 200));
    assert_eq!(parse("rgb 255 100 200"), expected);
    assert_eq!(parse("rgb 255, 100, 200"), expected);
    assert_eq!(parse("RGB 255 100 200"), expected);
  }

  #[test]
  fn test_spaced_and_packed_hex_agree() {
    let expected = Some(Color::from_rgb(255, 160, 255));
    assert_eq!(parse("hex ff a0 ff"), expected);
    assert_eq!(parse("hex ff, a0, ff"), expected);
    assert_eq!(parse("hex ffa0ff"), expected);
    assert_eq!(parse("HEX FFA0FF"), expected);
  }

  #[test]
  fn test_hsv() {
    let color = parse("hsv 359 50 100").unwrap();
    let (h, s, v) = color.to_hsv();
    assert!((h - 359.0).abs() < 1.0);
    assert!((s - 50.0).abs() < 1.0);
    assert!((v - 100.0).abs() < 1.0);
  }

  #[test]
  fn test_hsl() {
    assert_eq!(parse("hsl 0 100 50"), Some(Color::from_rgb(255, 0, 0)));
  }

  #[test]
  fn test_cmyk() {
    assert_eq!(parse("cmyk 79 40 0 66"), Some(Color::from_rgb(18, 52, 87)));
    assert_eq!(parse("cmyk 79, 40, 0, 66"), Some(Color::from_rgb(18, 52, 87)));
  }

  #[test]
  fn test_no_match() {
    assert_eq!(parse("not a color"), None);
    assert_eq!(parse(""), None);
    assert_eq!(parse("rgb"), None);
    assert_eq!(parse("hsv 999 999 999"), None);
    assert_eq!(parse("rgb 256 0 0"), None);
    assert_eq!(parse("cmyk 0 0 0 101"), None);
  }

  #[test]
  fn test_hex_rendering_round_trips() {
    for text in ["darkCyan", "rgb 1 2 3", "hsv 200 30 40", "cmyk 10 20 30 40"] {
      let color = parse(text).unwrap();
      assert_eq!(parse(&color.to_hex()), Some(color), "{text}");
      assert_eq!(parse(&color.to_rgb_string()), Some(color), "{text}");
    }
  }

  #[test]
  fn test_named_lookup_can_be_disabled() {
    let parser = ColorParser::with_config(ParserConfig {
      named_colors: false,
      ..ParserConfig::default()
    })
    .unwrap();
    assert_eq!(parser.parse("red"), None);
    assert_eq!(parser.parse("#fff"), None);
    assert_eq!(parser.parse("rgb 1 2 3"), Some(Color::from_rgb(1, 2, 3)));
  }

  #[test]
  fn test_first_match_decides_without_fallthrough() {
    let parser = ColorParser::new().unwrap();
    let strict = ParserConfig {
      fallthrough_on_invalid: false,
      ..ParserConfig::default()
    };
    let text = "rgb 300 0 0 hex 10 20 30";
    assert_eq!(parser.parse(text), Some(Color::from_rgb(16, 32, 48)));
    assert_eq!(parser.parse_with_config(text, &strict), None);
  }

  #[test]
  fn test_try_parse() {
    let parser = default_parser().unwrap();
    assert_eq!(parser.try_parse("lime"), Ok(Color::from_rgb(0, 255, 0)));
    let err = parser.try_parse("mauve-ish").unwrap_err();
    assert_eq!(err, ColorError::NoMatch);
    assert_eq!(err.to_string(), "Not valid color!");
  }

  #[test]
  fn test_parse_colors_keeps_order() {
    let texts = ["red", "nope", "rgb 0 0 255", "hsv 999 1 1"];
    assert_eq!(
      parse_colors(&texts),
      vec![
        Some(Color::from_rgb(255, 0, 0)),
        None,
        Some(Color::from_rgb(0, 0, 255)),
        None,
      ]
    );
  }

  #[test]
  fn test_usage_examples_parse() {
    for example in USAGE_EXAMPLES {
      assert!(parse(example).is_some(), "{example}");
    }
    assert!(usage_text().contains("hsl 0 100 50"));
  }
}
