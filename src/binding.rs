use crate::color::{Color, ColorError};
use crate::named::color_names;
use crate::parser::{default_parser, ColorParser, ParserConfig};
use napi::bindgen_prelude::*;
use napi_derive::napi;

#[napi(object)]
pub struct RgbaColor {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}

impl From<Color> for RgbaColor {
  fn from(color: Color) -> Self {
    RgbaColor {
      r: color.red(),
      g: color.green(),
      b: color.blue(),
      a: color.alpha(),
    }
  }
}

#[napi(object)]
pub struct ParseColorOptions {
  /// Whether to accept standard color names and `#` hex literals (default: true)
  pub named_colors: Option<bool>,
  /// Whether to keep trying other notations when a match has out-of-range values (default: true)
  pub fallthrough_on_invalid: Option<bool>,
}

impl From<&ParseColorOptions> for ParserConfig {
  fn from(options: &ParseColorOptions) -> Self {
    let defaults = ParserConfig::default();
    ParserConfig {
      named_colors: options.named_colors.unwrap_or(defaults.named_colors),
      fallthrough_on_invalid: options
        .fallthrough_on_invalid
        .unwrap_or(defaults.fallthrough_on_invalid),
    }
  }
}

fn parser() -> Result<&'static ColorParser> {
  default_parser().map_err(|e| Error::new(Status::GenericFailure, format!("{:#}", e)))
}

#[napi]
/// Parse a free-form color specification
///
/// Accepts color names ("darkCyan"), hex literals ("#007396", "#fff") and the
/// notations "rgb R G B", "hex RR GG BB", "hex RRGGBB", "hsv H S V",
/// "hsl H S L" and "cmyk C M Y K".
///
/// # Arguments
/// * `text` - The text to parse
/// * `options` - Optional parsing options
///
/// # Returns
/// The parsed color, or null if the text is not a valid color
pub fn parse_color(text: String, options: Option<ParseColorOptions>) -> Result<Option<RgbaColor>> {
  let parser = parser()?;
  let color = match &options {
    Some(options) => parser.parse_with_config(&text, &options.into()),
    None => parser.parse(&text),
  };
  Ok(color.map(RgbaColor::from))
}

#[napi]
/// Parse a free-form color specification, throwing if it is not valid
///
/// # Arguments
/// * `text` - The text to parse
///
/// # Returns
/// The parsed color
pub fn parse_color_strict(text: String) -> Result<RgbaColor> {
  parser()?
    .try_parse(&text)
    .map(RgbaColor::from)
    .map_err(|e: ColorError| Error::new(Status::InvalidArg, e.to_string()))
}

#[napi]
/// Parse many color specifications in parallel
///
/// # Arguments
/// * `texts` - The texts to parse
///
/// # Returns
/// One entry per input, in order; null where the text is not a valid color
pub fn parse_colors(texts: Vec<String>) -> Result<Vec<Option<RgbaColor>>> {
  Ok(
    parser()?
      .parse_many(texts.as_slice())
      .into_iter()
      .map(|c| c.map(RgbaColor::from))
      .collect(),
  )
}

#[napi]
/// Check whether a text is a valid color specification
pub fn is_valid_color(text: String) -> Result<bool> {
  Ok(parser()?.parse(&text).is_some())
}

#[napi]
/// Render a color as a `#rrggbb` string
pub fn color_to_hex(color: RgbaColor) -> String {
  Color::from_rgba(color.r, color.g, color.b, color.a).to_hex()
}

#[napi]
/// Get every recognized color name, in lowercase
pub fn list_color_names() -> Vec<String> {
  color_names().map(String::from).collect()
}

#[napi]
/// Get the help text listing an example for each accepted notation
pub fn usage_text() -> String {
  crate::parser::usage_text()
}
