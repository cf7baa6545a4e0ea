#![deny(clippy::all)]

pub mod color;
pub mod convert;
pub mod named;
pub mod parser;
pub mod rules;

// N-API symbols only resolve once the addon is loaded by Node
#[cfg(not(test))]
pub mod binding;

pub use crate::color::{Color, ColorError, NormalizedColor};
pub use crate::named::{color_names, lookup_named_color};
pub use crate::parser::{
  default_parser, parse_color, parse_colors, usage_text, ColorParser, ParserConfig,
};
pub use crate::rules::{Notation, PatternRule, RuleOutcome, RuleSet};
