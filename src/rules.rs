use crate::color::Color;
use crate::convert::{from_cmyk, from_hsl, from_hsv};
use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use tracing::{debug, trace};

/// Separator between components: a comma with optional whitespace, or whitespace alone
const SEP: &str = r"(?:\s*,\s*|\s+)";

/// How the numbers captured by a rule are turned into a color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
  Rgb,
  Hsv,
  Hsl,
  Cmyk,
}

impl Notation {
  /// Build a candidate color from the parsed components
  ///
  /// Returns `None` on a wrong component count or out-of-range values.
  pub fn construct(self, values: &[u32]) -> Option<Color> {
    match (self, values) {
      (Notation::Rgb, &[r, g, b]) => Color::try_from_components(r, g, b),
      (Notation::Hsv, &[h, s, v]) => from_hsv(h, s, v),
      (Notation::Hsl, &[h, s, l]) => from_hsl(h, s, l),
      (Notation::Cmyk, &[c, m, y, k]) => from_cmyk(c, m, y, k),
      _ => None,
    }
  }
}

/// One accepted text notation: pattern, component radix and constructor
#[derive(Debug)]
pub struct PatternRule {
  name: &'static str,
  pattern: Regex,
  radix: u32,
  notation: Notation,
}

impl PatternRule {
  /// Compile a rule; the pattern is searched case-insensitively
  pub fn new(name: &'static str, pattern: &str, radix: u32, notation: Notation) -> Result<Self> {
    let pattern = RegexBuilder::new(pattern)
      .case_insensitive(true)
      .build()
      .with_context(|| format!("Invalid pattern for {} rule", name))?;

    Ok(Self {
      name,
      pattern,
      radix,
      notation,
    })
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  pub fn notation(&self) -> Notation {
    self.notation
  }

  /// Search the rule's pattern anywhere in `text` and parse the captured groups
  ///
  /// Returns `None` if the pattern is absent or a group does not fit in a `u32`.
  pub fn capture(&self, text: &str) -> Option<Vec<u32>> {
    let caps = self.pattern.captures(text)?;
    caps
      .iter()
      .skip(1)
      .flatten()
      .map(|m| u32::from_str_radix(m.as_str(), self.radix).ok())
      .collect()
  }

  /// Outcome of applying the rule to `text`
  pub fn apply(&self, text: &str) -> RuleOutcome {
    trace!(rule = self.name, "Trying rule");
    let Some(values) = self.capture(text) else {
      return RuleOutcome::NoMatch;
    };

    match self.notation.construct(&values) {
      Some(color) => {
        debug!(rule = self.name, ?values, %color, "Rule produced a color");
        RuleOutcome::Valid(color)
      }
      None => {
        debug!(rule = self.name, ?values, "Rule matched but values are out of range");
        RuleOutcome::Invalid
      }
    }
  }
}

/// Result of a single rule against a single input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
  /// The pattern did not match structurally
  NoMatch,
  /// The pattern matched but the candidate color failed validation
  Invalid,
  Valid(Color),
}

/// Ordered rule table; order is the tie-break between notations
#[derive(Debug)]
pub struct RuleSet {
  rules: Vec<PatternRule>,
}

impl RuleSet {
  /// Compile the standard notations in priority order
  pub fn standard() -> Result<Self> {
    let triple = |keyword: &str, component: &str| {
      format!(r"{keyword}\s+({component}){SEP}({component}){SEP}({component})")
    };

    let rules = vec![
      PatternRule::new("rgb", &triple("rgb", "[0-9]+"), 10, Notation::Rgb)?,
      PatternRule::new("hex", &triple("hex", "[0-9a-f]+"), 16, Notation::Rgb)?,
      PatternRule::new(
        "hex-packed",
        r"hex\s*([0-9a-f]{2})([0-9a-f]{2})([0-9a-f]{2})\b",
        16,
        Notation::Rgb,
      )?,
      PatternRule::new("hsv", &triple("hsv", "[0-9]+"), 10, Notation::Hsv)?,
      PatternRule::new("hsl", &triple("hsl", "[0-9]+"), 10, Notation::Hsl)?,
      PatternRule::new(
        "cmyk",
        &format!(r"cmyk\s+([0-9]+){SEP}([0-9]+){SEP}([0-9]+){SEP}([0-9]+)"),
        10,
        Notation::Cmyk,
      )?,
    ];

    Ok(Self { rules })
  }

  pub fn rules(&self) -> &[PatternRule] {
    &self.rules
  }

  /// Return the first valid color produced by the rules, in order
  ///
  /// With `fallthrough_on_invalid` unset, the first structurally matching
  /// rule decides the result even if its values are out of range.
  pub fn decode(&self, text: &str, fallthrough_on_invalid: bool) -> Option<Color> {
    for rule in &self.rules {
      match rule.apply(text) {
        RuleOutcome::Valid(color) => return Some(color),
        RuleOutcome::Invalid if !fallthrough_on_invalid => return None,
        RuleOutcome::Invalid | RuleOutcome::NoMatch => continue,
      }
    }
    None
  }
}
