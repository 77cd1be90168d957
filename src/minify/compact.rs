use std::sync::OnceLock;

use regex::{Captures, Regex};

struct CompactRules {
  whitespace: Regex,
  space_before: Regex,
  space_after: Regex,
  repeated_semicolons: Regex,
  trailing_semicolon: Regex,
  empty_rule: Regex,
  leading_zero: Regex,
}

fn rules() -> &'static CompactRules {
  static RULES: OnceLock<CompactRules> = OnceLock::new();
  RULES.get_or_init(|| CompactRules {
    whitespace: Regex::new(r"\s+").expect("invalid whitespace regex"),
    space_before: Regex::new(r" ([{};,>)!])").expect("invalid space-before regex"),
    space_after: Regex::new(r"([{};,>(:]) ").expect("invalid space-after regex"),
    repeated_semicolons: Regex::new(r";{2,}").expect("invalid semicolon regex"),
    trailing_semicolon: Regex::new(r";\}").expect("invalid trailing semicolon regex"),
    empty_rule: Regex::new(r"(^|[{};])([^{};]*)\{\}").expect("invalid empty rule regex"),
    leading_zero: Regex::new(r"(^|[ :,(])0+\.([0-9])").expect("invalid leading zero regex"),
  })
}

/// Collapse whitespace and drop redundant punctuation from placeholder-protected CSS.
///
/// The input must not contain raw strings or comments; see `preserve_tokens`.
pub(crate) fn compact(text: &str) -> String {
  let rules = rules();

  let mut css = rules.whitespace.replace_all(text, " ").into_owned();
  css = rules.space_before.replace_all(&css, "$1").into_owned();
  css = rules.space_after.replace_all(&css, "$1").into_owned();
  css = rules.repeated_semicolons.replace_all(&css, ";").into_owned();
  css = rules.trailing_semicolon.replace_all(&css, "}").into_owned();
  css = remove_empty_rules(&rules.empty_rule, css);
  css = rules.leading_zero.replace_all(&css, "$1.$2").into_owned();

  css.trim().to_string()
}

/// Remove `selector{}` blocks until none remain, so emptied at-rules are dropped too.
///
/// Preserved comments sitting in front of a removed selector are kept.
fn remove_empty_rules(pattern: &Regex, mut css: String) -> String {
  loop {
    let next = pattern
      .replace_all(&css, |caps: &Captures<'_>| {
        let mut kept = caps[1].to_string();
        for token in super::tokens::comment_placeholders(&caps[2]) {
          kept.push_str(token);
        }
        kept
      })
      .into_owned();

    if next == css {
      return css;
    }
    css = next;
  }
}
