use std::sync::OnceLock;

use regex::{Captures, Regex};

// Placeholders are delimited by private-use characters. Any such character already present in
// the source is itself lifted, so source text can never be mistaken for a placeholder.
const PLACEHOLDER_START: char = '\u{E000}';
const PLACEHOLDER_END: char = '\u{E001}';
const STRING_PREFIX: &str = "\u{E000}S";
const COMMENT_PREFIX: &str = "\u{E000}C";
const TOKEN_SUFFIX: &str = "\u{E001}";

/// Strings, escapes, `url()` bodies and comments lifted out of a stylesheet so the compaction
/// rules never touch them.
#[derive(Debug, Default)]
pub(crate) struct PreservedTokens {
  tokens: Vec<String>,
}

impl PreservedTokens {
  fn push(&mut self, out: &mut String, prefix: &str, token: &str) {
    out.push_str(prefix);
    out.push_str(&self.tokens.len().to_string());
    out.push_str(TOKEN_SUFFIX);
    self.tokens.push(token.to_string());
  }

  /// Put every lifted token back in place of its placeholder.
  pub(crate) fn restore(&self, text: &str) -> String {
    placeholder_pattern()
      .replace_all(text, |caps: &Captures<'_>| {
        caps[2]
          .parse::<usize>()
          .ok()
          .and_then(|index| self.tokens.get(index))
          .cloned()
          .unwrap_or_else(|| caps[0].to_string())
      })
      .into_owned()
  }

  #[cfg(test)]
  pub(crate) fn len(&self) -> usize {
    self.tokens.len()
  }
}

fn placeholder_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(&format!(
      "({}|{})([0-9]+){}",
      regex::escape(STRING_PREFIX),
      regex::escape(COMMENT_PREFIX),
      regex::escape(TOKEN_SUFFIX)
    ))
    .expect("invalid placeholder regex")
  })
}

/// Comment placeholders contained in `text`, in order of appearance.
pub(crate) fn comment_placeholders(text: &str) -> impl Iterator<Item = &str> {
  placeholder_pattern()
    .captures_iter(text)
    .filter(|caps| &caps[1] == COMMENT_PREFIX)
    .filter_map(|caps| caps.get(0))
    .map(|placeholder| placeholder.as_str())
}

/// Replace quoted strings, escape sequences, unquoted `url()` bodies and comments with
/// placeholders.
///
/// Comments are dropped (leaving a single space so adjacent tokens stay separated) when
/// `strip_comments` is set, and preserved verbatim otherwise. An unterminated comment runs to
/// the end of the input.
pub(crate) fn preserve_tokens(source: &str, strip_comments: bool) -> (String, PreservedTokens) {
  let mut out = String::with_capacity(source.len());
  let mut tokens = PreservedTokens::default();
  let mut index = 0;

  while index < source.len() {
    let rest = &source[index..];

    if rest.starts_with("/*") {
      let end = rest[2..].find("*/").map_or(rest.len(), |pos| pos + 4);
      if strip_comments {
        out.push(' ');
      } else {
        tokens.push(&mut out, COMMENT_PREFIX, &rest[..end]);
      }
      index += end;
      continue;
    }

    if let Some(body) = unquoted_url_body(source, index) {
      out.push_str(&rest[..4]);
      let trimmed = body.trim();
      if !trimmed.is_empty() {
        tokens.push(&mut out, STRING_PREFIX, trimmed);
      }
      index += 4 + body.len();
      continue;
    }

    let Some(ch) = rest.chars().next() else {
      break;
    };

    let end = match ch {
      '"' | '\'' => quoted_string_end(rest, ch),
      '\\' => escape_end(rest),
      PLACEHOLDER_START | PLACEHOLDER_END => ch.len_utf8(),
      _ => {
        out.push(ch);
        index += ch.len_utf8();
        continue;
      }
    };
    tokens.push(&mut out, STRING_PREFIX, &rest[..end]);
    index += end;
  }

  (out, tokens)
}

/// Contents of an unquoted `url(...)` starting at `index`, up to but excluding the closing
/// parenthesis (or the end of input when it is missing).
///
/// Quoted and empty urls return `None`; their strings are lifted like any other.
fn unquoted_url_body(source: &str, index: usize) -> Option<&str> {
  let rest = &source[index..];
  let opener = rest.get(..4)?;
  if !opener.eq_ignore_ascii_case("url(") {
    return None;
  }
  if source[..index]
    .chars()
    .next_back()
    .is_some_and(|prev| prev.is_alphanumeric() || prev == '-' || prev == '_')
  {
    return None;
  }

  let inner = &rest[4..];
  let first = inner.trim_start();
  if first.is_empty() || first.starts_with(['"', '\'', ')']) {
    return None;
  }

  let mut chars = inner.char_indices();
  while let Some((offset, ch)) = chars.next() {
    match ch {
      '\\' => {
        chars.next();
      }
      ')' => return Some(&inner[..offset]),
      _ => {}
    }
  }
  Some(inner)
}

/// Byte length of the escape sequence at the start of `rest`.
///
/// A hex escape covers up to six hex digits plus one optional whitespace terminator; any
/// other escape covers the backslash and the character after it.
fn escape_end(rest: &str) -> usize {
  let bytes = rest.as_bytes();
  let digits = bytes[1..]
    .iter()
    .take(6)
    .take_while(|byte| byte.is_ascii_hexdigit())
    .count();
  if digits == 0 {
    return 1 + rest[1..].chars().next().map_or(0, char::len_utf8);
  }

  let end = 1 + digits;
  if rest[end..].starts_with("\r\n") {
    end + 2
  } else if matches!(bytes.get(end), Some(b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')) {
    end + 1
  } else {
    end
  }
}

/// Byte offset just past the string starting at the beginning of `rest`.
///
/// An unescaped newline ends an unterminated string before the newline.
fn quoted_string_end(rest: &str, quote: char) -> usize {
  let mut chars = rest.char_indices().skip(1);
  while let Some((index, ch)) = chars.next() {
    match ch {
      '\\' => {
        chars.next();
      }
      '\n' => return index,
      _ if ch == quote => return index + ch.len_utf8(),
      _ => {}
    }
  }
  rest.len()
}
