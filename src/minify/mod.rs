//! Stylesheet minification in the spirit of YUI/uglifycss.
//!
//! The pipeline lifts strings, escapes, unquoted `url()` bodies and comments out of the way, compacts the remaining text with a
//! small set of regular expressions, restores the lifted tokens and finally re-flows the result
//! so no line exceeds the configured width.

mod compact;
mod tokens;
mod wrap;

use crate::models::MinifyOptions;

/// Minify concatenated CSS according to `options`.
pub fn minify_css(source: &str, options: &MinifyOptions) -> String {
  let (text, tokens) = tokens::preserve_tokens(source, options.strip_comments);
  let compacted = compact::compact(&text);
  let restored = tokens.restore(&compacted);
  wrap::wrap_lines(&restored, options.max_line_length)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn options(max_line_length: usize, strip_comments: bool) -> MinifyOptions {
    MinifyOptions {
      max_line_length,
      strip_comments,
    }
  }

  #[test]
  fn joins_theme_files_without_comments() {
    let source = "body{margin:0}\n/* theme */ .sidebar{width:18em}";
    let css = minify_css(source, &options(80, true));
    assert_eq!(css, "body{margin:0}.sidebar{width:18em}");
  }

  #[test]
  fn keeps_comments_when_not_stripping() {
    let source = "/*! Hyde v2 */\nbody { margin: 0; }";
    let css = minify_css(source, &options(0, false));
    assert_eq!(css, "/*! Hyde v2 */ body{margin:0}");
  }

  #[test]
  fn strings_survive_untouched() {
    let source = ".a::before { content: \"  spaced ; {} \"; }\n.b { font-family: 'Open Sans', sans-serif; }";
    let css = minify_css(source, &options(0, true));
    assert_eq!(
      css,
      ".a::before{content:\"  spaced ; {} \"}.b{font-family:'Open Sans',sans-serif}"
    );
  }

  #[test]
  fn comment_delimiters_never_survive_stripping() {
    let source = "/* a */a{color:red}/* b\n spans */b{color:blue /* inline */}/* dangling";
    let css = minify_css(source, &options(20, true));
    assert!(!css.contains("/*"));
    assert!(!css.contains("*/"));
    assert!(css.lines().all(|line| line.chars().count() <= 20));
  }

  #[test]
  fn escaped_selectors_keep_their_rules() {
    let source = ".content-\\[\\'x\\'\\]{color:red} /* secret */ b { color: blue }\n.c{}";
    let css = minify_css(source, &options(0, true));
    assert_eq!(css, r".content-\[\'x\'\]{color:red}b{color:blue}");
  }

  #[test]
  fn escaped_spaces_are_not_wrapped() {
    let css = minify_css(r".aaaaaaaaaa\ bbbbbbbbbb{color:red}", &options(14, true));
    assert_eq!(css, ".aaaaaaaaaa\\ bbbbbbbbbb{\ncolor:red}");
  }

  #[test]
  fn unquoted_urls_are_kept_verbatim() {
    let source = "a { background: url( 0.5x.png ) }\nb { mask: url(data:image/svg+xml;utf8,<svg width='0.5'/>) }";
    let css = minify_css(source, &options(0, true));
    assert_eq!(
      css,
      "a{background:url(0.5x.png)}b{mask:url(data:image/svg+xml;utf8,<svg width='0.5'/>)}"
    );
  }

  #[test]
  fn placeholder_lookalikes_in_the_source_survive() {
    let source = "a{content:\"x\"}.___PRESERVED_TOKEN_0___{color:red}.\u{E000}S0\u{E001}{color:blue}";
    assert_eq!(minify_css(source, &options(0, true)), source);
  }

  #[test]
  fn empty_input_produces_empty_output() {
    assert_eq!(minify_css("  \n/* only a comment */\n", &options(80, true)), "");
  }
}
