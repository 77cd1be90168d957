/// Unbreakable run of minified CSS and the separator that preceded it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Atom<'a> {
  text: &'a str,
  /// `" "` when the atom followed a space that may become a line break, `""` otherwise.
  glue: &'static str,
}

impl Atom<'_> {
  fn leading_width(&self) -> usize {
    self.text.split('\n').next().map_or(0, |line| line.chars().count())
  }
}

/// Split minified CSS at every point where a line break is harmless.
///
/// Breaks are allowed after `{`, `}`, `;` and `,`, and in place of a space, but never inside
/// a string, a comment, a parenthesised group or a backslash escape.
fn split_atoms(css: &str) -> Vec<Atom<'_>> {
  let mut atoms = Vec::new();
  let mut start = 0;
  let mut glue = "";
  let mut depth = 0usize;
  let mut chars = css.char_indices().peekable();

  while let Some((index, ch)) = chars.next() {
    match ch {
      '\\' => {
        chars.next();
      }
      '"' | '\'' => {
        while let Some((_, next)) = chars.next() {
          if next == '\\' {
            chars.next();
          } else if next == ch {
            break;
          }
        }
      }
      '/' if matches!(chars.peek(), Some((_, '*'))) => {
        chars.next();
        while let Some((_, next)) = chars.next() {
          if next == '*' && matches!(chars.peek(), Some((_, '/'))) {
            chars.next();
            break;
          }
        }
      }
      '(' => depth += 1,
      ')' => depth = depth.saturating_sub(1),
      '{' | '}' | ';' | ',' if depth == 0 => {
        let end = index + ch.len_utf8();
        atoms.push(Atom {
          text: &css[start..end],
          glue,
        });
        start = end;
        glue = "";
      }
      ' ' if depth == 0 => {
        if index > start {
          atoms.push(Atom {
            text: &css[start..index],
            glue,
          });
        }
        start = index + 1;
        glue = " ";
      }
      _ => {}
    }
  }

  if start < css.len() {
    atoms.push(Atom {
      text: &css[start..],
      glue,
    });
  }

  atoms
}

/// Re-flow minified CSS so no line is longer than `max_line_length` characters.
///
/// Whole rules (atoms up to and including a `}`) are kept on one line when they fit, otherwise
/// the rule starts a fresh line and its atoms are packed greedily. An atom that is longer than
/// the limit on its own is placed on a line by itself rather than split. A limit of `0` leaves
/// the input untouched.
pub(crate) fn wrap_lines(css: &str, max_line_length: usize) -> String {
  if max_line_length == 0 {
    return css.to_string();
  }

  let atoms = split_atoms(css);
  let mut out = String::with_capacity(css.len() + css.len() / max_line_length + 1);
  let mut column = 0usize;

  for rule in atoms.split_inclusive(|atom| atom.text.ends_with('}')) {
    if column > 0
      && let Some(width) = rule_width(rule)
      && column + width > max_line_length
    {
      out.push('\n');
      column = 0;
    }

    for atom in rule {
      let width = atom.leading_width();
      if column > 0 && column + atom.glue.len() + width > max_line_length {
        out.push('\n');
        column = 0;
      } else if column > 0 {
        out.push_str(atom.glue);
        column += atom.glue.len();
      }

      out.push_str(atom.text);
      column = match atom.text.rfind('\n') {
        Some(pos) => atom.text[pos + 1..].chars().count(),
        None => column + width,
      };
    }
  }

  out
}

/// Width of a rule laid out on a single line, including the separator in front of it.
///
/// Rules spanning several lines (a preserved multi-line comment) report no width and are laid
/// out atom by atom.
fn rule_width(rule: &[Atom<'_>]) -> Option<usize> {
  rule.iter().try_fold(0, |width, atom| {
    (!atom.text.contains('\n')).then(|| width + atom.glue.len() + atom.text.chars().count())
  })
}
