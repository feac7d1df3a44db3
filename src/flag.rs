//! Country flag emoji from a two-letter region code.

/// Shown when no region-specific flag can be derived.
pub const PLACEHOLDER: &str = "🏳️";

/// Offset between 'A' and the regional indicator symbol 🇦.
const OFFSET: u32 = 0x1F1E6 - 'A' as u32;

/// Converts a two-letter ISO region code into its flag emoji by mapping
/// each letter to the corresponding Unicode regional indicator symbol.
///
/// Input of any other length (or with non-alphabetic characters) yields
/// the generic white-flag placeholder.
pub fn flag_glyph(region_code: &str) -> String {
  encode(region_code).unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn encode(region_code: &str) -> Option<String> {
  let code = region_code.to_uppercase();
  let mut chars = code.chars();
  match (chars.next(), chars.next(), chars.next()) {
    (Some(a), Some(b), None)
      if a.is_ascii_uppercase() && b.is_ascii_uppercase() =>
    {
      let first = char::from_u32(a as u32 + OFFSET)?;
      let second = char::from_u32(b as u32 + OFFSET)?;
      Some(format!("{first}{second}"))
    }
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_us_flag() {
    assert_eq!(flag_glyph("US"), "\u{1F1FA}\u{1F1F8}");
  }

  #[test]
  fn test_indonesia_flag() {
    assert_eq!(flag_glyph("ID"), "🇮🇩");
  }

  #[test]
  fn test_lowercase_is_uppercased() {
    assert_eq!(flag_glyph("us"), flag_glyph("US"));
  }

  #[test]
  fn test_wrong_length_yields_placeholder() {
    assert_eq!(flag_glyph("x"), PLACEHOLDER);
    assert_eq!(flag_glyph("USA"), PLACEHOLDER);
    assert_eq!(flag_glyph(""), PLACEHOLDER);
  }

  #[test]
  fn test_non_alphabetic_yields_placeholder() {
    assert_eq!(flag_glyph("1A"), PLACEHOLDER);
    assert_eq!(flag_glyph("??"), PLACEHOLDER);
  }
}
