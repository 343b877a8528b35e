//! Label and value normalization.
//!
//! Dimension lookups are case-insensitive over trimmed labels; what gets
//! *stored* is a canonical display form. Countries additionally pass
//! through a fix-map so `usa`, `US` and `EE.UU.` all land on
//! `United States`.

/// Lookup key for a dimension label: trimmed, case-folded.
pub fn lookup_key(label: &str) -> String {
  label.trim().to_lowercase()
}

/// Alias → canonical country name, keyed by [`lookup_key`] form.
const COUNTRY_FIX: &[(&str, &str)] = &[
  ("usa", "United States"),
  ("us", "United States"),
  ("u.s.a.", "United States"),
  ("united states of america", "United States"),
  ("ee.uu.", "United States"),
  ("uk", "United Kingdom"),
  ("u.k.", "United Kingdom"),
  ("brasil", "Brazil"),
];

/// Canonical display form for a country: fix-map first, title-case
/// fallback.
pub fn canonical_country(raw: &str) -> String {
  let key = lookup_key(raw);
  for (alias, fixed) in COUNTRY_FIX {
    if key == *alias {
      return (*fixed).to_string();
    }
  }
  title_case(raw.trim())
}

/// Uppercase the first letter of each whitespace-separated word, lowercase
/// the rest.
pub fn title_case(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut at_word_start = true;
  for c in s.chars() {
    if c.is_whitespace() {
      at_word_start = true;
      out.push(c);
    } else if at_word_start {
      out.extend(c.to_uppercase());
      at_word_start = false;
    } else {
      out.extend(c.to_lowercase());
    }
  }
  out
}

/// Cheap plausibility check: one `@`, non-empty local part, dotted domain,
/// no whitespace. Full RFC 5322 validation is out of scope.
pub fn email_plausible(email: &str) -> bool {
  if email.chars().any(char::is_whitespace) {
    return false;
  }
  let Some((local, domain)) = email.split_once('@') else {
    return false;
  };
  !local.is_empty()
    && !domain.is_empty()
    && !domain.contains('@')
    && domain.contains('.')
    && !domain.starts_with('.')
    && !domain.ends_with('.')
}
