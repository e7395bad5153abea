// crates/centers-core/src/text.rs
use crate::model::{Country, District, State};

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Łódź` -> `Lodz`)
/// 2\) Trim and lowercase
///
/// ```rust
/// use centers_core::text::fold_key;
///
/// assert_eq!(fold_key("  Łódź "), "lodz");
/// assert_eq!(fold_key("Tamil Nādu"), "tamil nadu");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s.trim()).to_lowercase()
}

/// Compares two strings for equality after folding with [`fold_key`].
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

/// Name-based matching helpers for records that expose a display name.
///
/// Implementors provide a `&str` view of their name via
/// [`NameMatch::name_str`] and get accent- and case-insensitive helpers.
///
/// # Examples
/// ```rust
/// use centers_core::text::NameMatch;
/// use centers_core::District;
///
/// let d = District::new("Bengaluru Urban", 12);
/// assert!(d.is_named("bengaluru urban"));
/// assert!(d.name_contains("URBAN"));
/// ```
pub trait NameMatch {
    fn name_str(&self) -> &str;

    #[inline]
    fn is_named(&self, q: &str) -> bool {
        equals_folded(self.name_str(), q)
    }

    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        fold_key(self.name_str()).contains(&fold_key(q))
    }
}

impl NameMatch for Country {
    fn name_str(&self) -> &str {
        &self.country
    }
}

impl NameMatch for State {
    fn name_str(&self) -> &str {
        &self.state
    }
}

impl NameMatch for District {
    fn name_str(&self) -> &str {
        &self.district
    }
}

/// Finds the item named `q`.
///
/// An exact (folded) match wins; otherwise a substring match is accepted
/// only when it is unambiguous.
pub fn find_named<'a, T: NameMatch>(items: &'a [T], q: &str) -> Option<&'a T> {
    if fold_key(q).is_empty() {
        return None;
    }
    if let Some(hit) = items.iter().find(|i| i.is_named(q)) {
        return Some(hit);
    }
    let mut partial = items.iter().filter(|i| i.name_contains(q));
    match (partial.next(), partial.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    }
}
