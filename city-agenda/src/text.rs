//! Text normalisation for accent- and case-insensitive matching.
//!
//! Only used for comparisons; displayed text is never normalised.

/// Fold a string to lowercase ASCII where a Latin base letter exists.
///
/// Characters without a mapping are lowercased and kept. The Catalan
/// middle dot (`l·l`) is dropped so `col·lecció` matches `colleccio`.
///
/// # Examples
///
/// ```
/// use city_agenda::text::normalise;
///
/// assert_eq!(normalise("Gràcia"), "gracia");
/// assert_eq!(normalise("Col·lecció PERMANENT"), "colleccio permanent");
/// ```
pub fn normalise(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match fold(c) {
            Some(folded) => out.push_str(folded),
            None => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Whether `needle` occurs in `haystack`, ignoring case and accents.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    normalise(haystack).contains(&normalise(needle))
}

fn fold(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ä' | 'ã' | 'å' | 'À' | 'Á' | 'Â' | 'Ä' | 'Ã' | 'Å' => "a",
        'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'Ì' | 'Í' | 'Î' | 'Ï' => "i",
        'ò' | 'ó' | 'ô' | 'ö' | 'õ' | 'Ò' | 'Ó' | 'Ô' | 'Ö' | 'Õ' => "o",
        'ù' | 'ú' | 'û' | 'ü' | 'Ù' | 'Ú' | 'Û' | 'Ü' => "u",
        'ç' | 'Ç' => "c",
        'ñ' | 'Ñ' => "n",
        'ý' | 'ÿ' | 'Ý' => "y",
        'æ' | 'Æ' => "ae",
        'œ' | 'Œ' => "oe",
        'ß' => "ss",
        '·' | '\u{2027}' => "",
        _ => return None,
    };
    Some(folded)
}
