//! Field key derivation.

/// Derives the form field key for an item.
///
/// The label is lower-cased, each run of whitespace becomes a single `_`,
/// and the item's position is appended (`"Zip Code"` at index 2 becomes
/// `zip_code_2`). The index keeps keys unique when labels repeat, which also
/// means keys shift when items are inserted or reordered.
pub fn field_key(label: &str, index: usize) -> String {
    let mut key = String::with_capacity(label.len() + 4);
    let mut in_whitespace = false;

    for ch in label.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                key.push('_');
            }
            in_whitespace = true;
        } else {
            key.extend(ch.to_lowercase());
            in_whitespace = false;
        }
    }

    key.push('_');
    key.push_str(&index.to_string());
    key
}
