/// Reduce a label to its alphabetic words.
///
/// Keeps alphabetic characters and the ASCII space, in order, then collapses
/// runs of spaces and trims both ends. Other whitespace (tabs, newlines) is
/// dropped like any other non-alphabetic character, so `"a\tb"` becomes `"ab"`.
///
/// Only labels and option text go through here. Marker detection works on the
/// raw line, since markers such as `(a)`, `[ ]`, `_`, `?` and `*` would be
/// erased by this function.
pub fn normalize(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| is_letter(*c) || *c == ' ')
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Alphabetic and not numeric, so letter numbers such as `Ⅻ` are dropped.
///
/// Combining vowel signs that Unicode lists as alphabetic (for example
/// Devanagari `ि`) are kept, although their category is a mark.
pub fn is_letter(c: char) -> bool {
    c.is_alphabetic() && !c.is_numeric()
}

/// True when `text` has nothing left after [`normalize`].
pub fn is_blank_label(text: &str) -> bool {
    !text.chars().any(is_letter)
}
