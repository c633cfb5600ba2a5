//! Text measurement and offset helpers
//!
//! Caret and selection offsets come from the host text surface, which counts
//! UTF-16 code units. These helpers convert between those offsets and byte
//! indices into Rust strings, and compute the derived word/character counts.

/// Count non-empty tokens after splitting on runs of whitespace
///
/// # Examples
///
/// ```
/// use nexus_notes_core::models::text::word_count;
///
/// assert_eq!(word_count("  foo   bar "), 2);
/// assert_eq!(word_count(""), 0);
/// ```
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Raw length in UTF-16 code units
///
/// Not grapheme aware: an emoji outside the BMP counts as two.
pub fn character_count(content: &str) -> usize {
    content.encode_utf16().count()
}

/// Convert a UTF-16 offset into a byte index
///
/// Offsets past the end clamp to `content.len()`. An offset that falls inside
/// a surrogate pair snaps back to the start of that character.
pub fn byte_index(content: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (index, ch) in content.char_indices() {
        let next = units + ch.len_utf16();
        if next > utf16_offset {
            return index;
        }
        units = next;
    }
    content.len()
}

/// Convert a byte index into a UTF-16 offset
pub fn utf16_offset(content: &str, byte_index: usize) -> usize {
    let end = byte_index.min(content.len());
    content[..floor_char_boundary(content, end)]
        .encode_utf16()
        .count()
}

fn floor_char_boundary(content: &str, mut index: usize) -> usize {
    while index > 0 && !content.is_char_boundary(index) {
        index -= 1;
    }
    index
}
