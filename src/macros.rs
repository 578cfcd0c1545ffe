//! Macro utilities for the NHA assembler

/// Builds a machine word from its bit fields
///
/// Concatenates the fields into a `String` pre-allocated for one 16-bit word.
/// Debug builds assert that the result is exactly 16 characters.
///
/// # Example
/// ```
/// use nha_asm::word;
/// let w = word!("1110", "0011", "0000", "1000");
/// assert_eq!(w, "1110001100001000");
/// ```
#[macro_export]
macro_rules! word {
    ($($field:expr),+ $(,)?) => {{
        let mut w = String::with_capacity(16);
        $(w.push_str($field);)+
        debug_assert_eq!(w.len(), 16, "malformed machine word {w:?}");
        w
    }};
}
