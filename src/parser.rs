//! Parser module for NHA assembly language
//!
//! Turns raw source text into token sequences:
//! - Line splitting independent of the platform's line endings
//! - Byte-level comment detection
//! - Zero-copy tokenizing over the normalized line

use phf::phf_map;
use std::fmt;

/// Line-comment marker; everything from here to end of line is discarded
pub const COMMENT_MARKER: &str = "//";

/// The fixed instruction vocabulary
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Mnemonic {
    /// `ldr <dst>, <src>`
    Ldr,
    /// `str (<reg>), <src>`
    Str,
    /// `add <dst>, <op1>, <op2>`
    Add,
    /// `sub <dst>, <op1>, <op2>`
    Sub,
    /// Unconditional jump, takes no operand
    Jmp,
    Jgt,
    Jeq,
    Jge,
    Jlt,
    Jne,
    Jle,
}

static MNEMONICS: phf::Map<&'static str, Mnemonic> = phf_map! {
    "ldr" => Mnemonic::Ldr,
    "str" => Mnemonic::Str,
    "add" => Mnemonic::Add,
    "sub" => Mnemonic::Sub,
    "jmp" => Mnemonic::Jmp,
    "jgt" => Mnemonic::Jgt,
    "jeq" => Mnemonic::Jeq,
    "jge" => Mnemonic::Jge,
    "jlt" => Mnemonic::Jlt,
    "jne" => Mnemonic::Jne,
    "jle" => Mnemonic::Jle,
};

impl Mnemonic {
    /// Looks up a lowercase mnemonic token
    ///
    /// # Example
    /// ```
    /// use nha_asm::parser::Mnemonic;
    /// assert_eq!(Mnemonic::parse("ldr"), Some(Mnemonic::Ldr));
    /// assert_eq!(Mnemonic::parse("mov"), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        MNEMONICS.get(token).copied()
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ldr => "ldr",
            Self::Str => "str",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Jmp => "jmp",
            Self::Jgt => "jgt",
            Self::Jeq => "jeq",
            Self::Jge => "jge",
            Self::Jlt => "jlt",
            Self::Jne => "jne",
            Self::Jle => "jle",
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits source text into lines, accepting `\n`, `\r\n` and bare `\r`
///
/// # Example
/// ```
/// use nha_asm::parser::split_lines;
/// let lines: Vec<_> = split_lines("jmp\r\nldr a, $1\rstr (a), d\n").collect();
/// assert_eq!(lines, ["jmp", "ldr a, $1", "str (a), d", ""]);
/// ```
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}

/// Normalizes one raw line
///
/// Strips the trailing comment, trims and lowercases. Returns `None` for
/// blank and comment-only lines.
///
/// # Example
/// ```
/// use nha_asm::parser::normalize;
/// assert_eq!(normalize("  LDR A, $5 // load").as_deref(), Some("ldr a, $5"));
/// assert_eq!(normalize("   // nothing"), None);
/// ```
#[must_use]
pub fn normalize(line: &str) -> Option<String> {
    let code = strip_comment(line).trim();
    if code.is_empty() {
        return None;
    }
    Some(code.to_lowercase())
}

/// Strips the comment from a line
#[inline]
fn strip_comment(line: &str) -> &str {
    line.find(COMMENT_MARKER).map_or(line, |i| &line[..i])
}

/// Splits a normalized line into its mnemonic and operands
///
/// A delimiter is either a comma with optional surrounding whitespace or a run
/// of whitespace. Consecutive commas yield empty operands; trailing empty
/// operands are dropped. The result always holds at least the mnemonic slot.
///
/// # Example
/// ```
/// use nha_asm::parser::tokenize;
/// assert_eq!(tokenize("add d, d,(a)"), ["add", "d", "d", "(a)"]);
/// ```
#[must_use]
pub fn tokenize(line: &str) -> Vec<&str> {
    let mut tokens = Vec::with_capacity(4);
    let mut rest = line;

    loop {
        let end = rest
            .find(|c: char| c == ',' || c.is_whitespace())
            .unwrap_or(rest.len());
        tokens.push(&rest[..end]);
        if end == rest.len() {
            break;
        }
        rest = skip_delimiter(&rest[end..]);
    }

    while tokens.len() > 1 && tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }
    tokens
}

#[inline]
fn skip_delimiter(s: &str) -> &str {
    let s = s.trim_start();
    s.strip_prefix(',').map_or(s, str::trim_start)
}

/// Strips the parentheses of a memory dereference such as `(a)`
#[inline]
#[must_use]
pub fn dereference(operand: &str) -> Option<&str> {
    operand.strip_prefix('(')?.strip_suffix(')')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("ldr a, $1 // comment"), "ldr a, $1 ");
        assert_eq!(strip_comment("jmp"), "jmp");
        assert_eq!(strip_comment("// only comment"), "");
        assert_eq!(strip_comment("/ not a comment"), "/ not a comment");
        assert_eq!(strip_comment("add d, d, a / 2 // half"), "add d, d, a / 2 ");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("LDR A, $21").as_deref(), Some("ldr a, $21"));
        assert_eq!(normalize("\tStr (A), D  ").as_deref(), Some("str (a), d"));
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("     "), None);
        assert_eq!(normalize("// comment"), None);
        assert_eq!(normalize("   // indented comment"), None);
    }

    #[test]
    fn test_comment_variants_collide() {
        assert_eq!(normalize("ldr A, $5 // comment"), normalize("ldr A, $5"));
        assert_eq!(normalize("LDR a,   $5"), Some("ldr a,   $5".to_string()));
    }

    #[test]
    fn test_tokenize_separators() {
        assert_eq!(tokenize("ldr a, $21"), ["ldr", "a", "$21"]);
        assert_eq!(tokenize("ldr a,$21"), ["ldr", "a", "$21"]);
        assert_eq!(tokenize("ldr a ,$21"), ["ldr", "a", "$21"]);
        assert_eq!(tokenize("ldr\ta \t, \t$21"), ["ldr", "a", "$21"]);
        assert_eq!(tokenize("ldr a $21"), ["ldr", "a", "$21"]);
        assert_eq!(tokenize("jmp"), ["jmp"]);
    }

    #[test]
    fn test_tokenize_empty_operands() {
        // Interior empties survive, trailing ones are dropped
        assert_eq!(tokenize("add d,,a"), ["add", "d", "", "a"]);
        assert_eq!(tokenize("ldr a,"), ["ldr", "a"]);
        assert_eq!(tokenize("ldr a, , "), ["ldr", "a"]);
        assert_eq!(tokenize(",ldr"), ["", "ldr"]);
        assert_eq!(tokenize(","), [""]);
    }

    #[test]
    fn test_split_lines_mixed_endings() {
        let lines: Vec<_> = split_lines("a\nb\r\nc\rd").collect();
        assert_eq!(lines, ["a", "b", "c", "d"]);

        let lines: Vec<_> = split_lines("a\r\r\nb").collect();
        assert_eq!(lines, ["a", "", "b"]);
    }

    #[test]
    fn test_mnemonic_lookup() {
        for name in [
            "ldr", "str", "add", "sub", "jmp", "jgt", "jeq", "jge", "jlt", "jne", "jle",
        ] {
            let mnemonic = Mnemonic::parse(name).unwrap();
            assert_eq!(mnemonic.as_str(), name);
            assert_eq!(mnemonic.to_string(), name);
        }
        assert_eq!(Mnemonic::parse("LDR"), None);
        assert_eq!(Mnemonic::parse("mov"), None);
        assert_eq!(Mnemonic::parse(""), None);
    }

    #[test]
    fn test_dereference() {
        assert_eq!(dereference("(a)"), Some("a"));
        assert_eq!(dereference("(d)"), Some("d"));
        assert_eq!(dereference("a"), None);
        assert_eq!(dereference("(a"), None);
    }
}
