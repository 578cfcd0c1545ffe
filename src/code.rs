//! Encoding tables for the NHA instruction set
//!
//! Maps register names and jump mnemonics to their bit fields using perfect hash
//! functions (PHF). The tables are computed at compile time and never mutated.
//!
//! # Word layout
//! Every C-instruction is `llll oooooo ddd jjj` or `llll oooo dddd jjjj`
//! depending on the family, always 16 characters. A-instructions are a `0`
//! followed by a 15-bit value.

use phf::phf_map;

/// Register name to destination field (3 bits)
static REGISTER_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    "a" => "100",
    "d" => "010",
};

/// Jump mnemonic to condition field (4 bits)
///
/// `jmp` is absent: the unconditional jump is a fixed word, see [`UNCONDITIONAL_JUMP`].
static JUMP_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    "jgt" => "0001",
    "jeq" => "0010",
    "jge" => "0011",
    "jlt" => "0100",
    "jne" => "0101",
    "jle" => "0110",
};

/// Lead for instructions whose operand is a register
pub const LEAD_DIRECT: &str = "1110";
/// Lead for instructions whose operand is a memory dereference
pub const LEAD_INDIRECT: &str = "1111";

/// Op-select for moving the A register (or memory) into a destination
pub const OP_SELECT_A: &str = "110000";
/// Op-select for moving the D register into a destination
pub const OP_SELECT_D: &str = "001100";
/// Op-select for `add`
pub const OP_ADD: &str = "000010";
/// Op-select for `sub`
pub const OP_SUB: &str = "010011";

/// Source nibble when D is the operand of a store or jump
pub const SOURCE_D: &str = "0011";
/// Source nibble when A (or anything other than D) is the operand
pub const SOURCE_A: &str = "1100";

/// Empty 3-bit jump field carried by loads and arithmetic
pub const NO_JUMP: &str = "000";
/// Empty 4-bit destination field carried by stores and jumps
pub const NO_DEST: &str = "0000";
/// Constant suffix of every store
pub const STORE_SUFFIX: &str = "1000";

/// Word emitted for `jmp`, whatever its operands
pub const UNCONDITIONAL_JUMP: &str = "1110101010000111";

/// Largest value an immediate load can carry (15 bits)
pub const MAX_IMMEDIATE: u16 = 0x7FFF;

/// Returns the destination field for a register name, if it names a register
///
/// # Example
/// ```
/// use nha_asm::code::register;
/// assert_eq!(register("a"), Some("100"));
/// assert_eq!(register("x"), None);
/// ```
#[inline]
#[must_use]
pub fn register(name: &str) -> Option<&'static str> {
    REGISTER_MAP.get(name).copied()
}

/// Returns the condition field for a conditional jump mnemonic
#[inline]
#[must_use]
pub fn jump(mnemonic: &str) -> Option<&'static str> {
    JUMP_MAP.get(mnemonic).copied()
}

/// Encodes an immediate load
///
/// A-instruction format: 0vvvvvvvvvvvvvvv (16 bits)
///
/// # Returns
/// 16-bit binary string, or `None` when `value` exceeds [`MAX_IMMEDIATE`]
///
/// # Example
/// ```
/// use nha_asm::code::encode_immediate;
/// assert_eq!(encode_immediate(21).as_deref(), Some("0000000000010101"));
/// assert_eq!(encode_immediate(32768), None);
/// ```
#[inline]
#[must_use]
pub fn encode_immediate(value: u16) -> Option<String> {
    (value <= MAX_IMMEDIATE).then(|| format!("{value:016b}"))
}
