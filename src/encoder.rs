//! Instruction encoder
//!
//! Dispatches a token sequence on its mnemonic and builds the 16-bit word for
//! each instruction family. Every encoder is a pure function of its tokens.
//!
//! Each call yields one of three outcomes:
//! - `Ok(Some(word))`: the line encodes to `word`
//! - `Ok(None)`: the line produces no output by design (unknown mnemonic,
//!   unsupported operand form, out-of-range immediate)
//! - `Err(_)`: the line is malformed (missing operand, unknown register,
//!   unparsable immediate)

use std::num::IntErrorKind;

use crate::code::{
    self, LEAD_DIRECT, LEAD_INDIRECT, NO_DEST, NO_JUMP, OP_ADD, OP_SELECT_A, OP_SELECT_D, OP_SUB,
    SOURCE_A, SOURCE_D, STORE_SUFFIX, UNCONDITIONAL_JUMP,
};
use crate::error::EncodeError;
use crate::parser::{Mnemonic, dereference, tokenize};

/// Outcome of encoding one line
pub type Encoded = Result<Option<String>, EncodeError>;

/// Operands of one instruction, addressed by 1-based position
struct Operands<'t, 'a> {
    mnemonic: Mnemonic,
    tokens: &'t [&'a str],
}

impl<'a> Operands<'_, 'a> {
    /// Returns operand `position`, or the declared error if it is absent
    #[inline]
    fn get(&self, position: usize) -> Result<&'a str, EncodeError> {
        self.tokens
            .get(position)
            .copied()
            .ok_or(EncodeError::MissingOperand {
                mnemonic: self.mnemonic,
                position,
            })
    }

    #[inline]
    fn register(&self, position: usize) -> Result<&'static str, EncodeError> {
        let name = self.get(position)?;
        code::register(name).ok_or_else(|| EncodeError::UnknownRegister(name.to_string()))
    }
}

/// Encodes a normalized line
///
/// # Example
/// ```
/// use nha_asm::encoder::encode_line;
/// assert_eq!(encode_line("ldr a, $21"), Ok(Some("0000000000010101".to_string())));
/// assert_eq!(encode_line("nop"), Ok(None));
/// ```
pub fn encode_line(line: &str) -> Encoded {
    encode(&tokenize(line))
}

/// Encodes a token sequence whose first token is the mnemonic
pub fn encode(tokens: &[&str]) -> Encoded {
    let Some(mnemonic) = tokens.first().and_then(|t| Mnemonic::parse(t)) else {
        return Ok(None);
    };
    let operands = Operands { mnemonic, tokens };

    match mnemonic {
        Mnemonic::Ldr => encode_load(&operands),
        Mnemonic::Str => encode_store(&operands),
        Mnemonic::Add | Mnemonic::Sub => encode_arithmetic(&operands),
        Mnemonic::Jmp => Ok(Some(UNCONDITIONAL_JUMP.to_string())),
        Mnemonic::Jgt
        | Mnemonic::Jeq
        | Mnemonic::Jge
        | Mnemonic::Jlt
        | Mnemonic::Jne
        | Mnemonic::Jle => encode_conditional_jump(&operands),
    }
}

/// `ldr <dst>, <src>`
///
/// Immediate loads (`$n`) become A-instructions. Register and memory sources
/// become `llll oooooo ddd 000` where the lead selects direct or indirect
/// addressing. A parenthesized destination, an immediate into `d` and an
/// unmarked integer source are unsupported forms.
fn encode_load(ops: &Operands) -> Encoded {
    let dst = ops.get(1)?;
    if dst.starts_with('(') {
        return Ok(None);
    }

    let src = ops.get(2)?;
    if dst.starts_with('d') && src.starts_with('$') {
        return Ok(None);
    }
    if is_unmarked_integer(src) {
        return Ok(None);
    }
    if let Some(literal) = src.strip_prefix('$') {
        return encode_literal(literal);
    }

    let dest = ops.register(1)?;
    let (lead, source) = match dereference(src) {
        Some(inner) => (LEAD_INDIRECT, inner),
        None => (LEAD_DIRECT, src),
    };
    let op = if source == "d" { OP_SELECT_D } else { OP_SELECT_A };

    Ok(Some(word!(lead, op, dest, NO_JUMP)))
}

/// Optional sign followed by decimal digits, whatever its magnitude
fn is_unmarked_integer(operand: &str) -> bool {
    let digits = operand.strip_prefix(['+', '-']).unwrap_or(operand);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Digits following `$`. Negative and overflowing values are out of range.
fn encode_literal(digits: &str) -> Encoded {
    match digits.parse::<i32>() {
        Ok(value) => Ok(u16::try_from(value).ok().and_then(code::encode_immediate)),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Ok(None)
        }
        Err(_) => Err(EncodeError::InvalidImmediate(format!("${digits}"))),
    }
}

/// `str (<reg>), <src>`
fn encode_store(ops: &Operands) -> Encoded {
    let dst = ops.get(1)?;
    if !dereference(dst).is_some_and(|reg| code::register(reg).is_some()) {
        return Ok(None);
    }

    let source = if ops.get(2)? == "d" { SOURCE_D } else { SOURCE_A };
    Ok(Some(word!(LEAD_DIRECT, source, NO_DEST, STORE_SUFFIX)))
}

/// `add|sub <dst>, <op1>, <op2>`
///
/// Only the destination and the second source operand shape the word; the
/// first source is implicitly `d`.
fn encode_arithmetic(ops: &Operands) -> Encoded {
    let operand = ops.get(3)?;
    let dest = ops.register(1)?;

    let lead = if dereference(operand).is_some() {
        LEAD_INDIRECT
    } else {
        LEAD_DIRECT
    };
    let op = if ops.mnemonic == Mnemonic::Add {
        OP_ADD
    } else {
        OP_SUB
    };

    Ok(Some(word!(lead, op, dest, NO_JUMP)))
}

/// `jgt|jeq|jge|jlt|jne|jle <operand>`
fn encode_conditional_jump(ops: &Operands) -> Encoded {
    let operand = ops.get(1)?;
    let Some(condition) = code::jump(ops.mnemonic.as_str()) else {
        return Ok(None);
    };

    let (lead, tested) = match dereference(operand) {
        Some(inner) => (LEAD_INDIRECT, inner),
        None => (LEAD_DIRECT, operand),
    };
    let source = if tested.contains('d') {
        SOURCE_D
    } else {
        SOURCE_A
    };

    Ok(Some(word!(lead, source, NO_DEST, condition)))
}
