//! Assembler for the NHA 16-bit teaching machine
//!
//! Translates NHA mnemonics (`ldr`, `str`, `add`, `sub` and the jump family)
//! into 16-character binary machine words, one per retained source line.
//!
//! # Architecture
//!
//! - [`code`]: Bit-field tables using perfect hash functions (PHF)
//! - [`parser`]: Line splitting, normalization and zero-copy tokenizing
//! - [`encoder`]: One pure encoder per instruction family
//! - [`assembler`]: The single-pass translator with its repeated-line filter
//! - [`error`]: Declared errors for lines and runs
//! - [`macros`]: Word construction
//!
//! # Example
//!
//! ```rust
//! use nha_asm::{Assembler, AssemblerConfig, ErrorPolicy};
//!
//! let source = "ldr A, $2\nldr D, A\nldr A, $3\nadd D, D, A\nldr A, $0\nstr (A), D";
//! let words = Assembler::default().assemble_str(source).unwrap();
//! assert_eq!(words[3], "1110000010010000");
//!
//! // Fail fast instead of skipping malformed lines
//! let strict = Assembler::new(AssemblerConfig::default().on_malformed(ErrorPolicy::Abort));
//! assert!(strict.assemble_str("add d, d").is_err());
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

#[macro_use]
pub mod macros;

pub mod assembler;
pub mod code;
pub mod encoder;
pub mod error;
pub mod parser;

pub use assembler::{Assembler, AssemblerConfig, ErrorPolicy, Summary};
pub use error::{AssembleError, EncodeError};
pub use parser::Mnemonic;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pipeline_by_hand() {
        let source = "ldr D, (A)\nsub D, D, (A)\njgt D\njmp\nstr (A), D";

        let words: Vec<String> = parser::split_lines(source)
            .filter_map(parser::normalize)
            .filter_map(|line| encoder::encode(&parser::tokenize(&line)).unwrap())
            .collect();

        assert_eq!(
            words,
            [
                "1111110000010000",
                "1111010011010000",
                "1110001100000001",
                "1110101010000111",
                "1110001100001000",
            ]
        );
    }

    #[test]
    fn test_a_instruction_example() {
        let words = Assembler::default().assemble_str("ldr A, $21").unwrap();
        assert_eq!(words, ["0000000000010101"]);
    }
}
