//! Program translator
//!
//! Drives normalization, tokenizing and encoding over one program, filters
//! repeated lines and hands every word to an output sink in source order.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::encoder;
use crate::error::AssembleError;
use crate::parser;

/// What to do with a line that fails to encode
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum ErrorPolicy {
    /// Drop the line, log a warning and keep going
    #[default]
    Skip,
    /// Stop the run and report the line
    Abort,
}

/// Per-run options
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct AssemblerConfig {
    /// Emit each distinct normalized line only once
    pub deduplicate: bool,
    pub on_malformed: ErrorPolicy,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            deduplicate: true,
            on_malformed: ErrorPolicy::Skip,
        }
    }
}

impl AssemblerConfig {
    #[must_use]
    pub const fn deduplicate(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }

    #[must_use]
    pub const fn on_malformed(mut self, policy: ErrorPolicy) -> Self {
        self.on_malformed = policy;
        self
    }
}

/// Counters for one run
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct Summary {
    /// Words written to the sink
    pub emitted: usize,
    /// Lines skipped because the same normalized text was already emitted
    pub duplicates: usize,
    /// Lines that produce no output by design
    pub dropped: usize,
    /// Malformed lines skipped under [`ErrorPolicy::Skip`]
    pub malformed: usize,
}

/// Single-pass assembler
///
/// Holds only configuration; all per-run state lives inside one call.
///
/// # Example
/// ```
/// use nha_asm::Assembler;
///
/// let words = Assembler::default()
///     .assemble_str("ldr A, $2\nldr D, A\nldr A, $2 // again\n")
///     .unwrap();
/// assert_eq!(words, ["0000000000000010", "1110110000010000"]);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Assembler {
    config: AssemblerConfig,
}

impl Assembler {
    #[must_use]
    pub const fn new(config: AssemblerConfig) -> Self {
        Self { config }
    }

    /// Translates `lines` and writes one newline-terminated word per retained
    /// instruction to `out`
    ///
    /// The sink is flushed before returning, including when the run aborts on
    /// a malformed line; words emitted before that line are kept.
    pub fn assemble<'a, I, W>(&self, lines: I, out: &mut W) -> Result<Summary, AssembleError>
    where
        I: IntoIterator<Item = &'a str>,
        W: Write,
    {
        let result = self.translate(lines, |word| writeln!(out, "{word}").map_err(Into::into));
        out.flush()?;
        result
    }

    /// Translates a whole source text into its words
    pub fn assemble_str(&self, source: &str) -> Result<Vec<String>, AssembleError> {
        let mut words = Vec::new();
        self.translate(parser::split_lines(source), |word| {
            words.push(word);
            Ok(())
        })?;
        Ok(words)
    }

    /// Assembles the file at `input` into `output`
    ///
    /// The input is read in full before `output` is created.
    pub fn assemble_file(&self, input: &Path, output: &Path) -> Result<Summary, AssembleError> {
        let source = fs::read_to_string(input).map_err(|source| AssembleError::Read {
            path: input.to_path_buf(),
            source,
        })?;

        let write_error = |source| AssembleError::Write {
            path: output.to_path_buf(),
            source,
        };
        let file = File::create(output).map_err(write_error)?;
        let mut writer = BufWriter::new(file);

        match self.assemble(parser::split_lines(&source), &mut writer) {
            Err(AssembleError::Io(source)) => Err(write_error(source)),
            other => other,
        }
    }

    /// Core loop shared by every sink
    fn translate<'a, I, F>(&self, lines: I, mut emit: F) -> Result<Summary, AssembleError>
    where
        I: IntoIterator<Item = &'a str>,
        F: FnMut(String) -> Result<(), AssembleError>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let mut summary = Summary::default();

        for (index, raw) in lines.into_iter().enumerate() {
            let line_number = index + 1;
            let Some(line) = parser::normalize(raw) else {
                continue;
            };

            if self.config.deduplicate && seen.contains(&line) {
                debug!(line = line_number, text = %line, "skipping repeated instruction");
                summary.duplicates += 1;
                continue;
            }

            match encoder::encode_line(&line) {
                Ok(Some(word)) => {
                    trace!(line = line_number, text = %line, %word, "encoded");
                    emit(word)?;
                    summary.emitted += 1;
                    if self.config.deduplicate {
                        seen.insert(line);
                    }
                }
                Ok(None) => {
                    debug!(line = line_number, text = %line, "no output for line");
                    summary.dropped += 1;
                }
                Err(source) => match self.config.on_malformed {
                    ErrorPolicy::Skip => {
                        warn!(line = line_number, text = %line, error = %source, "skipping malformed instruction");
                        summary.malformed += 1;
                    }
                    ErrorPolicy::Abort => {
                        return Err(AssembleError::Malformed {
                            line: line_number,
                            text: line,
                            source,
                        });
                    }
                },
            }
        }

        Ok(summary)
    }
}
