//! Loop-control validation stage
//!
//! `विराम` and `अग्रिम` are only legal inside a loop body. The stage walks the normalized
//! program line by line, keeping a running byte offset so an error points at the keyword
//! itself.
//!
//! A line whose trimmed text matches `यावत् (...) {` opens a loop. Two ways of deciding
//! whether a keyword is inside one are available:
//!
//! - [`LoopTracking::BlockStack`] (default): every `{` pushes a block kind, loop for the
//!   loop header's brace and other for anything else, and every `}` pops one. A keyword is
//!   inside a loop when any loop block is on the stack. Braces and keywords are taken in
//!   the order they appear on the line.
//! - [`LoopTracking::Counter`]: a single depth counter, incremented by loop header lines
//!   and decremented by every `}` while positive. Closing a conditional inside a loop
//!   therefore also ends the loop as far as this mode can tell. Kept for compatibility
//!   with programs checked by earlier compilers.
//!
//! Keywords are found by substring, not by word: an identifier such as `अविराम` counts as
//! a `विराम` here even though the rewriter leaves it alone.

use crate::sutra::diagnostics::Diagnostic;
use crate::sutra::error::CompileError;
use crate::sutra::keywords::{Keyword, KEYWORD_TABLE};
use crate::sutra::transforms::Runnable;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static LOOP_HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^{}\s*\(.*?\)\s*\{{", Keyword::Loop.source())).unwrap()
});

const OUTSIDE_LOOP: &str = "loop control keyword found outside of loop";

/// How loop nesting is tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoopTracking {
    #[default]
    BlockStack,
    Counter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Loop,
    Other,
}

/// Loop-control validation stage
pub struct LoopControlValidation {
    tracking: LoopTracking,
}

impl LoopControlValidation {
    pub fn new() -> Self {
        Self::with_tracking(LoopTracking::default())
    }

    pub fn with_tracking(tracking: LoopTracking) -> Self {
        LoopControlValidation { tracking }
    }
}

impl Default for LoopControlValidation {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, String> for LoopControlValidation {
    fn name(&self) -> &'static str {
        "loop_control_validation"
    }

    fn run(&self, input: String) -> Result<String, CompileError> {
        validate_loop_control(&input, self.tracking)?;
        Ok(input)
    }
}

pub fn validate_loop_control(source: &str, tracking: LoopTracking) -> Result<(), CompileError> {
    let mut stack: Vec<Block> = Vec::new();
    let mut depth: usize = 0;
    let mut line_offset = 0;

    for line in source.split('\n') {
        let header_brace = loop_header_brace(line);
        let hits = loop_control_hits(line);

        match tracking {
            LoopTracking::BlockStack => {
                let mut pending = hits.iter().peekable();
                for (idx, ch) in line.char_indices() {
                    if pending.next_if(|&&hit| hit == idx).is_some()
                        && !stack.contains(&Block::Loop)
                    {
                        return Err(outside_loop(source, line_offset + idx));
                    }
                    match ch {
                        '{' if header_brace == Some(idx) => stack.push(Block::Loop),
                        '{' => stack.push(Block::Other),
                        '}' => {
                            stack.pop();
                        }
                        _ => {}
                    }
                }
            }
            LoopTracking::Counter => {
                if header_brace.is_some() {
                    depth += 1;
                }
                if let Some(&first) = hits.first() {
                    if depth == 0 {
                        return Err(outside_loop(source, line_offset + first));
                    }
                }
                for _ in line.matches('}') {
                    depth = depth.saturating_sub(1);
                }
            }
        }

        line_offset += line.len() + 1;
    }

    Ok(())
}

/// Byte index within `line` of the brace opening a loop body, if the line is a loop header.
fn loop_header_brace(line: &str) -> Option<usize> {
    let trimmed = line.trim_start();
    let indent = line.len() - trimmed.len();
    LOOP_HEADER_REGEX
        .find(trimmed)
        .map(|header| indent + header.end() - 1)
}

/// Sorted byte indices of every loop-control keyword on the line.
fn loop_control_hits(line: &str) -> Vec<usize> {
    let mut hits: Vec<usize> = KEYWORD_TABLE
        .into_iter()
        .filter(|keyword| keyword.is_loop_control())
        .flat_map(|keyword| line.match_indices(keyword.source()).map(|(idx, _)| idx))
        .collect();
    hits.sort_unstable();
    hits
}

fn outside_loop(source: &str, offset: usize) -> CompileError {
    CompileError::LoopControl(Diagnostic::locate(OUTSIDE_LOOP, source, offset))
}
