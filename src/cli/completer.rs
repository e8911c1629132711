//! 命令补全器
//!
//! 基于 rustyline 实现命令名的 Tab 补全

use super::commands::COMMAND_NAMES;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// PointGraph CLI 补全器
#[derive(Default)]
pub struct CommandCompleter;

impl CommandCompleter {
    pub fn new() -> Self {
        Self
    }

    /// 以 `prefix` 开头的命令名
    pub fn candidates(prefix: &str) -> Vec<&'static str> {
        let prefix = prefix.to_lowercase();
        COMMAND_NAMES
            .iter()
            .copied()
            .filter(|name| name.starts_with(&prefix))
            .collect()
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];

        // 只补全第一个单词，参数是坐标
        let word = line_to_cursor.trim_start();
        if word.contains(char::is_whitespace) {
            return Ok((pos, vec![]));
        }

        let start_pos = pos - word.len();
        let completions = Self::candidates(word)
            .into_iter()
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();

        Ok((start_pos, completions))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}

impl Validator for CommandCompleter {}

impl Helper for CommandCompleter {}
