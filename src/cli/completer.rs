//! 城市名补全器
//!
//! 基于 rustyline 实现 Tab 补全功能

use super::commands::QUIT_COMMAND;
use crate::graph::CityIndex;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// 城市名补全器
#[derive(Debug, Default, Clone)]
pub struct CityCompleter {
    candidates: Vec<String>,
}

impl CityCompleter {
    pub fn new(index: &CityIndex) -> Self {
        let mut candidates: Vec<String> = index.iter().map(|(_, name)| name.to_string()).collect();
        candidates.push(QUIT_COMMAND.to_string());
        Self { candidates }
    }

    /// 返回补全起始位置和候选项
    fn candidates_for(&self, line_to_cursor: &str) -> (usize, Vec<Pair>) {
        let typed = line_to_cursor.trim_start();
        let start_pos = line_to_cursor.len() - typed.len();

        let completions = self
            .candidates
            .iter()
            .filter(|name| name.starts_with(typed))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();

        (start_pos, completions)
    }
}

impl Completer for CityCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates_for(&line[..pos]))
    }
}

impl Hinter for CityCompleter {
    type Hint = String;
}

impl Highlighter for CityCompleter {}

impl Validator for CityCompleter {}

impl Helper for CityCompleter {}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacements(pairs: &[Pair]) -> Vec<&str> {
        pairs.iter().map(|p| p.replacement.as_str()).collect()
    }

    #[test]
    fn test_complete_city_prefix() {
        let index = CityIndex::from_names(["New Bedford", "New Haven", "Newton", "Boston"]);
        let completer = CityCompleter::new(&index);

        let (pos, pairs) = completer.candidates_for("New ");
        assert_eq!(pos, 0);
        assert_eq!(replacements(&pairs), vec!["New Bedford", "New Haven"]);

        let (pos, pairs) = completer.candidates_for("  Bos");
        assert_eq!(pos, 2);
        assert_eq!(replacements(&pairs), vec!["Boston"]);
    }

    #[test]
    fn test_complete_quit() {
        let index = CityIndex::from_names(["Boston"]);
        let (_, pairs) = CityCompleter::new(&index).candidates_for("qu");
        assert_eq!(replacements(&pairs), vec!["quit"]);
    }
}
