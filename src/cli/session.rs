//! 交互会话
//!
//! 读取起点/终点城市、查询最短路径、询问是否继续。
//! 输入通过 [`LineSource`] 抽象，rustyline 和测试脚本都可以驱动会话。

use super::commands::{is_affirmative, parse_city_input, CityInput};
use super::printer::Printer;
use crate::algorithm::{PathFinder, PathResult};
use crate::error::{Error, Result};
use crate::geo::CoordinateLookup;
use crate::graph::{CityGraph, CityId, CityIndex};
use crate::render::MapRenderer;
use crate::types::format_miles;
use rustyline::error::ReadlineError;
use rustyline::history::History;
use rustyline::{Editor, Helper};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

const START_PROMPT: &str = "Enter the starting city (or 'quit' to exit): ";
const END_PROMPT: &str = "Enter the destination city (or 'quit' to exit): ";
const CONTINUE_PROMPT: &str = "Do you want to find another path? (y/n): ";

/// 读取一行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl-C
    Interrupted,
    /// Ctrl-D 或输入结束
    Eof,
}

/// 行输入源
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;
}

impl<H: Helper, I: History> LineSource for Editor<H, I> {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.add_history_entry(line.as_str());
                }
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(e) => Err(Error::ShellError(e.to_string())),
        }
    }
}

/// 会话结束原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// 输入了 quit
    Quit,
    /// 不再继续查询
    Declined,
    /// 用户中断
    Interrupted,
    /// 输入结束
    EndOfInput,
}

/// 会话配置
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// 每次查询后是否生成地图
    pub render_map: bool,
    /// 地图输出路径
    pub map_output: PathBuf,
    pub renderer: MapRenderer,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            render_map: true,
            map_output: MapRenderer::default_output_path(),
            renderer: MapRenderer::default(),
        }
    }
}

enum Prompted {
    City(CityId),
    End(SessionEnd),
}

/// 交互式最短路径查询
pub struct Shell<'a> {
    index: &'a CityIndex,
    finder: PathFinder,
    lookup: &'a dyn CoordinateLookup,
    config: ShellConfig,
    printer: Printer,
}

impl<'a> Shell<'a> {
    pub fn new(
        index: &'a CityIndex,
        graph: Arc<CityGraph>,
        lookup: &'a dyn CoordinateLookup,
        config: ShellConfig,
    ) -> Self {
        Self {
            index,
            finder: PathFinder::new(graph),
            lookup,
            config,
            printer: Printer::new(),
        }
    }

    /// 运行会话直到退出
    pub fn run<S: LineSource, W: Write>(&self, input: &mut S, out: &mut W) -> Result<SessionEnd> {
        loop {
            let start = match self.prompt_city(input, out, START_PROMPT)? {
                Prompted::City(id) => id,
                Prompted::End(end) => return Ok(end),
            };
            let end = match self.prompt_city(input, out, END_PROMPT)? {
                Prompted::City(id) => id,
                Prompted::End(end) => return Ok(end),
            };

            self.answer(start, end, out)?;

            match input.read_line(CONTINUE_PROMPT)? {
                ReadOutcome::Line(answer) if is_affirmative(&answer) => continue,
                ReadOutcome::Line(_) => return self.finish(out, SessionEnd::Declined),
                ReadOutcome::Interrupted => return self.finish(out, SessionEnd::Interrupted),
                ReadOutcome::Eof => return self.finish(out, SessionEnd::EndOfInput),
            }
        }
    }

    /// 按城市名查询一次，未知城市返回 `CityNotFound`
    pub fn answer_by_name<W: Write>(
        &self,
        start: &str,
        end: &str,
        out: &mut W,
    ) -> Result<Option<PathResult>> {
        let start = self.index.id_of(start)?;
        let end = self.index.id_of(end)?;
        self.answer(start, end, out)
    }

    /// 查询并输出一条最短路径
    pub fn answer<W: Write>(
        &self,
        start: CityId,
        end: CityId,
        out: &mut W,
    ) -> Result<Option<PathResult>> {
        let path = self.finder.shortest_path(start, end)?;

        let Some(path) = path else {
            debug!(start = start.as_usize(), end = end.as_usize(), "无可达路径");
            writeln!(out, "No path exists.")?;
            return Ok(None);
        };

        if self.config.render_map {
            // 渲染失败不影响查询结果
            match self.config.renderer.save(
                &self.config.map_output,
                self.index,
                &path,
                self.lookup,
            ) {
                Ok(()) => writeln!(
                    out,
                    "Shortest path map saved as '{}'.",
                    self.config.map_output.display()
                )?,
                Err(e) => {
                    warn!(error = %e, "地图保存失败");
                    writeln!(out, "Failed to save map: {}", e)?;
                }
            }
        }

        writeln!(
            out,
            "Shortest path: {}",
            self.printer.format_route(self.index, &path)
        )?;
        write!(
            out,
            "{}",
            self.printer
                .format_legs(self.index, self.finder.graph(), &path)
        )?;
        writeln!(out, "Total distance: {}", format_miles(path.total_distance))?;

        Ok(Some(path))
    }

    fn prompt_city<S: LineSource, W: Write>(
        &self,
        input: &mut S,
        out: &mut W,
        prompt: &str,
    ) -> Result<Prompted> {
        loop {
            match input.read_line(prompt)? {
                ReadOutcome::Line(line) => match parse_city_input(&line, self.index) {
                    CityInput::City(id) => return Ok(Prompted::City(id)),
                    CityInput::Quit => return self.finish(out, SessionEnd::Quit).map(Prompted::End),
                    CityInput::Invalid => writeln!(out, "Invalid city. Please try again.")?,
                },
                ReadOutcome::Interrupted => {
                    return self.finish(out, SessionEnd::Interrupted).map(Prompted::End)
                }
                ReadOutcome::Eof => return self.finish(out, SessionEnd::EndOfInput).map(Prompted::End),
            }
        }
    }

    fn finish<W: Write>(&self, out: &mut W, end: SessionEnd) -> Result<SessionEnd> {
        match end {
            SessionEnd::Interrupted => writeln!(out, "\nProgram interrupted.")?,
            _ => writeln!(out, "Exiting the program...")?,
        }
        Ok(end)
    }
}
