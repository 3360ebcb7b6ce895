//! 命令行交互模块
//!
//! 包含输入解析、城市名补全、结果打印和交互会话

pub mod commands;
pub mod completer;
pub mod printer;
pub mod session;

pub use commands::{is_affirmative, parse_city_input, CityInput, QUIT_COMMAND};
pub use completer::CityCompleter;
pub use printer::Printer;
pub use session::{LineSource, ReadOutcome, SessionEnd, Shell, ShellConfig};
