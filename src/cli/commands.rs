//! 交互输入解析
//!
//! 将用户的一行输入归类为城市、退出指令或无效输入

use crate::graph::{CityId, CityIndex};

/// 退出指令（不区分大小写）
pub const QUIT_COMMAND: &str = "quit";

/// 城市输入的解析结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityInput {
    /// 已知城市
    City(CityId),
    /// 退出会话
    Quit,
    /// 未知城市，需要重新输入
    Invalid,
}

/// 解析城市输入：去除首尾空白后区分大小写精确匹配
pub fn parse_city_input(input: &str, index: &CityIndex) -> CityInput {
    let input = input.trim();
    if input.eq_ignore_ascii_case(QUIT_COMMAND) {
        return CityInput::Quit;
    }

    match index.lookup(input) {
        Some(id) => CityInput::City(id),
        None => CityInput::Invalid,
    }
}

/// 是否为肯定回答，只有 y/Y 算继续
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
