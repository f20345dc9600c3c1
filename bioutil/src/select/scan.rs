use serde::Serialize;

use super::{Direction, TieBreak, UniformSource, Verdict};
use crate::error::SelectError;

/// 选择结果：单个位置，或全部并列位置（按输入顺序）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Selected<P> {
    One(P),
    All(Vec<P>),
}

impl<P> Selected<P> {
    pub fn positions(&self) -> &[P] {
        match self {
            Selected::One(p) => std::slice::from_ref(p),
            Selected::All(ps) => ps,
        }
    }

    pub fn into_vec(self) -> Vec<P> {
        match self {
            Selected::One(p) => vec![p],
            Selected::All(ps) => ps,
        }
    }
}

/// 返回最先出现的极值位置。平局时不替换。
pub fn select_first<P, V, I>(input: I, direction: Direction) -> Result<P, SelectError>
where
    I: IntoIterator<Item = (P, V)>,
    V: PartialOrd,
{
    let mut iter = input.into_iter();
    let (mut best_pos, mut best_val) = iter.next().ok_or(SelectError::EmptyInput)?;

    for (pos, val) in iter {
        if direction.judge(&val, &best_val) == Verdict::Better {
            best_pos = pos;
            best_val = val;
        }
    }
    Ok(best_pos)
}

/// 在所有并列极值位置中等概率随机返回一个。
///
/// 单遍扫描，容量为 1 的水塘抽样：第 k 个并列位置以 1/k 的概率替换当前胜者。
/// 归纳可得，处理完 k 个并列位置后，每个位置成为胜者的概率均为 1/k。
/// 出现严格更优的值时，并列计数重置为 1。
pub fn select_random_tie<P, V, I, S>(
    input: I,
    direction: Direction,
    rng: &mut S,
) -> Result<P, SelectError>
where
    I: IntoIterator<Item = (P, V)>,
    V: PartialOrd,
    S: UniformSource + ?Sized,
{
    let mut iter = input.into_iter();
    let (mut best_pos, mut best_val) = iter.next().ok_or(SelectError::EmptyInput)?;
    let mut ties = 1usize;

    for (pos, val) in iter {
        match direction.judge(&val, &best_val) {
            Verdict::Better => {
                best_pos = pos;
                best_val = val;
                ties = 1;
            }
            Verdict::Tie => {
                ties += 1;
                if rng.below(ties) == 0 {
                    best_pos = pos;
                }
            }
            Verdict::Worse => {}
        }
    }
    Ok(best_pos)
}

/// 返回所有并列极值位置，保持输入顺序，结果非空。
pub fn select_all_tied<P, V, I>(input: I, direction: Direction) -> Result<Vec<P>, SelectError>
where
    I: IntoIterator<Item = (P, V)>,
    V: PartialOrd,
{
    let mut iter = input.into_iter();
    let (first_pos, mut best_val) = iter.next().ok_or(SelectError::EmptyInput)?;
    let mut best = vec![first_pos];

    for (pos, val) in iter {
        match direction.judge(&val, &best_val) {
            Verdict::Better => {
                best.clear();
                best.push(pos);
                best_val = val;
            }
            Verdict::Tie => best.push(pos),
            Verdict::Worse => {}
        }
    }
    Ok(best)
}

/// 统一入口：按方向与平局策略选择。`rng` 只在 [`TieBreak::Random`] 下被使用。
pub fn select<P, V, I, S>(
    input: I,
    direction: Direction,
    policy: TieBreak,
    rng: &mut S,
) -> Result<Selected<P>, SelectError>
where
    I: IntoIterator<Item = (P, V)>,
    V: PartialOrd,
    S: UniformSource + ?Sized,
{
    match policy {
        TieBreak::First => select_first(input, direction).map(Selected::One),
        TieBreak::Random => select_random_tie(input, direction, rng).map(Selected::One),
        TieBreak::All => select_all_tied(input, direction).map(Selected::All),
    }
}
