//! 基于键值对的入口。
//!
//! 输入是任意 `(key, value)` 迭代器，例如 `&HashMap<K, V>`、`&BTreeMap<K, V>` 或
//! `Vec<(K, V)>`。"第一个"指迭代顺序中的第一个：`HashMap` 的迭代顺序不固定，
//! 需要确定性结果时应使用 `BTreeMap` 或有序的键值对列表。

use super::{select_all_tied, select_first, select_random_tie, Direction, UniformSource};
use crate::error::SelectError;

/// 值最小的键（平局取迭代顺序中的第一个）
pub fn key_min<K, V, I>(pairs: I) -> Result<K, SelectError>
where
    I: IntoIterator<Item = (K, V)>,
    V: PartialOrd,
{
    select_first(pairs, Direction::Min)
}

/// 值最大的键（平局取迭代顺序中的第一个）
pub fn key_max<K, V, I>(pairs: I) -> Result<K, SelectError>
where
    I: IntoIterator<Item = (K, V)>,
    V: PartialOrd,
{
    select_first(pairs, Direction::Max)
}

/// 值最小的键（平局时在并列者中等概率随机选取）
pub fn key_min_random_tie<K, V, I, S>(pairs: I, rng: &mut S) -> Result<K, SelectError>
where
    I: IntoIterator<Item = (K, V)>,
    V: PartialOrd,
    S: UniformSource + ?Sized,
{
    select_random_tie(pairs, Direction::Min, rng)
}

/// 值最大的键（平局时在并列者中等概率随机选取）
pub fn key_max_random_tie<K, V, I, S>(pairs: I, rng: &mut S) -> Result<K, SelectError>
where
    I: IntoIterator<Item = (K, V)>,
    V: PartialOrd,
    S: UniformSource + ?Sized,
{
    select_random_tie(pairs, Direction::Max, rng)
}

/// 值最小的全部键，按迭代顺序
pub fn key_min_list<K, V, I>(pairs: I) -> Result<Vec<K>, SelectError>
where
    I: IntoIterator<Item = (K, V)>,
    V: PartialOrd,
{
    select_all_tied(pairs, Direction::Min)
}

/// 值最大的全部键，按迭代顺序
pub fn key_max_list<K, V, I>(pairs: I) -> Result<Vec<K>, SelectError>
where
    I: IntoIterator<Item = (K, V)>,
    V: PartialOrd,
{
    select_all_tied(pairs, Direction::Max)
}
