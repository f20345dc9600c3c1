use std::collections::HashMap;
use std::hash::Hash;
use std::ops::AddAssign;

/// 计数表累加：键不存在时以 `by` 插入
pub fn incr<K, C>(counts: &mut HashMap<K, C>, key: K, by: C)
where
    K: Eq + Hash,
    C: AddAssign + Default,
{
    *counts.entry(key).or_default() += by;
}
