//! 演示三种平局策略，以及随机平局的经验分布。
//!
//! 运行方式：
//! ```bash
//! cargo run --example tie_break
//! ```

use std::collections::BTreeMap;

use bioutil::select::{self, Direction, TieBreak};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let values = [5, 3, 3, 8, 3];
    let mut rng = StdRng::seed_from_u64(2024);

    println!("输入: {:?}", values);
    for policy in [TieBreak::First, TieBreak::Random, TieBreak::All] {
        let picked = select::select(values.iter().enumerate(), Direction::Min, policy, &mut rng);
        println!("  min/{:<6} -> {:?}", policy, picked);
    }

    // 重复随机选择，统计各并列位置被选中的频率
    let trials = 30_000;
    let mut counts = [0usize; 5];
    for _ in 0..trials {
        if let Ok(i) = select::index_min_random_tie(&values, &mut rng) {
            counts[i] += 1;
        }
    }
    println!("\n随机平局 {} 次:", trials);
    for (i, c) in counts.iter().enumerate().filter(|(_, c)| **c > 0) {
        println!("  index {}: {:.3}", i, *c as f64 / trials as f64);
    }

    let scores: BTreeMap<&str, i32> = [("a", 2), ("b", 5), ("c", 2)].into_iter().collect();
    println!("\n映射: {:?}", scores);
    println!("  key_max      -> {:?}", select::key_max(&scores));
    println!("  key_min_list -> {:?}", select::key_min_list(&scores));
}
