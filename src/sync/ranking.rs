//! 频率排名原语

use std::collections::HashMap;
use std::hash::Hash;

/// 统计每个值的出现次数，按次数降序返回前 n 个不同的值
///
/// 同频值保持首次出现的顺序（稳定排序），这一点被推荐引擎的
/// 标签合并逻辑依赖：两个列表拼接后，先出现的列表在平局时优先。
pub fn top_n<T>(items: &[T], n: usize) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut counts: HashMap<&T, usize> = HashMap::new();
    let mut order: Vec<&T> = Vec::new();

    for item in items {
        let count = counts.entry(item).or_insert(0);
        if *count == 0 {
            order.push(item);
        }
        *count += 1;
    }

    // Vec::sort_by 是稳定排序，同频值保持 order 中的先后
    order.sort_by(|a, b| counts[*b].cmp(&counts[*a]));
    order.into_iter().take(n).cloned().collect()
}
