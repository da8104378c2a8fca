use std::collections::HashMap;
use std::time::Duration;

use crate::runner::Benchmark;

/// Collapses repeated samples of the same benchmark into one record holding
/// the arithmetic mean of every metric. Distinct names keep their first-seen
/// order; a name sampled once passes through unchanged.
pub fn merge_benchmarks(benchmarks: &[Benchmark]) -> Vec<Benchmark> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&Benchmark>> = HashMap::new();
    for bench in benchmarks {
        if !groups.contains_key(bench.name.as_str()) {
            order.push(&bench.name);
        }
        groups.entry(&bench.name).or_insert_with(Vec::new).push(bench);
    }

    order
        .into_iter()
        .map(|name| {
            let samples = &groups[name];
            let count = samples.len() as u64;
            Benchmark {
                name: name.to_owned(),
                allocs: samples.iter().map(|b| b.allocs).sum::<u64>() / count,
                bytes: samples.iter().map(|b| b.bytes).sum::<u64>() / count,
                duration: samples.iter().map(|b| b.duration).sum::<Duration>() / count as u32,
            }
        })
        .collect()
}
