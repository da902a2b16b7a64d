//! Combine pipeline benchmarks.
//!
//! Measures merge throughput over growing contributor counts. The pipeline
//! is a single-threaded batch transform, so wall-clock should scale roughly
//! linearly with total input size.
//!
//! # Running
//!
//! ```bash
//! cargo bench --bench combine
//! # With a custom filter:
//! cargo bench --bench combine -- emit
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use weld::combine::{combine, emit};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build `n` contributor files for the same subject. A third of the units
/// share one scenario name so collision renaming is on the hot path.
fn contributors(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let unit = if i % 3 == 0 {
                "loginOutputFalse".to_owned()
            } else {
                format!("scenario{i}")
            };
            format!(
                "\
package com.example.app;

import com.example.app.UserAccess;
import org.junit.Assert;
import org.junit.Test;
import com.example.dep{i}.Helper;

public class UserAccess {{

  /*
   * This test case covers branch {i}.
   */
  @Test
  public void {unit}() {{

    // Act
    final boolean retval = new UserAccess().loginUser(\"user{i}\", \"\");

    // Assert result
    Assert.assertEquals(false, retval);

  }}
}}
"
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_combine(c: &mut Criterion) {
    let mut group = c.benchmark_group("combine");
    for n in [2_usize, 10, 50] {
        let sources = contributors(n);
        let bytes: usize = sources.iter().map(String::len).sum();
        group.throughput(Throughput::Bytes(bytes as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &sources, |b, sources| {
            b.iter(|| combine(sources).expect("bench sources merge"));
        });
    }
    group.finish();
}

fn bench_emit(c: &mut Criterion) {
    let sources = contributors(50);
    let merged = combine(&sources).expect("bench sources merge");
    c.bench_function("emit/50", |b| b.iter(|| emit(&merged)));
}

criterion_group!(benches, bench_combine, bench_emit);
criterion_main!(benches);
