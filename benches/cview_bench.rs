use criterion::{Criterion, criterion_group, criterion_main};
use std::process::Command;

fn benchmark_cview_dry_run(c: &mut Criterion) {
    c.bench_function("cview list --dry-run", |b| {
        b.iter(|| {
            Command::new("./target/release/cview")
                .args(["list", "--dry-run", "--search", "alice"])
                .output()
                .expect("Failed to execute cview list --dry-run")
        })
    });
}

fn benchmark_cview_dry_run_filters(c: &mut Criterion) {
    c.bench_function("cview list --dry-run with filters", |b| {
        b.iter(|| {
            Command::new("./target/release/cview")
                .args([
                    "list", "--dry-run", "--type", "active", "--source", "LinkedIn", "--source",
                    "GitHub", "--job", "job-123", "--page", "3",
                ])
                .output()
                .expect("Failed to execute cview list --dry-run")
        })
    });
}

criterion_group!(benches, benchmark_cview_dry_run, benchmark_cview_dry_run_filters);
criterion_main!(benches);
