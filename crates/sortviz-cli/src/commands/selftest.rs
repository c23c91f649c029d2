use std::time::Instant;

use sortviz_tests::{SelfTestConfig, run_self_tests_with, summarize};

pub fn run(trials: usize, seed: Option<u64>, json: bool) {
    let config = SelfTestConfig {
        trials,
        ..Default::default()
    };
    let mut rng = super::make_rng(seed);

    if !json {
        println!(
            "Running {} randomized trial(s) per algorithm (lengths {}-{}, values {}..={})...\n",
            config.trials, config.min_len, config.max_len, config.min_value, config.max_value
        );
    }

    log::info!("self-test: {} trials per algorithm, seed {seed:?}", config.trials);
    let t0 = Instant::now();
    let results = run_self_tests_with(&mut rng, &config);
    let elapsed = t0.elapsed().as_secs_f64();
    let (passed, total) = summarize(&results);

    if json {
        let out = serde_json::json!({
            "config": config,
            "passed": passed,
            "total": total,
            "results": results,
        });
        match serde_json::to_string_pretty(&out) {
            Ok(s) => println!("{s}"),
            Err(e) => super::fail(e),
        }
    } else {
        println!("{:<14} {:>6} {:>8}", "Algorithm", "Result", "Trials");
        println!("{}", "-".repeat(30));
        for r in &results {
            let mark = if r.passed { "PASS" } else { "FAIL" };
            println!("{:<14} {:>6} {:>8}", r.algorithm.name(), mark, r.trials_run);
        }
        for r in results.iter().filter(|r| !r.passed) {
            if let Some(case) = &r.first_failure {
                println!("\n{} failed on test case ({} values):", r.algorithm, case.len());
                println!("  {case:?}");
            }
        }
        println!("\n{passed}/{total} algorithms passed [{elapsed:.2}s]");
    }

    if passed != total {
        std::process::exit(1);
    }
}
