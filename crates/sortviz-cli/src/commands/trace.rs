use sortviz_core::{Algorithm, generate_trace};

pub fn run(
    algorithm: Algorithm,
    values: Option<&str>,
    size: Option<usize>,
    seed: Option<u64>,
    json: bool,
) {
    let input = super::input_values(values, size, seed).unwrap_or_else(|e| super::fail(e));
    let trace = generate_trace(algorithm, &input);
    log::info!("{algorithm}: {} steps for {} values", trace.len(), input.len());

    if json {
        let out = serde_json::json!({
            "input": input,
            "stats": trace.stats(),
            "trace": trace,
        });
        match serde_json::to_string_pretty(&out) {
            Ok(s) => println!("{s}"),
            Err(e) => super::fail(e),
        }
        return;
    }

    let stats = trace.stats();
    println!("{algorithm} on {} values", input.len());
    println!("Input: {input:?}\n");
    for (i, step) in trace.iter().enumerate() {
        println!("  {i:>6}  {step}");
    }
    println!(
        "\n{} steps: {} compares, {} writes",
        trace.len(),
        stats.compares,
        stats.writes
    );
    println!("Result: {:?}", trace.replay(&input));
}
