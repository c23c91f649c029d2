use sortviz_core::{Algorithm, sort_only};

pub fn run(algorithm: Algorithm, values: &str) {
    let input = super::parse_values(values).unwrap_or_else(|e| super::fail(e));
    let sorted = sort_only(algorithm, &input);
    let line: Vec<String> = sorted.iter().map(|v| v.to_string()).collect();
    println!("{}", line.join(","));
}
