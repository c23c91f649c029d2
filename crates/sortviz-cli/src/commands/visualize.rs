use sortviz_core::{Algorithm, VisualizerConfig};

pub fn run(size: usize, delay_ms: u64, algorithm: Algorithm, seed: Option<u64>) {
    let config = VisualizerConfig {
        array_size: size,
        step_delay_ms: delay_ms,
        algorithm,
    };
    log::info!("opening visualizer: {algorithm}, {size} bars, {delay_ms}ms/step");
    let rng = super::make_rng(seed);
    let mut app = match crate::tui::app::App::new(config, rng) {
        Ok(app) => app,
        Err(e) => super::fail(e),
    };
    if let Err(e) = app.run() {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
}
