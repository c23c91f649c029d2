//! TUI application state and event loop.
//!
//! One [`Visualizer`] session drives the bars. The loop sleeps in
//! `event::poll` until either a key arrives or the next trace step is due,
//! so animation timing never waits on input.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use rand::rngs::StdRng;
use sortviz_core::config::{ARRAY_SIZE_RANGE, STEP_DELAY_MS_RANGE};
use sortviz_core::{Algorithm, PlaybackState, Visualizer, VisualizerConfig};
use sortviz_tests::SelfTestResult;

/// Upper bound on one `event::poll` wait.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Bars added or removed per `[` / `]` press.
const SIZE_STEP: usize = 10;

/// Milliseconds added or removed per `-` / `+` press.
const DELAY_STEP_MS: u64 = 2;

pub struct App {
    visualizer: Visualizer,
    rng: StdRng,
    running: bool,
    status: Option<String>,
    self_test: Option<Vec<SelfTestResult>>,
}

impl App {
    pub fn new(config: VisualizerConfig, mut rng: StdRng) -> sortviz_core::Result<Self> {
        let visualizer = Visualizer::new(config, &mut rng)?;
        Ok(Self {
            visualizer,
            rng,
            running: true,
            status: None,
            self_test: None,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Restore the terminal before the panic message is printed.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
            original_hook(info);
        }));

        let result = self.run_loop(&mut terminal);

        let _ = std::panic::take_hook();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        self.visualizer.stop();
        result
    }

    fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        while self.running {
            terminal.draw(|f| super::ui::draw(f, self))?;

            if event::poll(self.poll_timeout())?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key.code);
            }

            self.visualizer.tick();
        }

        Ok(())
    }

    fn poll_timeout(&self) -> Duration {
        self.visualizer
            .time_to_next_tick()
            .map_or(IDLE_POLL, |wait| wait.min(IDLE_POLL))
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char(' ') | KeyCode::Enter => {
                let result = self.visualizer.start_sort().map(|_| ());
                self.report(result, || "sorting".to_string());
                if self.visualizer.is_running() {
                    self.self_test = None;
                }
            }
            KeyCode::Char('x') => {
                if self.visualizer.is_running() {
                    self.visualizer.stop();
                    self.status = Some("stopped".to_string());
                }
            }
            KeyCode::Char('n') => {
                let result = self.visualizer.reset_array(&mut self.rng);
                self.report(result, || "new array".to_string());
            }
            KeyCode::Char('a') => {
                let next = self.visualizer.config().algorithm.next();
                self.select_algorithm(next);
            }
            KeyCode::Char(c @ '1'..='4') => {
                let idx = (c as usize) - ('1' as usize);
                self.select_algorithm(Algorithm::ALL[idx]);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let delay = self.visualizer.config().step_delay_ms;
                self.set_delay(delay.saturating_sub(DELAY_STEP_MS));
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                let delay = self.visualizer.config().step_delay_ms;
                self.set_delay(delay + DELAY_STEP_MS);
            }
            KeyCode::Char(']') => {
                let size = self.visualizer.config().array_size;
                self.set_size(size + SIZE_STEP);
            }
            KeyCode::Char('[') => {
                let size = self.visualizer.config().array_size;
                self.set_size(size.saturating_sub(SIZE_STEP));
            }
            KeyCode::Char('t') => self.run_self_tests(),
            _ => {}
        }
    }

    fn select_algorithm(&mut self, algorithm: Algorithm) {
        let result = self.visualizer.set_algorithm(algorithm);
        self.report(result, || format!("algorithm: {algorithm}"));
    }

    fn set_delay(&mut self, delay_ms: u64) {
        let delay_ms = delay_ms.clamp(*STEP_DELAY_MS_RANGE.start(), *STEP_DELAY_MS_RANGE.end());
        let result = self.visualizer.set_step_delay_ms(delay_ms);
        self.report(result, || format!("step delay: {delay_ms}ms"));
    }

    fn set_size(&mut self, size: usize) {
        let size = size.clamp(*ARRAY_SIZE_RANGE.start(), *ARRAY_SIZE_RANGE.end());
        let result = self.visualizer.set_array_size(size, &mut self.rng);
        self.report(result, || format!("{size} bars"));
    }

    fn run_self_tests(&mut self) {
        if self.visualizer.is_running() {
            self.status = Some(sortviz_core::SortvizError::Busy.to_string());
            return;
        }
        let results = sortviz_tests::run_self_tests_with(
            &mut self.rng,
            &sortviz_tests::SelfTestConfig::default(),
        );
        let (passed, total) = sortviz_tests::summarize(&results);
        self.status = Some(format!("self-test: {passed}/{total} algorithms passed"));
        self.self_test = Some(results);
    }

    fn report(&mut self, result: sortviz_core::Result<()>, ok: impl FnOnce() -> String) {
        self.status = Some(match result {
            Ok(()) => ok(),
            Err(e) => e.to_string(),
        });
    }

    // --- Accessors for the renderer ---

    pub fn visualizer(&self) -> &Visualizer {
        &self.visualizer
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn self_test(&self) -> Option<&[SelfTestResult]> {
        self.self_test.as_deref()
    }

    /// Short label for the title bar.
    pub fn state_label(&self) -> String {
        match (self.visualizer.playback_state(), self.visualizer.progress()) {
            (Some(PlaybackState::Playing), Some((done, total))) => {
                format!("sorting {done}/{total}")
            }
            (Some(PlaybackState::Emphasis), _) => "sorted".to_string(),
            _ => "idle".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn app() -> App {
        let config = VisualizerConfig {
            array_size: 30,
            ..Default::default()
        };
        App::new(config, StdRng::seed_from_u64(9)).unwrap()
    }

    #[test]
    fn quit_keys_stop_the_loop() {
        let mut a = app();
        a.handle_key(KeyCode::Char('q'));
        assert!(!a.running);

        let mut b = app();
        b.handle_key(KeyCode::Esc);
        assert!(!b.running);
    }

    #[test]
    fn space_starts_and_x_stops() {
        let mut a = app();
        let before = a.visualizer().array().to_vec();
        a.handle_key(KeyCode::Char(' '));
        assert!(a.visualizer().is_running());
        assert_eq!(a.state_label().split(' ').next(), Some("sorting"));

        a.handle_key(KeyCode::Char('x'));
        assert!(!a.visualizer().is_running());
        assert_eq!(a.status(), Some("stopped"));
        assert_eq!(a.visualizer().bars().values(), before.as_slice());
    }

    #[test]
    fn controls_report_busy_while_sorting() {
        let mut a = app();
        a.handle_key(KeyCode::Enter);
        a.handle_key(KeyCode::Char('n'));
        assert_eq!(a.status(), Some(sortviz_core::SortvizError::Busy.to_string().as_str()));
        a.handle_key(KeyCode::Char('t'));
        assert!(a.self_test().is_none());
        assert!(a.visualizer().is_running());
    }

    #[test]
    fn algorithm_keys() {
        let mut a = app();
        assert_eq!(a.visualizer().config().algorithm, Algorithm::Merge);
        a.handle_key(KeyCode::Char('a'));
        assert_eq!(a.visualizer().config().algorithm, Algorithm::Quick);
        a.handle_key(KeyCode::Char('4'));
        assert_eq!(a.visualizer().config().algorithm, Algorithm::Bubble);
        a.handle_key(KeyCode::Char('3'));
        assert_eq!(a.visualizer().config().algorithm, Algorithm::Heap);
        a.handle_key(KeyCode::Char('a'));
        a.handle_key(KeyCode::Char('a'));
        assert_eq!(a.visualizer().config().algorithm, Algorithm::Merge);
    }

    #[test]
    fn delay_keys_clamp_to_range() {
        let mut a = app();
        for _ in 0..50 {
            a.handle_key(KeyCode::Char('+'));
        }
        assert_eq!(a.visualizer().config().step_delay_ms, *STEP_DELAY_MS_RANGE.start());
        for _ in 0..50 {
            a.handle_key(KeyCode::Char('-'));
        }
        assert_eq!(a.visualizer().config().step_delay_ms, *STEP_DELAY_MS_RANGE.end());
    }

    #[test]
    fn size_keys_clamp_and_regenerate() {
        let mut a = app();
        a.handle_key(KeyCode::Char(']'));
        assert_eq!(a.visualizer().array().len(), 40);
        for _ in 0..20 {
            a.handle_key(KeyCode::Char(']'));
        }
        assert_eq!(a.visualizer().array().len(), *ARRAY_SIZE_RANGE.end());
        for _ in 0..20 {
            a.handle_key(KeyCode::Char('['));
        }
        assert_eq!(a.visualizer().array().len(), *ARRAY_SIZE_RANGE.start());
        assert_eq!(a.visualizer().bars().len(), *ARRAY_SIZE_RANGE.start());
    }

    #[test]
    fn self_test_key_records_results() {
        let mut a = app();
        a.handle_key(KeyCode::Char('t'));
        let results = a.self_test().unwrap();
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.passed));
        assert_eq!(a.status(), Some("self-test: 4/4 algorithms passed"));
    }

    #[test]
    fn poll_timeout_is_bounded() {
        let mut a = app();
        assert_eq!(a.poll_timeout(), IDLE_POLL);
        a.handle_key(KeyCode::Char(' '));
        assert!(a.poll_timeout() <= IDLE_POLL);
    }

    #[test]
    fn idle_label() {
        assert_eq!(app().state_label(), "idle");
    }
}
