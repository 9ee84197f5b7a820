//! specviz - real-time terminal audio spectrum visualizer
//!
//! Captures the default input device, runs a Hann-windowed FFT on its own
//! cadence, and draws the latest spectrum as colored bars at a fixed frame
//! rate. Quit with `q`, Esc, or Ctrl-C.

use std::io::{self, stdout};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossbeam_channel::{bounded, Receiver};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use specviz_analysis::{bin_count, SpectrumFrame, VisualizationMapper, DEFAULT_FFT_SIZE};
use specviz_audio::{CaptureEvent, CaptureSource, Pipeline, PipelineConfig};
use specviz_tui::SpectrumWidget;

/// Frame rate for the render loop
const FPS: u64 = 60;

fn main() -> anyhow::Result<()> {
    // Log to stderr; the alternate screen hides it until exit
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(io::stderr)
        .init();

    // All fatal initialization happens before any thread or raw-mode
    // terminal exists: device acquisition, buffer allocation, FFT planning.
    let source = CaptureSource::open().context("audio capture unavailable")?;
    let config = PipelineConfig {
        fft_size: DEFAULT_FFT_SIZE,
        sample_rate: source.sample_rate(),
    };
    let mut pipeline = Pipeline::new(config);

    let (evt_tx, evt_rx) = bounded::<CaptureEvent>(16);
    let stream = source
        .start(pipeline.sink(), evt_tx)
        .context("failed to start audio capture")?;

    let analysis_handle = pipeline.spawn_analysis();
    tracing::info!(
        fft_size = config.fft_size,
        sample_rate = config.sample_rate,
        "pipeline running"
    );

    // Initialize terminal
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_render_loop(&mut terminal, &pipeline, evt_rx);

    // Teardown, in reverse: stop the loops, restore the terminal, stop
    // capture, then join the worker.
    pipeline.shutdown();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    drop(stream);
    join_analysis(analysis_handle);

    result
}

fn join_analysis(handle: JoinHandle<()>) {
    if handle.join().is_err() {
        tracing::error!("analysis worker panicked");
    }
}

/// Fixed-rate render consumer: read the latest spectrum, map it to bars,
/// draw, then poll input for the rest of the frame interval.
fn run_render_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    pipeline: &Pipeline,
    capture_events: Receiver<CaptureEvent>,
) -> anyhow::Result<()> {
    let spectrum = pipeline.spectrum();
    let bins = bin_count(pipeline.config().fft_size);
    let mut mapper = VisualizationMapper::new(bins);
    let mut frame = SpectrumFrame::new(bins);

    let frame_duration = Duration::from_millis(1000 / FPS);

    while pipeline.is_running() {
        let frame_start = Instant::now();

        // A stream error after startup is fatal by design: no degraded mode
        if let Ok(CaptureEvent::Error(err)) = capture_events.try_recv() {
            pipeline.shutdown();
            tracing::error!(%err, "audio stream failed");
            anyhow::bail!("audio stream failed: {err}");
        }

        // Staleness is fine: if analysis hasn't published since the last
        // frame we simply redraw the same spectrum.
        spectrum.read_into(&mut frame);
        let bars = mapper.map(&frame);

        terminal.draw(|f| {
            f.render_widget(SpectrumWidget::new(bars), f.area());
        })?;

        // Spend the rest of the frame interval waiting for input
        let timeout = frame_duration.saturating_sub(frame_start.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                let ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    pipeline.shutdown();
                }
            }
        }
    }

    Ok(())
}
