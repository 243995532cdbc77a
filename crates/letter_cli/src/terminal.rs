use std::io::{self, Stdout, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use letter_render::{Grid, Sink, SinkContent};
use log::warn;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const RESET: &str = "\x1b[0m";

enum Content {
    Empty,
    Loading(String),
    Error(String),
    Grid(Grid),
}

/// Paints pipeline output as 24-bit colored letters.
pub struct TerminalSink<W: Write> {
    out: W,
    visible: bool,
    content: Content,
    spinner: Option<ProgressBar>,
}

impl TerminalSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, visible: false, content: Content::Empty, spinner: None }
    }

    fn paint(&mut self) {
        let result = match &self.content {
            Content::Empty => Ok(()),
            Content::Loading(message) => {
                self.spinner = Some(spinner(message));
                Ok(())
            },
            Content::Error(message) => writeln!(self.out, "\x1b[1;31m{message}{RESET}"),
            Content::Grid(grid) => write_grid(&mut self.out, grid),
        };

        if let Err(err) = result.and_then(|_| self.out.flush()) {
            warn!("failed to paint terminal output: {err}");
        }
    }

    fn hide(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }

        if let Err(err) = write!(self.out, "{CLEAR_SCREEN}").and_then(|_| self.out.flush()) {
            warn!("failed to clear terminal: {err}");
        }
    }
}

impl<W: Write> Sink for TerminalSink<W> {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if visible {
            self.paint();
        } else {
            self.hide();
        }
    }

    fn clear(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        self.content = Content::Empty;
    }

    fn show(&mut self, content: SinkContent<'_>) {
        self.content = match content {
            SinkContent::Loading(message) => Content::Loading(message.to_owned()),
            SinkContent::Error(message) => Content::Error(message.to_owned()),
            SinkContent::Grid(grid) => Content::Grid(grid.clone()),
        };

        if self.visible {
            self.paint();
        }
    }
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Write each letter in its color, darkened toward black by its opacity.
fn write_grid<W: Write>(out: &mut W, grid: &Grid) -> io::Result<()> {
    for row in grid.cell_rows() {
        for cell in row {
            let Some(letter) = cell.letter else {
                write!(out, " ")?;
                continue;
            };

            let opacity = cell.opacity();
            let [r, g, b] = [cell.red, cell.green, cell.blue]
                .map(|channel| (channel as f32 * opacity).round() as u8);
            write!(out, "\x1b[38;2;{r};{g};{b}m{letter}")?;
        }
        writeln!(out, "{RESET}")?;
    }
    Ok(())
}
