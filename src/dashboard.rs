//! Terminal dashboard
//!
//! Redraws the whole screen on a fixed cadence: clear, banner, blank line, then
//! one line per visible message.

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::store::MessageStore;
use crate::types::{DisplayConfig, wall_clock_seconds};
use crate::view::{TextStyle, ViewBuilder};

/// Banner printed above the message lines
pub fn banner() -> String {
    format!("{0}CANAnalyzer{0}", "-".repeat(34))
}

/// Periodic terminal renderer over a shared store
#[derive(Debug, Clone)]
pub struct TerminalDashboard {
    store: Arc<MessageStore>,
    config: DisplayConfig,
    style: TextStyle,
}

impl TerminalDashboard {
    pub fn new(store: Arc<MessageStore>, config: DisplayConfig) -> Self {
        Self { store, config, style: TextStyle::Ansi }
    }

    /// Plain output skips screen clearing and styling, e.g. when piping to a file
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Draw one screen as of `now`
    pub fn draw<W: Write>(&self, out: &mut W, now: f64) -> io::Result<usize> {
        let lines = ViewBuilder::new(&self.store, self.config).lines(now, self.style);

        if self.style == TextStyle::Ansi {
            queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
        }
        writeln!(out, "{}", banner())?;
        writeln!(out)?;
        for line in &lines {
            writeln!(out, "{}", line)?;
        }
        out.flush()?;

        Ok(lines.len())
    }

    /// Redraw every `interval` against the wall clock until `cancel` fires
    pub async fn run<W: Write>(
        &self,
        mut out: W,
        interval: Duration,
        cancel: CancellationToken,
    ) -> io::Result<()> {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("Dashboard refreshing every {:?}", interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let shown = self.draw(&mut out, wall_clock_seconds())?;
                    debug!(shown, tracked = self.store.len(), "Dashboard redrawn");
                }
            }
        }

        info!("Dashboard stopped");
        Ok(())
    }
}
