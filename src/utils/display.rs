//! Display and output formatting utilities

use crate::board::{Cell, Minefield};
use crate::config::OutputFormat;
use crate::game::{BatchSummary, GameReport, MoveRecord};
use anyhow::Result;
use itertools::Itertools;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Format boards and reports for display
pub struct BoardFormatter;

impl BoardFormatter {
    /// Format the ground-truth minefield with coordinates
    pub fn format_minefield_with_coords(minefield: &Minefield) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for col in 0..minefield.width() {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for row in 0..minefield.height() {
            output.push_str(&format!("{:2} ", row));
            for col in 0..minefield.width() {
                let mined = minefield.mines().contains(&Cell::new(row, col));
                output.push_str(if mined { " *" } else { " ·" });
            }
            output.push('\n');
        }

        output
    }

    /// Format the board as the agent sees it: revealed hints, flagged
    /// mines, and unexplored cells
    pub fn format_agent_view(
        height: usize,
        width: usize,
        moves: &[MoveRecord],
        flagged: &HashSet<Cell>,
    ) -> String {
        let hints: HashMap<Cell, Option<usize>> = moves
            .iter()
            .map(|record| (record.cell, record.nearby))
            .collect();

        let mut output = String::new();
        for row in 0..height {
            for col in 0..width {
                let cell = Cell::new(row, col);
                let symbol = match hints.get(&cell) {
                    Some(Some(nearby)) => {
                        char::from_digit(*nearby as u32, 10).unwrap_or('?')
                    }
                    // A revealed cell without a hint was a detonation.
                    Some(None) => '*',
                    None if flagged.contains(&cell) => 'F',
                    None => '·',
                };
                output.push(symbol);
            }
            output.push('\n');
        }
        output
    }

    /// Format a single game report for console output
    pub fn format_report(report: &GameReport) -> String {
        let mut output = String::new();

        output.push_str("=== Game Report ===\n");
        output.push_str(&format!(
            "Board: {}x{}, {} mines\n",
            report.height, report.width, report.mine_count
        ));
        output.push_str(&format!("Outcome: {}\n", report.outcome));
        output.push_str(&format!(
            "Moves: {} ({} safe, {} random)\n",
            report.moves.len(),
            report.safe_moves(),
            report.random_moves()
        ));

        if report.flagged_mines.is_empty() {
            output.push_str("Flagged Mines: none\n");
        } else {
            let flagged = report
                .flagged_mines
                .iter()
                .map(|cell| cell.to_string())
                .join(", ");
            output.push_str(&format!("Flagged Mines: {}\n", flagged));
        }

        output.push('\n');
        output.push_str("Final Board:\n");
        let flagged: HashSet<Cell> = report.flagged_mines.iter().copied().collect();
        output.push_str(&Self::format_agent_view(
            report.height,
            report.width,
            &report.moves,
            &flagged,
        ));

        output
    }

    /// Save reports to files based on output format
    pub fn save_reports<P: AsRef<Path>>(
        reports: &[GameReport],
        output_dir: P,
        format: &OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)?;

        match format {
            OutputFormat::Text => {
                for (i, report) in reports.iter().enumerate() {
                    let filename = format!("report_{:03}.txt", i + 1);
                    let filepath = output_dir.join(filename);
                    let content = Self::format_report(report);
                    std::fs::write(filepath, content)?;
                }
            }
            OutputFormat::Json => {
                for (i, report) in reports.iter().enumerate() {
                    let filename = format!("report_{:03}.json", i + 1);
                    let filepath = output_dir.join(filename);
                    report.save_to_file(&filepath)?;
                }

                // Also save a summary file
                let summary_path = output_dir.join("batch_summary.json");
                let summary = BatchSummary::from_reports(reports);
                let summary_json = serde_json::to_string_pretty(&summary)?;
                std::fs::write(summary_path, summary_json)?;
            }
        }

        Ok(())
    }
}

/// Progress indicator for long game batches
pub struct ProgressIndicator {
    total: usize,
    current: usize,
    last_update: std::time::Instant,
    start_time: std::time::Instant,
}

impl ProgressIndicator {
    /// Create a new progress indicator
    pub fn new(total: usize) -> Self {
        let now = std::time::Instant::now();
        Self {
            total,
            current: 0,
            last_update: now,
            start_time: now,
        }
    }

    /// Update progress and optionally display
    pub fn update(&mut self, current: usize) {
        self.current = current;
        let now = std::time::Instant::now();

        // Update display every 100ms
        if now.duration_since(self.last_update).as_millis() > 100 {
            self.display();
            self.last_update = now;
        }
    }

    /// Display current progress
    pub fn display(&self) {
        let percentage = if self.total > 0 {
            (self.current as f64 / self.total as f64) * 100.0
        } else {
            0.0
        };

        let elapsed = self.start_time.elapsed();
        let eta = if self.current > 0 {
            let rate = self.current as f64 / elapsed.as_secs_f64();
            let remaining = (self.total - self.current) as f64 / rate;
            format!("ETA: {:.1}s", remaining)
        } else {
            "ETA: --".to_string()
        };

        print!(
            "\rPlayed: {}/{} ({:.1}%) - {}",
            self.current, self.total, percentage, eta
        );
        std::io::Write::flush(&mut std::io::stdout()).ok();
    }

    /// Finish and clear the progress line
    pub fn finish(&self) {
        println!(
            "\rCompleted: {}/{} (100.0%) - Total time: {:.1}s",
            self.total,
            self.total,
            self.start_time.elapsed().as_secs_f64()
        );
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Magenta => 35,
            Color::Cyan => 36,
        }
    }
}
