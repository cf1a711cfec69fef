//! Display functions for command results

use super::formatters::{board_lines, create_progress_bar, tiles_with_values};
use crate::commands::{BenchmarkResult, EstimateResult, GenerateResult};
use crate::generator::{Archetype, Puzzle};
use crate::solver::PlayRecord;
use colored::Colorize;

/// Print a generated puzzle
pub fn print_generate_result(result: &GenerateResult, show_line: bool) {
    print_puzzle(&result.puzzle);
    if show_line {
        print_play_line(result.puzzle.best_line());
    }
    println!("\n   Generated in {:.2}s", result.duration.as_secs_f64());
}

/// Print a puzzle: header, board, letters, thresholds
pub fn print_puzzle(puzzle: &Puzzle) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "PUZZLE".bright_cyan().bold(),
        puzzle.seed().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    println!(
        "\n   Shape: {}   Origin: {}",
        puzzle.archetype().to_string().bright_white(),
        puzzle.origin()
    );
    println!();
    for line in board_lines(puzzle.board()) {
        println!("   {line}");
    }

    println!(
        "\n🔤 {} {}",
        "Letters:".bright_cyan().bold(),
        tiles_with_values(puzzle.pool().letters())
    );
    println!(
        "🎯 {} {}",
        "Estimate:".bright_cyan().bold(),
        puzzle.estimate().to_string().bright_yellow().bold()
    );
    for tier in puzzle.thresholds() {
        let bar = create_progress_bar(f64::from(tier.score), f64::from(puzzle.estimate()), 30);
        println!("   {:<8} [{}] {}", tier.label, bar.green(), tier.score);
    }
}

/// Print a solver line turn by turn
pub fn print_play_line(line: &[PlayRecord]) {
    println!("\n📜 {}", "Best line found:".bright_cyan().bold());
    if line.is_empty() {
        println!("   {}", "(no playable words)".bright_black());
        return;
    }
    let mut total = 0;
    for play in line {
        total += play.score;
        let extras = if play.words.len() > 1 {
            format!(" (+{})", play.words[1..].join(", ").to_uppercase())
        } else {
            String::new()
        };
        println!(
            "   Turn {}: {:<10} {} {:?}{} → {} (total {})",
            play.turn,
            play.word.to_uppercase().bright_white().bold(),
            play.start,
            play.direction,
            extras.bright_black(),
            format!("+{}", play.score).green(),
            total
        );
    }
}

/// Print the result of re-estimating a puzzle
pub fn print_estimate_result(result: &EstimateResult) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Estimating: {} (T={}, W={}, K={})",
        result.puzzle.seed().bright_yellow().bold(),
        result.beam.turns,
        result.beam.width,
        result.beam.fan_out
    );
    println!("{}", "─".repeat(60).cyan());

    let drift = result.drift();
    let drift_text = match drift {
        0 => "±0".normal(),
        d if d > 0 => format!("+{d}").green(),
        d => format!("{d}").red(),
    };
    println!("\n   Accepted estimate:  {}", result.puzzle.estimate());
    println!(
        "   New estimate:       {} ({drift_text})",
        result.estimate.score.to_string().bright_yellow().bold()
    );
    println!("   States expanded:    {}", result.estimate.states_expanded);
    println!("   Moves considered:   {}", result.estimate.moves_considered);
    println!("   Time taken:         {:.2}s", result.duration.as_secs_f64());

    print_play_line(&result.estimate.history);
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Generation:".bright_cyan().bold());
    println!("   Puzzles:          {}", result.total_puzzles);
    println!(
        "   Accepted:         {}",
        result.generated.to_string().green()
    );
    println!(
        "   Fallbacks:        {}",
        if result.fallbacks == 0 {
            "0".green()
        } else {
            result.fallbacks.to_string().yellow()
        }
    );
    println!("   Average attempts: {:.2}", result.average_attempts);
    println!(
        "   Average estimate: {}",
        format!("{:.1}", result.average_estimate).bright_yellow().bold()
    );
    println!(
        "   Range:            {}-{}",
        result.min_estimate, result.max_estimate
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Puzzles/second:   {:.2}", result.puzzles_per_second);

    if result.generated == 0 {
        return;
    }
    println!("\n📈 {}", "Archetypes:".bright_cyan().bold());
    for archetype in Archetype::ALL {
        let count = result.archetypes.get(&archetype).copied().unwrap_or(0);
        let pct = (count as f64 / result.generated as f64) * 100.0;
        let bar_width = (pct / 2.5) as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(bar_width).green(),
            "░".repeat(40_usize.saturating_sub(bar_width)).bright_black()
        );
        println!("   {:<9} {bar} {count:4} ({pct:5.1}%)", archetype.name());
    }
}
