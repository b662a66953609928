//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use kanban_core::session::{BoardSnapshot, ColumnView, TaskView};
use kanban_core::Outcome;
use unicode_width::UnicodeWidthStr;

use crate::script::StepReport;

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}

/// Column header text: title and task count.
fn column_header_plain(column: &ColumnView, max_width: usize) -> String {
    let full = format!("{} {}", column.column.title, column.tasks.len());
    truncate_visual(&full, max_width)
}

fn column_header_colored(column: &ColumnView, max_width: usize) -> ColoredString {
    let label = column_header_plain(column, max_width);
    if column.dragging {
        label.yellow().bold()
    } else {
        label.cyan().bold()
    }
}

/// Single-line task card; content newlines are flattened.
fn format_task_card(task: &TaskView, width: usize) -> String {
    let content = task.task.content.replace('\n', " ");
    let title_width = if width > 4 { width - 3 } else { 1 };
    let title = truncate_visual(&content, title_width);
    let marker = if task.dragging { "» " } else { "· " };
    format!("{}{}", marker, pad_right(&title, title_width + 1))
}

/// Print the board.
pub fn print_board(board: &BoardSnapshot) {
    if board.columns.is_empty() {
        println!("{}", "Empty board. Add a column to get started.".dimmed());
        return;
    }

    let width = term_width();

    if width < 60 {
        print_board_compact(board);
    } else {
        print_board_wide(board, width);
    }
}

/// Columns side-by-side.
fn print_board_wide(board: &BoardSnapshot, term_w: usize) {
    let num_cols = board.columns.len();
    // Distribute width: subtract borders (num_cols + 1 border chars)
    let available = if term_w > num_cols + 1 { term_w - num_cols - 1 } else { num_cols * 10 };
    let col_width = (available / num_cols).clamp(12, 35);

    print_rule("┌", "┬", "┐", num_cols, col_width);

    print!("{}", "│".dimmed());
    for (i, col) in board.columns.iter().enumerate() {
        let header = column_header_colored(col, col_width);
        let header_width = UnicodeWidthStr::width(column_header_plain(col, col_width).as_str());
        let padding = col_width.saturating_sub(header_width);
        let left_pad = padding / 2;
        let right_pad = padding - left_pad;
        print!("{}{}{}", " ".repeat(left_pad), header, " ".repeat(right_pad));
        if i < num_cols - 1 {
            print!("{}", "│".dimmed());
        }
    }
    println!("{}", "│".dimmed());

    print_rule("├", "┼", "┤", num_cols, col_width);

    let max_tasks = board.columns.iter().map(|c| c.tasks.len()).max().unwrap_or(0);
    for i in 0..max_tasks {
        print!("{}", "│".dimmed());
        for (ci, col) in board.columns.iter().enumerate() {
            match col.tasks.get(i) {
                Some(task) => {
                    let card = format_task_card(task, col_width);
                    let card = truncate_visual(&card, col_width);
                    let card = pad_right(&card, col_width);
                    if task.dragging {
                        print!("{}", card.yellow());
                    } else {
                        print!("{}", card);
                    }
                }
                None => print!("{}", " ".repeat(col_width)),
            }
            if ci < num_cols - 1 {
                print!("{}", "│".dimmed());
            }
        }
        println!("{}", "│".dimmed());
    }

    print_rule("└", "┴", "┘", num_cols, col_width);
    print_footer(board);
}

fn print_rule(left: &str, mid: &str, right: &str, num_cols: usize, col_width: usize) {
    print!("{}", left.dimmed());
    for i in 0..num_cols {
        print!("{}", "─".repeat(col_width).dimmed());
        if i < num_cols - 1 {
            print!("{}", mid.dimmed());
        }
    }
    println!("{}", right.dimmed());
}

/// One column after another, for narrow terminals.
fn print_board_compact(board: &BoardSnapshot) {
    for col in &board.columns {
        println!("{}", column_header_colored(col, 40));
        if col.tasks.is_empty() {
            println!("  {}", "(empty)".dimmed());
        }
        for task in &col.tasks {
            println!("  {}", format_task_card(task, 36).trim_end());
        }
        println!();
    }
    print_footer(board);
}

fn print_footer(board: &BoardSnapshot) {
    println!(
        "{} column(s), {} task(s)",
        board.columns.len(),
        board.task_count()
    );
    if let Some(column) = &board.active_column {
        println!("{} {}", "Dragging column:".yellow(), column.title);
    }
    if let Some(task) = &board.active_task {
        println!("{} {}", "Dragging task:".yellow(), task.content);
    }
}

/// Print one line per replayed step.
pub fn print_steps(reports: &[StepReport]) {
    for (i, report) in reports.iter().enumerate() {
        let marker = match report.outcome {
            Outcome::Applied => "✓".green().bold(),
            Outcome::NoOp => "·".dimmed(),
        };
        println!("{:>3} {} {}", i + 1, marker, report.description);
    }
    println!();
}
