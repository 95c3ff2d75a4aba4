use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::render::SvgDocument;
use crate::schedule::{GridCell, ScheduleGrid};

/// Formats a cell as `name [room] (teacher)`, leaving out blank parts
pub fn format_cell(cell: &GridCell) -> String {
    let primary = &cell.resolved.primary;
    if !primary.has_name() && primary.room.is_empty() && primary.teacher.is_empty() {
        return "[EMPTY]".to_string();
    }

    let mut text = primary.name.clone();
    if !primary.room.is_empty() {
        text.push_str(&format!(" [{}]", primary.room));
    }
    if !primary.teacher.is_empty() {
        text.push_str(&format!(" ({})", primary.teacher));
    }
    text.trim_start().to_string()
}

/// Writes the composed grid as plain text, one day per block
pub fn write_grid<W: Write>(out: &mut W, title: &str, grid: &ScheduleGrid) -> std::io::Result<()> {
    writeln!(out, "** {} **", title)?;
    for column in grid.columns() {
        writeln!(out, "\n=== {} ===", column.day)?;
        for cell in &column.cells {
            writeln!(out, "  Period {} -> {}", cell.period, format_cell(cell))?;
            if cell.resolved.has_also_note() {
                writeln!(out, "             {}", cell.resolved.also_note)?;
            }
        }
    }
    Ok(())
}

/// Prints the composed grid to stdout
pub fn print_grid(title: &str, grid: &ScheduleGrid) -> std::io::Result<()> {
    let stdout = std::io::stdout();
    write_grid(&mut stdout.lock(), title, grid)
}

/// Saves a rendered document
pub fn write_svg_to_file<P: AsRef<Path>>(svg: &SvgDocument, path: P) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(svg.as_str().as_bytes())?;
    file.flush()
}
