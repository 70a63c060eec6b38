//! Rendering of collected build errors

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::report::BuildReport;

/// Print the report to stderr, one line per error, grouped by kind.
/// Prints nothing for a clean report.
pub fn print_report(report: &BuildReport, use_color: bool) -> io::Result<()> {
    let color_choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(color_choice);
    write_report(&mut stderr, report)
}

pub fn write_report<W: WriteColor>(out: &mut W, report: &BuildReport) -> io::Result<()> {
    let mut heading = ColorSpec::new();
    heading.set_fg(Some(Color::Red)).set_bold(true);

    if !report.reference_errors.is_empty() {
        out.set_color(&heading)?;
        writeln!(out, "Reference errors ({}):", report.reference_errors.len())?;
        out.reset()?;
        for error in &report.reference_errors {
            writeln!(out, "  {}", error)?;
        }
    }

    if !report.highlight_errors.is_empty() {
        out.set_color(&heading)?;
        writeln!(out, "Highlight errors ({}):", report.highlight_errors.len())?;
        out.reset()?;
        for error in &report.highlight_errors {
            writeln!(out, "  {}", error)?;
        }
    }

    Ok(())
}
