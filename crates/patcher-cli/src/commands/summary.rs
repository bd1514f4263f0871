//! Per-file lines and the closing summary shared by batch commands.

use colored::Colorize;

use patcher_core::{BatchReport, FileReport, FileStatus};

fn notes(file: &FileReport) -> String {
    file.notes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn print_file(file: &FileReport) {
    match file.status {
        FileStatus::Modified => {
            println!("   {} {}", "~".green(), file.file_name().cyan());
            for note in file.notes.iter().filter(|note| note.is_change()) {
                println!("       {}", note);
            }
        }
        FileStatus::Skipped => {
            println!(
                "   {} {} {}",
                "-".dimmed(),
                file.file_name(),
                notes(file).dimmed()
            );
        }
        FileStatus::Errored => {
            println!(
                "   {} {}: {}",
                "!".red(),
                file.file_name().cyan(),
                file.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
}

fn print_bucket(label: colored::ColoredString, report: &BatchReport, status: FileStatus) {
    let names: Vec<_> = report
        .with_status(status)
        .map(FileReport::file_name)
        .collect();
    if !names.is_empty() {
        println!("  {}: {}", label, names.join(", "));
    }
}

/// Prints every file, then the bucket counts and names.
pub fn print_report(report: &BatchReport) {
    for file in &report.files {
        print_file(file);
    }

    println!();
    if report.total() == 0 {
        println!("{} No matching files.", "OK".green().bold());
        return;
    }

    let verb = if report.dry_run { "would modify" } else { "modified" };
    println!(
        "{} {} {}, {} skipped, {} errored (of {})",
        "Summary:".bold(),
        report.count(FileStatus::Modified),
        verb,
        report.count(FileStatus::Skipped),
        report.count(FileStatus::Errored),
        report.total()
    );
    print_bucket("Modified".green(), report, FileStatus::Modified);
    print_bucket("Skipped".dimmed(), report, FileStatus::Skipped);
    print_bucket("Errored".red(), report, FileStatus::Errored);
}

/// Prints files with untranslated labels, then how many need work.
pub fn print_audit(report: &BatchReport) {
    for file in &report.files {
        match file.status {
            FileStatus::Errored => print_file(file),
            _ if !file.notes.is_empty() => {
                println!("   {} {}", "?".yellow(), file.file_name().cyan());
                for note in &file.notes {
                    println!("       {}", note);
                }
            }
            _ => {}
        }
    }

    println!();
    let flagged: Vec<_> = report
        .files
        .iter()
        .filter(|file| file.status != FileStatus::Errored && !file.notes.is_empty())
        .map(FileReport::file_name)
        .collect();
    if flagged.is_empty() {
        println!(
            "{} No untranslated labels in {} file(s).",
            "OK".green().bold(),
            report.total() - report.count(FileStatus::Errored)
        );
    } else {
        println!(
            "{} {} of {} file(s) have untranslated labels",
            "Summary:".bold(),
            flagged.len(),
            report.total()
        );
        println!("  {}: {}", "Untranslated".yellow(), flagged.join(", "));
    }
    print_bucket("Errored".red(), report, FileStatus::Errored);
}
