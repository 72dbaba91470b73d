//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use serde_json::Value;
use ziptask_core::ArchiveManifest;
use ziptask_core::ArchiveReport;
use ziptask_core::ExtractionReport;
use ziptask_core::VerificationReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let digits = n.to_string();
        let mut result = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result
    }

    fn headline(&self, text: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {text}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(text);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_archive_result(&self, report: &ArchiveReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&format!(
            "Archive created: {}",
            report.archive_path.display()
        ));

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "  Files added:      {}",
            Self::format_number(report.files_added)
        ));
        let _ = self.term.write_line(&format!(
            "  Directories:      {}",
            Self::format_number(report.directories_added)
        ));
        let _ = self.term.write_line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_read)
        ));
        let _ = self.term.write_line(&format!(
            "  Archive size:     {}",
            Self::format_size(report.archive_size)
        ));

        if self.verbose {
            let _ = self.term.write_line(&format!(
                "  Compression:      {:.1}%",
                report.compression_percentage()
            ));
            let _ = self
                .term
                .write_line(&format!("  Duration:         {:?}", report.duration));
        }

        if report.entries_skipped > 0 {
            let _ = self
                .term
                .write_line(&format!("  Entries skipped:  {}", report.entries_skipped));
        }

        if report.has_warnings() {
            let _ = self.term.write_line("");
            if self.use_colors {
                let _ = self
                    .term
                    .write_line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                let _ = self.term.write_line("Warnings:");
            }
            for warning in &report.warnings {
                let _ = self.term.write_line(&format!("  - {warning}"));
            }
        }

        Ok(())
    }

    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&format!(
            "Extracted into: {}",
            report.extraction_root.display()
        ));

        let _ = self
            .term
            .write_line(&format!("  Files extracted: {}", report.files_extracted));
        let _ = self
            .term
            .write_line(&format!("  Directories: {}", report.directories_created));
        let _ = self.term.write_line(&format!(
            "  Total size: {}",
            Self::format_size(report.bytes_written)
        ));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Duration: {:?}", report.duration));
            for path in &report.extracted_files {
                let _ = self.term.write_line(&format!("    {}", path.display()));
            }
        }

        Ok(())
    }

    fn format_manifest(
        &self,
        manifest: &ArchiveManifest,
        long: bool,
        human_readable: bool,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if !long {
            for entry in &manifest.entries {
                let _ = self.term.write_line(&entry.name);
            }
            return Ok(());
        }

        let size = |bytes: u64| {
            if human_readable {
                Self::format_size(bytes)
            } else {
                bytes.to_string()
            }
        };

        for entry in &manifest.entries {
            let type_char = if entry.is_dir { "d" } else { "-" };
            let _ = self.term.write_line(&format!(
                "{type_char} {:>10} {:>10}  {:<8} {:08x}  {}",
                size(entry.size),
                size(entry.compressed_size),
                entry.compression,
                entry.crc32,
                entry.name
            ));
        }

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "Total: {} files, {} directories, {} ({} compressed, ratio {:.2})",
            Self::format_number(manifest.total_files),
            Self::format_number(manifest.total_directories),
            Self::format_size(manifest.total_size),
            Self::format_size(manifest.total_compressed_size),
            manifest.compression_ratio()
        ));

        Ok(())
    }

    fn format_verification(&self, report: &VerificationReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let status = match (report.is_valid(), self.use_colors) {
            (true, true) => style("PASSED").green().bold().to_string(),
            (false, true) => style("FAILED").red().bold().to_string(),
            (true, false) => "PASSED".to_string(),
            (false, false) => "FAILED".to_string(),
        };
        let _ = self
            .term
            .write_line(&format!("Archive verification: {status}"));

        let _ = self.term.write_line(&format!(
            "  Entries checked: {}",
            Self::format_number(report.entries_checked)
        ));
        let _ = self.term.write_line(&format!(
            "  Bytes checked:   {}",
            Self::format_size(report.bytes_checked)
        ));

        if !report.is_valid() {
            let _ = self.term.write_line("");
            let _ = self.term.write_line("Damaged entries:");
            for failure in &report.failures {
                let _ = self
                    .term
                    .write_line(&format!("  {}: {}", failure.name, failure.reason));
            }
        }

        Ok(())
    }

    fn format_task_output(&self, _task: &str, outputs: &Value) -> Result<()> {
        // Outputs are the task's result, so they are printed even when quiet
        let _ = self
            .term
            .write_line(&serde_json::to_string_pretty(outputs)?);
        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("Error:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("Error: {error:?}"));
        }
    }
}
