use crate::domain::model::{Diagnostic, RunReport};

/// 把執行結果輸出到主控台，並把每個診斷寫入日誌
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn started(&self) {
        println!("🫐 Starting Cobblemon Berry Extractor...");
    }

    pub fn using_archive(&self, jar_filename: &str) {
        tracing::info!("Using JAR archive: {}", jar_filename);
        println!("📦 Using JAR archive: {}", jar_filename);
    }

    pub fn diagnostic(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::EmptyTable { .. } => tracing::warn!("{}", diagnostic),
            _ => tracing::error!("{}", diagnostic),
        }
        eprintln!("{}", render_diagnostic(diagnostic));
    }

    pub fn diagnostics(&self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            self.diagnostic(diagnostic);
        }
    }

    pub fn finished(&self, report: &RunReport, output_paths: &[String]) {
        self.diagnostics(&report.diagnostics);

        for path in output_paths {
            println!("✅ CSV saved: {}", path);
        }

        if report.exit_code() == 0 {
            println!("✅ Extraction complete!");
        } else {
            println!("⚠️ Extraction finished with errors");
        }
    }
}

pub fn render_diagnostic(diagnostic: &Diagnostic) -> String {
    let icon = match diagnostic {
        Diagnostic::EmptyTable { .. } => "⚠️",
        _ => "❌",
    };
    format!("{} {}", icon, diagnostic)
}
