use crate::shared::constants::RULE_WIDTH;

/// One line of the operator-facing report.
#[derive(Clone, Debug, PartialEq)]
pub enum Line {
    Title(String),
    Rule,
    Blank,
    Section { icon: &'static str, title: String },
    Pass(String),
    Fail(String),
    Warn(String),
    Detail(String),
    Celebrate(String),
}

impl Line {
    pub fn section(icon: &'static str, title: impl Into<String>) -> Self {
        Line::Section {
            icon,
            title: title.into(),
        }
    }

    pub fn render(&self) -> String {
        match self {
            Line::Title(text) => format!("🚀 {text}"),
            Line::Rule => "=".repeat(RULE_WIDTH),
            Line::Blank => String::new(),
            Line::Section { icon, title } => format!("{icon} {title}..."),
            Line::Pass(text) => format!("✅ {text}"),
            Line::Fail(text) => format!("❌ {text}"),
            Line::Warn(text) => format!("⚠️  {text}"),
            Line::Detail(text) => format!("   - {text}"),
            Line::Celebrate(text) => format!("🎉 {text}"),
        }
    }
}

/// Sink for report lines.
///
/// Decouples the checks from where their output goes, so the CLI prints to
/// stdout while tests capture lines for assertions.
pub trait DiagnosticReporter {
    fn emit(&mut self, line: Line);
}

/// Prints rendered lines to stdout.
pub struct ConsoleReporter;

impl DiagnosticReporter for ConsoleReporter {
    fn emit(&mut self, line: Line) {
        println!("{}", line.render());
    }
}

/// Keeps every line in memory.
#[derive(Default)]
pub struct RecordingReporter {
    lines: Vec<Line>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn rendered(&self) -> Vec<String> {
        self.lines.iter().map(Line::render).collect()
    }

    /// True when any rendered line contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.render().contains(needle))
    }
}

impl DiagnosticReporter for RecordingReporter {
    fn emit(&mut self, line: Line) {
        self.lines.push(line);
    }
}
