// Wed Oct 21 2026 - Alex

use colored::*;

pub struct Banner {
    title: String,
    subtitle: Option<String>,
    version: Option<String>,
    width: usize,
}

impl Banner {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: None,
            version: None,
            width: 50,
        }
    }

    pub fn with_subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        let title = match &self.version {
            Some(v) => format!("{} v{}", self.title, v),
            None => self.title.clone(),
        };

        lines.push(title.cyan().bold().to_string());
        if let Some(subtitle) = &self.subtitle {
            lines.push(subtitle.dimmed().to_string());
        }
        lines.push("=".repeat(self.width).cyan().to_string());

        lines.join("\n")
    }

    pub fn print() {
        let banner = Banner::new("EVM Pattern Scan")
            .with_version(env!("CARGO_PKG_VERSION"))
            .with_subtitle("Bytecode disassembly and instruction pattern filter");
        println!("{}", banner.render());
        println!();
    }
}
