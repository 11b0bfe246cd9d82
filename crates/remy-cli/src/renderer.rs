//! Markdown rendering for the terminal, with a plain-text fallback.

use std::io::{self, Write};

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Prints markdown either styled through termimad or verbatim.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::DarkGreen);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Grey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to stdout.
    ///
    /// Headers keep their `#` markers so recipe titles stand out even in
    /// terminals without bold support.
    pub fn render(&self, markdown: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        if self.rich_enabled {
            for line in markdown.lines() {
                if line.starts_with('#') {
                    writeln!(stdout, "\x1b[32m{line}\x1b[0m")?;
                } else {
                    writeln!(stdout, "{}", self.skin.inline(line))?;
                }
            }
        } else {
            write!(stdout, "{markdown}")?;
        }
        stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
        renderer.render("# Title\n").unwrap();
    }

    #[test]
    fn test_default_is_rich() {
        assert!(TerminalRenderer::default().rich_enabled);
    }
}
