use crate::session::{Confirmer, Notifier, Selector};
use std::io::{self, BufRead, Write};
use tracing::warn;

pub const SUCCESS_MESSAGE: &str =
    "Pontos computados! Volte para a mesa e destrua seus inimigos!";

/// Line-based terminal implementation of the operator collaborators.
///
/// Options are numbered from 1. An empty line, `q` or end of input cancels.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// `None` on end of input or a read failure.
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(e) => {
                warn!("⚠️  Could not read from terminal: {}", e);
                None
            }
        }
    }

    fn render_options(&mut self, title: &str, options: &[String]) -> io::Result<()> {
        writeln!(self.output, "\n🎲 {}", title)?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {:>2}) {}", i + 1, option)?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Selector for TerminalPrompt<R, W> {
    fn ask(&mut self, title: &str, prompt_label: &str, options: &[String]) -> Option<String> {
        if options.is_empty() {
            return None;
        }
        if let Err(e) = self.render_options(title, options) {
            warn!("⚠️  Could not write to terminal: {}", e);
            return None;
        }

        loop {
            let _ = write!(
                self.output,
                "{} [1-{}, enter para cancelar]: ",
                prompt_label,
                options.len()
            );
            let _ = self.output.flush();

            let line = self.read_line()?;
            if line.is_empty() || line.eq_ignore_ascii_case("q") {
                return None;
            }

            match line.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Some(options[n - 1].clone()),
                _ => {
                    let _ = writeln!(self.output, "⚠️  Opção inválida: {}", line);
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> Confirmer for TerminalPrompt<R, W> {
    fn confirm(&mut self, summary: &str) -> bool {
        let _ = write!(
            self.output,
            "\nConfirmar pontuação?\n\n  {}\n\n[s/N]: ",
            summary
        );
        let _ = self.output.flush();

        matches!(
            self.read_line().map(|l| l.to_lowercase()).as_deref(),
            Some("s" | "sim" | "y" | "yes")
        )
    }
}

impl<R: BufRead, W: Write> Notifier for TerminalPrompt<R, W> {
    fn notify_success(&mut self) {
        let _ = writeln!(self.output, "\n✅ {}", SUCCESS_MESSAGE);
    }

    fn notify_error(&mut self, message: &str) {
        let _ = writeln!(self.output, "\n❌ Erro: {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(input: &str) -> TerminalPrompt<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn options() -> Vec<String> {
        vec!["Baumcy".into(), "Jujubex".into(), "Floydorc".into()]
    }

    #[test]
    fn picks_numbered_option() {
        let mut p = prompt("2\n");
        assert_eq!(p.ask("Jogador", "Confirmar", &options()).as_deref(), Some("Jujubex"));
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains(" 1) Baumcy"));
        assert!(out.contains(" 3) Floydorc"));
    }

    #[test]
    fn reasks_after_invalid_input() {
        let mut p = prompt("9\nabc\n3\n");
        assert_eq!(p.ask("Jogador", "Confirmar", &options()).as_deref(), Some("Floydorc"));
        let out = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(out.matches("Opção inválida").count(), 2);
    }

    #[test]
    fn empty_line_q_and_eof_cancel() {
        assert!(prompt("\n").ask("t", "l", &options()).is_none());
        assert!(prompt("q\n").ask("t", "l", &options()).is_none());
        assert!(prompt("").ask("t", "l", &options()).is_none());
    }

    #[test]
    fn confirmation_accepts_portuguese_and_english_yes() {
        assert!(prompt("s\n").confirm("x"));
        assert!(prompt("SIM\n").confirm("x"));
        assert!(prompt("yes\n").confirm("x"));
        assert!(!prompt("n\n").confirm("x"));
        assert!(!prompt("\n").confirm("x"));
        assert!(!prompt("").confirm("x"));
    }
}
