//! Line-oriented session over a single store.

use crate::commands::{self, CommandLine, Reply};
use crate::error::CliError;
use clap::ValueEnum;
use registrar_core::EntityStore;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// How replies are written.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// One JSON document per line
    Json,
}

/// Totals for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Commands that succeeded.
    pub succeeded: usize,
    /// Commands that failed.
    pub failed: usize,
}

/// A store plus the settings for talking to it.
pub struct Session {
    store: EntityStore,
    format: OutputFormat,
    strict: bool,
}

impl Session {
    /// Creates a session over `store`.
    pub fn new(store: EntityStore, format: OutputFormat, strict: bool) -> Self {
        Self {
            store,
            format,
            strict,
        }
    }

    /// Returns the store.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Runs one script line. Blank lines and `#` comments yield `None`.
    pub fn execute(&mut self, line: &str) -> Result<Option<Reply>, CliError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let command = CommandLine::parse_line(line)?;
        debug!(?command, "executing");
        commands::dispatch(&mut self.store, command).map(Some)
    }

    /// Runs every line of `input`, writing replies and command errors to
    /// `out`.
    ///
    /// A failed command is reported and the session continues, unless the
    /// session is strict, in which case the error is returned.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
    ) -> Result<SessionSummary, CliError> {
        let mut summary = SessionSummary::default();

        for (index, line) in input.lines().enumerate() {
            let line = line?;
            match self.execute(&line) {
                Ok(Some(reply)) => {
                    summary.succeeded += 1;
                    self.write_reply(out, &reply)?;
                }
                Ok(None) => {}
                Err(err) if err.is_recoverable() => {
                    summary.failed += 1;
                    self.write_error(out, &err)?;
                    if self.strict {
                        info!(line = index + 1, "stopping at first failure");
                        return Err(err);
                    }
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            version = self.store.version().as_u64(),
            "session finished"
        );
        Ok(summary)
    }

    fn write_reply<W: Write>(&self, out: &mut W, reply: &Reply) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Text => writeln!(out, "{}", reply.text)?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&reply.data)?)?,
        }
        Ok(())
    }

    fn write_error<W: Write>(&self, out: &mut W, err: &CliError) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Text => writeln!(out, "error: {err}")?,
            OutputFormat::Json => {
                let code = match err {
                    CliError::Catalog(inner) => inner.code(),
                    CliError::NotFound(_) => "not_found",
                    _ => "parse",
                };
                let body = serde_json::json!({ "error": err.to_string(), "code": code });
                writeln!(out, "{body}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str, format: OutputFormat, strict: bool) -> (Result<SessionSummary, CliError>, String) {
        let mut session = Session::new(EntityStore::new(), format, strict);
        let mut out = Vec::new();
        let result = session.run(Cursor::new(script), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn failures_do_not_stop_a_lenient_session() {
        let script = "# scenario\nadd-offering 1 1\n\nadd-offering 4 1\n";
        let (result, out) = run(script, OutputFormat::Text, false);

        assert_eq!(
            result.unwrap(),
            SessionSummary {
                succeeded: 1,
                failed: 1
            }
        );
        assert_eq!(
            out,
            "error: This course offering already exists\nAdded offering 4: Individual - Mathematics\n"
        );
    }

    #[test]
    fn strict_session_stops_at_first_failure() {
        let script = "delete-course 1\nadd-course Biology\n";
        let (result, out) = run(script, OutputFormat::Text, true);

        assert!(matches!(result, Err(CliError::Catalog(_))));
        assert!(!out.contains("Biology"));
    }

    #[test]
    fn json_errors_carry_code() {
        let (_, out) = run("register 1 alice\nregister 1 ALICE\n", OutputFormat::Json, false);
        let last: serde_json::Value = serde_json::from_str(out.lines().last().unwrap()).unwrap();
        assert_eq!(last["code"], "duplicate_registration");
        assert_eq!(last["error"], "Student already registered for this offering");
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let mut session = Session::new(EntityStore::new(), OutputFormat::Text, false);
        assert!(session.execute("   ").unwrap().is_none());
        assert!(session.execute("# note").unwrap().is_none());
        assert_eq!(session.store().version().as_u64(), 0);
    }
}
