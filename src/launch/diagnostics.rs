use std::fmt::Display;
use std::io::Write;

pub const MIGRATING: &str = "Running database migrations";
pub const MIGRATED: &str = "Migrations complete";

pub fn presence_line(var: &str, set: bool) -> String {
    format!("{} set: {}", var, if set { "YES" } else { "NO" })
}

pub fn prefix_line(var: &str, prefix: &str) -> String {
    format!("{} starts with: {}...", var, prefix)
}

pub fn serving_line(host: &str, port: &str) -> String {
    format!("Starting server on {}:{}", host, port)
}

/// Plain status lines on the launcher's standard output.
///
/// Write errors are ignored; a closed stdout must not stop the launch.
pub struct Diagnostics<W: Write> {
    out: W,
}

impl<W: Write> Diagnostics<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn line(&mut self, message: impl Display) {
        let _ = writeln!(self.out, "=== {} ===", message);
        let _ = self.out.flush();
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
