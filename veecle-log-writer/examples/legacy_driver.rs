//! Feeds the text output of a driver-style API into `tracing`.
//!
//! Run with `cargo run --example legacy_driver`.

use std::io::{self, Write};

use tracing_subscriber::filter::LevelFilter;
use veecle_log_writer::backend::TracingBackend;
use veecle_log_writer::{LogWriter, Marker, Severity};

/// A driver that only knows how to report to a text stream.
struct Driver<W> {
    log: W,
}

impl<W> Driver<W>
where
    W: Write,
{
    fn connect(&mut self, url: &str) -> io::Result<()> {
        writeln!(self.log, "connecting to {url}")?;
        write!(self.log, "handshake: ")?;
        write!(self.log, "ok\r\n")?;
        self.log.flush()
    }

    fn execute(&mut self, statement: &str, rows: usize) -> io::Result<()> {
        writeln!(self.log, "{statement}\n  -> {rows} rows")
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    let writer = LogWriter::builder(TracingBackend::DEFAULT, Severity::Debug)
        .marker(Marker::with_parents("SQL", [Marker::new("DRIVER")]))
        .component("legacy_driver")
        .build_tee(io::stderr());

    let mut driver = Driver { log: writer };
    driver.connect("db://localhost/inventory")?;
    driver.execute("select * from parts", 3)?;

    // Logged when the writer is dropped.
    driver.log.print("disconnecting");
    if driver.log.check_error() {
        tracing::error!("writing to stderr failed");
    }

    Ok(())
}
