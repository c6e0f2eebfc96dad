use log::LevelFilter;
use env_logger::{Builder, Env, Target};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use chrono::Local;

/// Copies every log line to stderr and to the log file.
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

/// `RUST_LOG` wins over `level` when set.
pub fn init(level: LevelFilter, log_file: Option<&Path>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(level.as_str()));
    builder.format(|buf, record| {
        writeln!(buf,
            "{} [{}] - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.args()
        )
    });

    let mut file_error = None;
    if let Some(path) = log_file {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(TeeWriter { file })));
            }
            Err(e) => file_error = Some((path.display().to_string(), e)),
        }
    }

    builder.init();

    if let Some((path, e)) = file_error {
        log::warn!("Could not open log file {}: {}. Logging to console only.", path, e);
    }
    log::debug!("Logger initialized.");
}
