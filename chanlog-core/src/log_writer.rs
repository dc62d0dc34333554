use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

/// Line sink used by the built-in channels. Every line is flushed before
/// `regular` returns.
pub trait LogWriter {
    fn regular(&mut self, line: &str) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}

pub struct LogFile {
    file: BufWriter<File>,
}

impl LogFile {
    /// Opens `path` for appending, creating it if needed.
    pub fn new<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::options().create(true).append(true).open(path)?;
        Ok(Self {
            file: BufWriter::new(file),
        })
    }
}

impl LogWriter for LogFile {
    fn regular(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.file, "{line}")?;
        self.file.flush()
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    #[default]
    Stdout,
    Stderr,
}

#[derive(Debug, Default)]
pub struct LogStream {
    stream: Stream,
}

impl LogStream {
    pub fn new(stream: Stream) -> Self {
        Self { stream }
    }

    pub fn stream(&self) -> Stream {
        self.stream
    }
}

impl LogWriter for LogStream {
    fn regular(&mut self, line: &str) -> io::Result<()> {
        match self.stream {
            Stream::Stdout => {
                let mut out = io::stdout().lock();
                writeln!(out, "{line}")?;
                out.flush()
            }
            Stream::Stderr => {
                let mut out = io::stderr().lock();
                writeln!(out, "{line}")?;
                out.flush()
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.stream {
            Stream::Stdout => io::stdout().flush(),
            Stream::Stderr => io::stderr().flush(),
        }
    }
}

#[test]
fn test_log_file() {
    std::fs::remove_file("/tmp/test_chanlog_log_file.log").ok();
    let mut log_file = LogFile::new("/tmp/test_chanlog_log_file.log").unwrap();
    log_file.regular("Hello, world!").unwrap();
    log_file.regular("rust is awesome !").unwrap();
    assert_eq!(
        std::fs::read_to_string("/tmp/test_chanlog_log_file.log").unwrap(),
        "Hello, world!\nrust is awesome !\n"
    );
    drop(log_file);
    let mut log_file = LogFile::new("/tmp/test_chanlog_log_file.log").unwrap();
    log_file.regular("test").unwrap();
    log_file.flush().unwrap();
    assert_eq!(
        std::fs::read_to_string("/tmp/test_chanlog_log_file.log").unwrap(),
        "Hello, world!\nrust is awesome !\ntest\n"
    );
}

#[test]
fn test_log_stream() {
    let mut log_stdout = LogStream::default();
    assert_eq!(log_stdout.stream(), Stream::Stdout);
    log_stdout.regular("Hello, world!").unwrap();
    let mut log_stderr = LogStream::new(Stream::Stderr);
    log_stderr.regular("Hello, stderr!").unwrap();
    log_stderr.flush().unwrap();
}
