use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::fmt::MakeWriter;

/// File writer that implements MakeWriter trait for tracing-subscriber
pub struct FileWriter {
    path: PathBuf,
}

impl FileWriter {
    pub fn new(path: PathBuf) -> Self {
        if let Some(parent) = path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                eprintln!(
                    "Failed to create log directory {}: {}",
                    parent.display(),
                    err
                );
            }
        }
        Self { path }
    }
}

impl<'a> MakeWriter<'a> for FileWriter {
    type Writer = Box<dyn Write + Send + Sync + 'a>;

    fn make_writer(&'a self) -> Self::Writer {
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
        {
            Ok(file) => Box::new(std::io::BufWriter::new(file)),
            // Logging from here would recurse into this writer
            Err(_) => Box::new(std::io::BufWriter::new(std::io::stderr())),
        }
    }
}
