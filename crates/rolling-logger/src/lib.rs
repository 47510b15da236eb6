//! Rolling file logger for Tauri applications
//!
//! Log output goes to `<dir>/<app>.log` and to stderr. When the active file
//! passes its size cap it is shifted into a fixed ring of archives:
//! `<app>.log -> <app>.1.log -> ... -> <app>.N.log`, the oldest dropped.
//! `log` records are bridged into the same subscriber.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Size cap of the active log file
pub const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;
/// Number of archived files kept
pub const DEFAULT_ARCHIVES: usize = 5;

static LOGGER: OnceLock<RollingWriter> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("log file error: {0}")]
    Io(#[from] io::Error),
    #[error("a global logger is already installed")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
}

struct RollingFile {
    dir: PathBuf,
    stem: String,
    file: File,
    written: u64,
    max_bytes: u64,
    archives: usize,
}

impl RollingFile {
    fn path(&self, index: usize) -> PathBuf {
        if index == 0 {
            self.dir.join(format!("{}.log", self.stem))
        } else {
            self.dir.join(format!("{}.{}.log", self.stem, index))
        }
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        if self.archives == 0 {
            self.file = File::create(self.path(0))?;
            self.written = 0;
            return Ok(());
        }

        let oldest = self.path(self.archives);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (0..self.archives).rev() {
            let from = self.path(index);
            if from.exists() {
                fs::rename(&from, self.path(index + 1))?;
            }
        }

        self.file = File::create(self.path(0))?;
        self.written = 0;
        Ok(())
    }
}

/// Size-capped file writer, cheap to clone
#[derive(Clone)]
pub struct RollingWriter {
    inner: Arc<Mutex<RollingFile>>,
}

impl RollingWriter {
    /// Open `<dir>/<stem>.log` for appending, creating the directory
    pub fn open(dir: &Path, stem: &str, max_bytes: u64, archives: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.log", stem));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            inner: Arc::new(Mutex::new(RollingFile {
                dir: dir.to_path_buf(),
                stem: stem.to_string(),
                file,
                written,
                max_bytes,
                archives,
            })),
        })
    }

    /// Path of the active file
    pub fn current_path(&self) -> PathBuf {
        match self.inner.lock() {
            Ok(inner) => inner.path(0),
            Err(poisoned) => poisoned.into_inner().path(0),
        }
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;

        if inner.written > 0 && inner.written + buf.len() as u64 > inner.max_bytes {
            inner.rotate()?;
        }
        let n = inner.file.write(buf)?;
        inner.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        inner.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Install the global subscriber writing to `<dir>/<app_name>.log` and stderr
pub fn init_logger(dir: PathBuf, app_name: &str) -> Result<(), LoggerError> {
    let writer = RollingWriter::open(&dir, app_name, DEFAULT_MAX_BYTES, DEFAULT_ARCHIVES)?;

    let level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    tracing_subscriber::registry()
        .with(level)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer.clone())
                .with_ansi(false)
                .with_timer(LocalTime),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_timer(LocalTime),
        )
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    let _ = LOGGER.set(writer);
    tracing::info!("logging to {}", dir.display());
    Ok(())
}

fn ensure_initialized() -> Result<(), LoggerError> {
    LOGGER.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::info!("{}", message);
    Ok(())
}

pub fn warn(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::warn!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::error!("{}", message);
    Ok(())
}
