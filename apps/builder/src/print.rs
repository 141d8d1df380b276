//! Print gate.
//!
//! Printing too early captures a half-laid-out page, so a job waits for the
//! surface's fonts, two frame ticks and a short settle delay before calling
//! `print`. A job that is cancelled or dropped before then never prints.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{info, warn};

pub const DEFAULT_PRINT_SETTLE: Duration = Duration::from_millis(150);

/// File name the local shell prints into, under the data directory.
pub const PRINT_FILE_NAME: &str = "cv-print.md";

/// Something that lays out a document and can print it.
#[async_trait]
pub trait PrintSurface: Send + Sync {
    /// Resolves once every font the layout needs is loaded.
    async fn fonts_ready(&self);

    /// Resolves on the next layout frame.
    async fn next_frame(&self);

    fn print(&self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintOutcome {
    Printed,
    Failed,
    Cancelled,
}

pub struct PrintJob {
    handle: JoinHandle<PrintOutcome>,
}

impl PrintJob {
    /// Starts the wait. Must be called inside a tokio runtime.
    pub fn start(surface: Arc<dyn PrintSurface>, settle: Duration) -> Self {
        let handle = tokio::spawn(async move {
            surface.fonts_ready().await;
            surface.next_frame().await;
            surface.next_frame().await;
            sleep(settle).await;
            match surface.print() {
                Ok(()) => PrintOutcome::Printed,
                Err(e) => {
                    warn!("Print failed: {e:#}");
                    PrintOutcome::Failed
                }
            }
        });
        Self { handle }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_pending(&self) -> bool {
        !self.handle.is_finished()
    }

    pub async fn wait(mut self) -> PrintOutcome {
        match (&mut self.handle).await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => PrintOutcome::Cancelled,
            Err(e) => {
                warn!("Print task stopped unexpectedly: {e}");
                PrintOutcome::Failed
            }
        }
    }
}

impl Drop for PrintJob {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Writes the rendered markdown to a file. Fonts are always ready and a frame
/// is one 60 Hz tick.
pub struct FileSurface {
    path: PathBuf,
    content: String,
}

impl FileSurface {
    pub fn new(path: PathBuf, content: String) -> Self {
        Self { path, content }
    }
}

#[async_trait]
impl PrintSurface for FileSurface {
    async fn fonts_ready(&self) {}

    async fn next_frame(&self) {
        sleep(Duration::from_millis(16)).await;
    }

    fn print(&self) -> Result<()> {
        std::fs::write(&self.path, &self.content)
            .with_context(|| format!("Failed to write print output to {}", self.path.display()))?;
        info!("Printed CV to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::time::Instant;

    #[derive(Default)]
    struct RecordingSurface {
        events: Mutex<Vec<&'static str>>,
        printed_at: Mutex<Option<Instant>>,
    }

    #[async_trait]
    impl PrintSurface for RecordingSurface {
        async fn fonts_ready(&self) {
            sleep(Duration::from_millis(40)).await;
            self.events.lock().unwrap().push("fonts");
        }

        async fn next_frame(&self) {
            sleep(Duration::from_millis(16)).await;
            self.events.lock().unwrap().push("frame");
        }

        fn print(&self) -> Result<()> {
            self.events.lock().unwrap().push("print");
            *self.printed_at.lock().unwrap() = Some(Instant::now());
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_print_waits_for_fonts_frames_and_settle() {
        let surface = Arc::new(RecordingSurface::default());
        let started = Instant::now();
        let job = PrintJob::start(surface.clone(), DEFAULT_PRINT_SETTLE);
        assert_eq!(job.wait().await, PrintOutcome::Printed);

        assert_eq!(*surface.events.lock().unwrap(), vec!["fonts", "frame", "frame", "print"]);
        let printed_at = surface.printed_at.lock().unwrap().unwrap();
        assert!(printed_at - started >= Duration::from_millis(40 + 16 + 16 + 150));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_print_never_prints() {
        let surface = Arc::new(RecordingSurface::default());
        let job = PrintJob::start(surface.clone(), DEFAULT_PRINT_SETTLE);
        sleep(Duration::from_millis(100)).await;
        job.cancel();
        assert_eq!(job.wait().await, PrintOutcome::Cancelled);
        assert!(!surface.events.lock().unwrap().contains(&"print"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_job_cancels_print() {
        let surface = Arc::new(RecordingSurface::default());
        drop(PrintJob::start(surface.clone(), DEFAULT_PRINT_SETTLE));
        sleep(Duration::from_secs(1)).await;
        assert!(!surface.events.lock().unwrap().contains(&"print"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_file_surface_writes_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PRINT_FILE_NAME);
        let surface = Arc::new(FileSurface::new(path.clone(), "# Ada\n".to_string()));
        let job = PrintJob::start(surface, Duration::from_millis(1));
        assert_eq!(job.wait().await, PrintOutcome::Printed);
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Ada\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_print_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(PRINT_FILE_NAME);
        let job = PrintJob::start(Arc::new(FileSurface::new(path, String::new())), Duration::ZERO);
        assert_eq!(job.wait().await, PrintOutcome::Failed);
    }
}
