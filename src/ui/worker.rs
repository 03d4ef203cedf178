//! Performs the side effects requested by the app.
//!
//! Every command runs as its own task, so overlapping fetches are neither
//! queued nor cancelled: their results reach the UI in completion order.

use std::sync::mpsc::Sender;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::capture::Exporter;
use crate::meme::{fetch_random_meme, ImageLoader, IndexPicker, MemeSource};
use crate::ui::app::{UiCommand, UiCommandSender};
use crate::ui::events::AppEvent;
use crate::ui::meme::MemeIntent;

const COMMAND_QUEUE_CAPACITY: usize = 64;

pub struct CommandWorker {
    source: Arc<dyn MemeSource>,
    picker: Arc<dyn IndexPicker>,
    images: ImageLoader,
    exporter: Arc<Exporter>,
    events: Sender<AppEvent>,
}

impl CommandWorker {
    pub fn new(
        source: Arc<dyn MemeSource>,
        picker: Arc<dyn IndexPicker>,
        images: ImageLoader,
        exporter: Arc<Exporter>,
        events: Sender<AppEvent>,
    ) -> Self {
        Self {
            source,
            picker,
            images,
            exporter,
            events,
        }
    }

    /// Starts the command loop on `handle` and returns its sender.
    pub fn spawn(self, handle: &Handle) -> UiCommandSender {
        let (tx, mut rx) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
        let worker = Arc::new(self);
        let task_handle = handle.clone();
        handle.spawn(async move {
            while let Some(command) = rx.recv().await {
                let worker = Arc::clone(&worker);
                task_handle.spawn(async move { worker.execute(command).await });
            }
            tracing::debug!("Command channel closed");
        });
        tx
    }

    /// Runs one command to completion and reports its outcome as an event.
    pub async fn execute(&self, command: UiCommand) {
        match command {
            UiCommand::FetchMeme => self.fetch().await,
            UiCommand::LoadImage { generation, url } => self.load_image(generation, url).await,
            UiCommand::Export(job) => {
                let exporter = Arc::clone(&self.exporter);
                let saved = tokio::task::spawn_blocking(move || exporter.export_composition(&job))
                    .await
                    .unwrap_or_else(|err| {
                        tracing::error!(error = %err, "Export task aborted");
                        None
                    });
                if let Some(path) = saved {
                    self.emit(AppEvent::Widget(MemeIntent::ExportSaved { path }));
                }
            }
            UiCommand::CopyToClipboard(job) => {
                let exporter = Arc::clone(&self.exporter);
                if let Err(err) =
                    tokio::task::spawn_blocking(move || exporter.copy_composition(&job)).await
                {
                    tracing::error!(error = %err, "Clipboard task aborted");
                }
            }
        }
    }

    async fn fetch(&self) {
        match fetch_random_meme(self.source.as_ref(), self.picker.as_ref()).await {
            Ok(meme) => {
                tracing::info!(id = %meme.id, name = %meme.name, "Fetched meme");
                self.emit(AppEvent::Widget(MemeIntent::MemeFetched { meme }));
            }
            Err(err) => {
                tracing::warn!(error = %err, "Error fetching meme");
                self.emit(AppEvent::Widget(MemeIntent::FetchFailed));
            }
        }
    }

    async fn load_image(&self, generation: u64, url: String) {
        match self.images.load(&url).await {
            Ok(pixels) => {
                tracing::debug!(generation, %url, "Image loaded");
                self.emit(AppEvent::ImageDecoded {
                    generation,
                    pixels: Arc::new(pixels),
                });
            }
            Err(err) => {
                tracing::warn!(generation, error = %err, "Failed to load image");
                self.emit(AppEvent::Widget(MemeIntent::ImageLoadFailed { generation }));
            }
        }
    }

    fn emit(&self, event: AppEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("UI loop gone; dropping worker event");
        }
    }
}
