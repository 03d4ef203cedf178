use crate::capture::{CaptionFont, Downloader, Exporter};
use crate::config::Config;
use crate::meme::{ImageLoader, ImgflipClient, UniformPicker};
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use crate::ui::worker::CommandWorker;
use reqwest::Url;
use std::io;
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;

fn to_io(err: impl std::fmt::Display) -> io::Error {
    io::Error::other(err.to_string())
}

pub fn run(config: Config) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let _enter = runtime.enter();

    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.source.timeout() {
        builder = builder.timeout(timeout);
    }
    let http = builder.build().map_err(to_io)?;

    let source = ImgflipClient::with_client(http.clone(), config.source.endpoint.clone());
    let font = CaptionFont::load(config.export.font_path.as_deref()).map_err(to_io)?;
    let exporter = Exporter::new(
        font,
        Downloader::new(config.export.resolved_output_dir()),
        Url::parse(&config.source.endpoint).ok(),
    );

    let redraw_every = config.ui.tick_rate();
    let events = EventHandler::new();
    let worker = CommandWorker::new(
        Arc::new(source),
        Arc::new(UniformPicker),
        ImageLoader::new(http),
        Arc::new(exporter),
        events.sender(),
    );

    let (mut terminal, guard) = setup_terminal()?;
    let mut app = App::new(config.export.layout());
    app.set_command_sender(worker.spawn(runtime.handle()));
    tracing::info!(endpoint = %config.source.endpoint, "Starting meme generator");
    app.mount();

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(redraw_every) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Paste(text)) => app.on_paste(&text),
            Ok(AppEvent::Resize) => {}
            Ok(AppEvent::Widget(intent)) => app.dispatch(intent),
            Ok(AppEvent::ImageDecoded { generation, pixels }) => {
                app.on_image_decoded(generation, pixels)
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(guard);
    runtime.shutdown_background();
    tracing::info!("Exiting");
    Ok(())
}
