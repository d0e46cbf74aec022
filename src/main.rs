//! Demo console session
//!
//! Wires the core end to end with simulated collaborators: builds a small
//! deck, connects the sync channel, drives navigation and overlay timers,
//! and records a synthetic capture stream through both persistence paths.

use anyhow::Result;
use async_trait::async_trait;
use live_console::overlay::{
    DonationDisplayMode, DonationItem, DonationPresenter, LowerThirdItem, LowerThirdRotator,
    OverlayStore, PrayerRequest,
};
use live_console::recorder::{
    CaptureStream, FileSink, HybridRecorder, LocalSink, MediaChunk, RecordingResult, RemoteStore,
    SinkFactory,
};
use live_console::session::{
    schema::{ScripturePage, SlideContent, SlideType},
    Session, Slide, SlideNavigator,
};
use live_console::sync::{SimulatedBus, SlideSyncChannel};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Synthetic one-second capture slices
struct SyntheticStream {
    produced: u64,
}

#[async_trait]
impl CaptureStream for SyntheticStream {
    async fn next_chunk(&mut self) -> Option<MediaChunk> {
        tokio::time::sleep(Duration::from_secs(1)).await;
        let fill = (self.produced % 251) as u8;
        self.produced += 1;
        Some(MediaChunk::new(vec![fill; 32 * 1024]))
    }
}

/// Remote store that just logs the upload
struct LoggingRemote;

#[async_trait]
impl RemoteStore for LoggingRemote {
    async fn upload_chunk(&self, data: Vec<u8>, sequence: u64) -> RecordingResult<()> {
        tokio::time::sleep(Duration::from_millis(200)).await;
        tracing::info!(sequence, bytes = data.len(), "Chunk uploaded");
        Ok(())
    }
}

struct FileSinkFactory {
    path: PathBuf,
}

#[async_trait]
impl SinkFactory for FileSinkFactory {
    async fn acquire(&self) -> std::io::Result<Box<dyn LocalSink>> {
        Ok(Box::new(FileSink::create(&self.path).await?) as Box<dyn LocalSink>)
    }
}

fn build_session() -> Session {
    let mut session = Session::new("Sunday Morning Service");
    session.push_slide(Slide::new(
        SlideType::Scripture,
        SlideContent::Scripture {
            pages: vec![
                ScripturePage {
                    id: Uuid::new_v4(),
                    book: "John".to_string(),
                    chapter: "3".to_string(),
                    verses: "16".to_string(),
                    text_primary: "For God so loved the world...".to_string(),
                    text_secondary: String::new(),
                },
                ScripturePage {
                    id: Uuid::new_v4(),
                    book: "John".to_string(),
                    chapter: "3".to_string(),
                    verses: "17".to_string(),
                    text_primary: "For God did not send his Son...".to_string(),
                    text_secondary: String::new(),
                },
            ],
        },
    ));
    session.push_slide(Slide::new(
        SlideType::Lyrics,
        SlideContent::Lyrics {
            title: "Amazing Grace".to_string(),
            lines: vec!["Amazing grace, how sweet the sound".to_string()],
            chords: Some("G C G D".to_string()),
            audio_url: None,
        },
    ));
    session
}

#[tokio::main]
async fn main() -> Result<()> {
    live_console::init_tracing();
    tracing::info!("Starting live console demo v{}", env!("CARGO_PKG_VERSION"));

    let session = Arc::new(build_session());

    // Overlay state with its two timer-driven components.
    let store = Arc::new(OverlayStore::new());
    let _rotator = LowerThirdRotator::spawn(store.clone());
    let presenter = DonationPresenter::new(store.clone());

    store.add_lower_third(LowerThirdItem::new("Pastor John", "Senior Pastor"));
    store.add_lower_third(LowerThirdItem::new("Sarah", "Worship Leader"));
    store.toggle_lower_third(true);
    store.set_rotation(true, 2);
    store.add_prayer_request(PrayerRequest::new("Sarah", "Safe travels this week"));
    store.toggle_prayer_ticker(true);

    let donation = DonationItem::new("Offering", "https://give.example/offering", 5);
    let donation_id = donation.id;
    store.add_donation(donation);

    // Sync channel: a local listener plays the part of a companion device,
    // resolving broadcast slide ids against its own copy of the deck.
    let channel = SlideSyncChannel::new(Arc::new(SimulatedBus::new()));
    let remote_navigator = Arc::new(Mutex::new(SlideNavigator::new()));
    {
        let session = session.clone();
        let navigator = remote_navigator.clone();
        channel.on_slide_change(move |event| {
            if let Some(index) = session.index_of(event.slide_id) {
                navigator.lock().jump_to(&session.slides, index);
                tracing::info!(index, "Companion device moved to slide");
            }
        });
    }
    let synced_count = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    {
        let synced_count = synced_count.clone();
        channel.on_connect(move || {
            let total = synced_count.fetch_add(1, std::sync::atomic::Ordering::SeqCst) + 1;
            tracing::info!(devices = total, "Device synced");
        });
    }
    channel.connect();
    tokio::time::sleep(Duration::from_millis(600)).await;

    // Hybrid recording of the synthetic feed.
    let mut recorder = HybridRecorder::new(
        Arc::new(LoggingRemote),
        Some(Arc::new(FileSinkFactory {
            path: std::env::temp_dir().join("service-recording.webm"),
        })),
    );
    recorder.start(Some(Box::new(SyntheticStream { produced: 0 }))).await?;

    // Operator walks the deck; every slide change is broadcast.
    let mut navigator = SlideNavigator::new();
    while !navigator.at_end(&session.slides) {
        tokio::time::sleep(Duration::from_secs(2)).await;
        let from = navigator.position();
        navigator.next(&session.slides);
        let position = navigator.position();
        if position.slide_index != from.slide_index {
            channel.emit_slide_change(session.slides[position.slide_index].id);
        }
        tracing::info!(?position, "Operator advanced");
    }

    presenter.trigger(donation_id, DonationDisplayMode::Overlay);
    tokio::time::sleep(Duration::from_secs(6)).await;
    tracing::info!(
        donation_visible = store.snapshot().active_donation_id.is_some(),
        "Donation display window elapsed"
    );

    recorder.stop().await;
    let status = recorder.status();
    tracing::info!(
        elapsed = status.elapsed_seconds,
        chunks = status.chunk_count,
        devices = synced_count.load(std::sync::atomic::Ordering::SeqCst),
        "Demo session complete"
    );
    Ok(())
}
