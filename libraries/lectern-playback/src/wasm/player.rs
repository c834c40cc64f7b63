//! WASM-compatible AudioPlayer wrapper

use super::media::{HtmlMediaPrimitive, NotificationSink};
use crate::{
    AudioPlayer, Generation, MediaNotification, PlaybackError, PlayerConfig, PlayerEvent,
    ToggleAction,
};
use gloo_timers::future::TimeoutFuture;
use js_sys::Function;
use lectern_core::{BookAudioRef, ResolverConfig, SourceResolver};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlAudioElement;

struct Shared {
    player: AudioPlayer<HtmlMediaPrimitive>,
    on_change: Option<Function>,
}

/// WASM-compatible audio player
///
/// Wraps the core `AudioPlayer` around an `<audio>` element. Every state
/// change is reported to the `onChange` callback as a snapshot object.
#[wasm_bindgen]
pub struct WasmAudioPlayer {
    shared: Rc<RefCell<Shared>>,
}

#[wasm_bindgen]
impl WasmAudioPlayer {
    /// Create a player driving `audio`
    ///
    /// `media_audio_base` overrides the base URL relative audio paths are
    /// joined onto.
    #[wasm_bindgen(constructor)]
    pub fn new(
        audio: HtmlAudioElement,
        media_audio_base: Option<String>,
    ) -> Result<WasmAudioPlayer, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let resolver_config = media_audio_base
            .map(ResolverConfig::with_base)
            .unwrap_or_default();
        resolver_config
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let resolver = SourceResolver::new(&resolver_config);

        let shared = Rc::new_cyclic(|weak: &Weak<RefCell<Shared>>| {
            let weak = weak.clone();
            let sink: NotificationSink =
                Rc::new(move |generation, notification| deliver(&weak, generation, notification));

            RefCell::new(Shared {
                player: AudioPlayer::new(
                    HtmlMediaPrimitive::new(audio, sink),
                    resolver,
                    PlayerConfig::default(),
                ),
                on_change: None,
            })
        });

        Ok(Self { shared })
    }

    // ===== Binding =====

    /// Bind the audio of a book record
    ///
    /// Accepts the raw backend record; the audio field may be stored under
    /// any of the known keys.
    #[wasm_bindgen(js_name = bindBook)]
    pub fn bind_book(&self, record: JsValue) -> Result<bool, JsValue> {
        let record: serde_json::Value = serde_wasm_bindgen::from_value(record)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse book record: {}", e)))?;
        let book =
            BookAudioRef::from_record(&record).map_err(|e| JsValue::from_str(&e.to_string()))?;

        self.run(|player| player.bind_book(&book))
            .map_err(to_js_error)
    }

    // ===== Playback Control =====

    /// Play or pause
    ///
    /// Returns `"play-requested"`, `"already-pending"` or `"paused"`.
    pub fn toggle(&self) -> Result<String, JsValue> {
        let action = self.run(|player| player.toggle()).map_err(to_js_error)?;

        Ok(match action {
            ToggleAction::PlayRequested => "play-requested",
            ToggleAction::AlreadyPending => "already-pending",
            ToggleAction::Paused => "paused",
        }
        .to_string())
    }

    // ===== Seeking =====

    /// Seek to a fraction (0.0 - 1.0) of the duration
    ///
    /// Returns the new position, or `undefined` when the seek was ignored.
    #[wasm_bindgen(js_name = seekToFraction)]
    pub fn seek_to_fraction(&self, fraction: f64) -> Result<Option<f64>, JsValue> {
        seek_result(self.run(|player| player.seek_to_fraction(fraction)))
    }

    /// Seek relative to the current position
    #[wasm_bindgen(js_name = seekBy)]
    pub fn seek_by(&self, delta_seconds: f64) -> Result<Option<f64>, JsValue> {
        seek_result(self.run(|player| player.seek_by(delta_seconds)))
    }

    #[wasm_bindgen(js_name = skipForward)]
    pub fn skip_forward(&self) -> Result<Option<f64>, JsValue> {
        seek_result(self.run(|player| player.skip_forward()))
    }

    #[wasm_bindgen(js_name = skipBackward)]
    pub fn skip_backward(&self) -> Result<Option<f64>, JsValue> {
        seek_result(self.run(|player| player.skip_backward()))
    }

    /// Handle a keydown on the seek bar
    ///
    /// Returns whether the key moved the playhead.
    #[wasm_bindgen(js_name = handleSeekKey)]
    pub fn handle_seek_key(&self, key: &str) -> Result<bool, JsValue> {
        match self.run(|player| player.handle_seek_key(key)) {
            Ok(moved) => Ok(moved),
            Err(PlaybackError::SeekIgnored) => Ok(false),
            Err(e) => Err(to_js_error(e)),
        }
    }

    // ===== Rate =====

    /// Pick a playback rate from the speed menu
    #[wasm_bindgen(js_name = setRate)]
    pub fn set_rate(&self, rate: f64) -> Result<f64, JsValue> {
        self.run(|player| player.select_rate(rate))
            .map(f64::from)
            .map_err(to_js_error)
    }

    /// Open or close the speed menu, returning whether it is now open
    #[wasm_bindgen(js_name = toggleSpeedMenu)]
    pub fn toggle_speed_menu(&self) -> bool {
        let open = self.shared.borrow_mut().player.toggle_speed_menu();
        notify(&self.shared);
        open
    }

    // ===== State Queries =====

    /// Current snapshot as a plain object
    pub fn snapshot(&self) -> JsValue {
        let snapshot = self.shared.borrow().player.snapshot();
        serde_wasm_bindgen::to_value(&snapshot).unwrap_or(JsValue::NULL)
    }

    // ===== Event Listeners =====

    /// Register the change callback, called with a snapshot object
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: Function) {
        self.shared.borrow_mut().on_change = Some(callback);
    }

    /// Release the element subscription
    ///
    /// Further commands throw; late element events are ignored.
    pub fn teardown(&self) {
        self.run(AudioPlayer::teardown);
    }

    // ===== Internal =====

    fn run<T>(&self, command: impl FnOnce(&mut AudioPlayer<HtmlMediaPrimitive>) -> T) -> T {
        let result = command(&mut self.shared.borrow_mut().player);
        flush(&self.shared);
        result
    }
}

fn to_js_error(error: PlaybackError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn seek_result(result: crate::Result<f64>) -> Result<Option<f64>, JsValue> {
    match result {
        Ok(position) => Ok(Some(position)),
        Err(PlaybackError::SeekIgnored) => Ok(None),
        Err(e) => Err(to_js_error(e)),
    }
}

/// Feed an element notification into the player
///
/// Deferred to a later task when the player is busy with a command.
fn deliver(weak: &Weak<RefCell<Shared>>, generation: Generation, notification: MediaNotification) {
    let Some(shared) = weak.upgrade() else {
        return;
    };

    let Ok(mut guard) = shared.try_borrow_mut() else {
        let weak = weak.clone();
        spawn_local(async move { deliver(&weak, generation, notification) });
        return;
    };

    let changed = guard.player.handle_notification(generation, notification);
    drop(guard);

    if changed {
        flush(&shared);
    }
}

/// Schedule notice dismissals for queued events, then notify the host
fn flush(shared: &Rc<RefCell<Shared>>) {
    let events = shared.borrow_mut().player.drain_events();
    if events.is_empty() {
        return;
    }

    for event in &events {
        if let PlayerEvent::NoticeRaised { notice } = event {
            schedule_dismissal(shared, notice.id, notice.display_ms);
        }
    }

    notify(shared);
}

fn schedule_dismissal(shared: &Rc<RefCell<Shared>>, id: u64, display_ms: u64) {
    let weak = Rc::downgrade(shared);
    let millis = u32::try_from(display_ms).unwrap_or(u32::MAX);

    spawn_local(async move {
        TimeoutFuture::new(millis).await;

        let Some(shared) = weak.upgrade() else {
            return;
        };
        let dismissed = shared.borrow_mut().player.dismiss_notice(id);
        if dismissed {
            flush(&shared);
        }
    });
}

/// Call the change callback with a fresh snapshot
///
/// The borrow is released first so the callback may call back into the player.
fn notify(shared: &Rc<RefCell<Shared>>) {
    let (callback, snapshot) = {
        let guard = shared.borrow();
        (guard.on_change.clone(), guard.player.snapshot())
    };

    if let Some(callback) = callback {
        if let Ok(value) = serde_wasm_bindgen::to_value(&snapshot) {
            callback.call1(&JsValue::NULL, &value).ok();
        }
    }
}
