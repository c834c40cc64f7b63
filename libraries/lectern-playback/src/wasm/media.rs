//! `HtmlAudioElement` media primitive

use crate::error::Result;
use crate::events::MediaNotification;
use crate::primitive::MediaPrimitive;
use crate::types::{Generation, ReadyState, RejectionReason};
use std::rc::Rc;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{DomException, Event, HtmlAudioElement};

/// Receives element notifications tagged with the generation they belong to
pub type NotificationSink = Rc<dyn Fn(Generation, MediaNotification)>;

/// Element events the player subscribes to
const SUBSCRIBED_EVENTS: [&str; 6] = [
    "loadedmetadata",
    "timeupdate",
    "ended",
    "error",
    "waiting",
    "canplay",
];

struct Listener {
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Media primitive backed by an `HtmlAudioElement`
pub struct HtmlMediaPrimitive {
    audio: HtmlAudioElement,
    sink: NotificationSink,
    listeners: Vec<Listener>,
}

impl HtmlMediaPrimitive {
    pub fn new(audio: HtmlAudioElement, sink: NotificationSink) -> Self {
        Self {
            audio,
            sink,
            listeners: Vec::new(),
        }
    }

    /// The wrapped element
    pub fn element(&self) -> &HtmlAudioElement {
        &self.audio
    }

    fn listen(&mut self, event: &'static str, generation: Generation) {
        let audio = self.audio.clone();
        let sink = Rc::clone(&self.sink);

        let closure = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            if let Some(notification) = notification_for(event, &audio) {
                sink(generation, notification);
            }
        });

        if let Err(e) = self
            .audio
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            warn!("Failed to subscribe to '{}': {:?}", event, e);
            return;
        }

        self.listeners.push(Listener { event, closure });
    }
}

/// Translate a DOM event into a notification, reading element state
fn notification_for(event: &str, audio: &HtmlAudioElement) -> Option<MediaNotification> {
    let notification = match event {
        "loadedmetadata" => MediaNotification::MetadataResolved {
            duration: audio.duration(),
        },
        "timeupdate" => MediaNotification::PositionUpdate {
            current_time: audio.current_time(),
        },
        "ended" => MediaNotification::PlaybackEnded,
        "error" => MediaNotification::Error {
            detail: audio
                .error()
                .map(|e| format!("media error code {}", e.code())),
        },
        "waiting" => MediaNotification::BufferingStart,
        "canplay" => MediaNotification::CanResume,
        _ => return None,
    };
    Some(notification)
}

/// Classify the rejection value of a `play()` promise
fn rejection_reason(error: &JsValue) -> RejectionReason {
    error
        .dyn_ref::<DomException>()
        .map_or(RejectionReason::Unknown, |e| {
            RejectionReason::from_dom_error_name(&e.name())
        })
}

impl MediaPrimitive for HtmlMediaPrimitive {
    fn load(&mut self, url: &str) -> Result<()> {
        debug!("Setting audio source: {}", url);
        self.audio.set_src(url);
        self.audio.load();
        Ok(())
    }

    fn unload(&mut self) {
        if let Err(e) = self.audio.remove_attribute("src") {
            warn!("Failed to clear audio source: {:?}", e);
        }
        self.audio.load();
    }

    fn play(&mut self, generation: Generation) {
        let sink = Rc::clone(&self.sink);

        // Outcomes are always delivered from a later task, never re-entrantly
        match self.audio.play() {
            Ok(promise) => spawn_local(async move {
                match JsFuture::from(promise).await {
                    Ok(_) => sink(generation, MediaNotification::PlayStarted),
                    Err(e) => sink(
                        generation,
                        MediaNotification::PlayRejected {
                            reason: rejection_reason(&e),
                        },
                    ),
                }
            }),
            Err(e) => {
                let reason = rejection_reason(&e);
                spawn_local(async move {
                    sink(generation, MediaNotification::PlayRejected { reason });
                });
            }
        }
    }

    fn pause(&mut self) {
        if let Err(e) = self.audio.pause() {
            warn!("Failed to pause audio: {:?}", e);
        }
    }

    fn current_time(&self) -> f64 {
        self.audio.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.audio.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.audio.duration()
    }

    fn playback_rate(&self) -> f64 {
        self.audio.playback_rate()
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.audio.set_playback_rate(rate);
    }

    fn ready_state(&self) -> ReadyState {
        ReadyState::from_raw(self.audio.ready_state())
    }

    fn attach(&mut self, generation: Generation) {
        self.detach();
        for event in SUBSCRIBED_EVENTS {
            self.listen(event, generation);
        }
    }

    fn detach(&mut self) {
        for listener in self.listeners.drain(..) {
            if let Err(e) = self.audio.remove_event_listener_with_callback(
                listener.event,
                listener.closure.as_ref().unchecked_ref(),
            ) {
                warn!("Failed to unsubscribe from '{}': {:?}", listener.event, e);
            }
        }
    }
}

impl Drop for HtmlMediaPrimitive {
    fn drop(&mut self) {
        self.detach();
    }
}
