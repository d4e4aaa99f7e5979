//! Observable session state.
//!
//! One writer (the session), any number of observers. Every mutation that
//! changes a value is followed by a synchronous `on_change` call to each
//! observer, made after the state lock has been released.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// User-visible state of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadState {
    pub title: Option<String>,
    pub image_path: Option<PathBuf>,
    /// 0..=100; stays put while the download length is unknown.
    pub progress_percent: u8,
    pub is_downloading: bool,
    /// Last message shown to the user (completion notice or failure).
    pub last_message: Option<UserMessage>,
}

/// Message surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserMessage {
    Info(String),
    Error(String),
    /// The catalog loaded but no record passed selection.
    NoEligibleCandidate,
}

impl UserMessage {
    pub fn text(&self) -> &str {
        match self {
            UserMessage::Info(s) | UserMessage::Error(s) => s,
            UserMessage::NoEligibleCandidate => "No eligible download found in catalog",
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, UserMessage::Info(_))
    }
}

/// Names of the observable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateField {
    Title,
    ImagePath,
    Progress,
    Downloading,
    Message,
}

/// A field and its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    Title(String),
    ImagePath(PathBuf),
    Progress(u8),
    Downloading(bool),
    Message(UserMessage),
}

impl StateChange {
    pub fn field(&self) -> StateField {
        match self {
            StateChange::Title(_) => StateField::Title,
            StateChange::ImagePath(_) => StateField::ImagePath,
            StateChange::Progress(_) => StateField::Progress,
            StateChange::Downloading(_) => StateField::Downloading,
            StateChange::Message(_) => StateField::Message,
        }
    }
}

/// Receives state changes. Called on whichever thread made the change.
pub trait StateObserver: Send + Sync {
    fn on_change(&self, change: &StateChange);
}

/// State plus its observer list.
#[derive(Default)]
pub(crate) struct SharedState {
    state: Mutex<DownloadState>,
    observers: RwLock<Vec<Arc<dyn StateObserver>>>,
}

impl SharedState {
    pub(crate) fn subscribe(&self, observer: Arc<dyn StateObserver>) {
        self.observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(observer);
    }

    pub(crate) fn snapshot(&self) -> DownloadState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Applies `change`; observers are only told when the value differs.
    /// Messages are always delivered.
    pub(crate) fn apply(&self, change: StateChange) {
        let changed = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            match &change {
                StateChange::Title(t) => replace(&mut state.title, Some(t.clone())),
                StateChange::ImagePath(p) => replace(&mut state.image_path, Some(p.clone())),
                StateChange::Progress(p) => replace(&mut state.progress_percent, (*p).min(100)),
                StateChange::Downloading(d) => replace(&mut state.is_downloading, *d),
                StateChange::Message(m) => {
                    state.last_message = Some(m.clone());
                    true
                }
            }
        };
        if !changed {
            return;
        }
        let observers = self
            .observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for observer in observers {
            observer.on_change(&change);
        }
    }

    pub(crate) fn info(&self, text: String) {
        tracing::info!("{}", text);
        self.apply(StateChange::Message(UserMessage::Info(text)));
    }

    pub(crate) fn no_candidate(&self) {
        let message = UserMessage::NoEligibleCandidate;
        tracing::warn!("{}", message.text());
        self.apply(StateChange::Message(message));
    }

    pub(crate) fn error(&self, text: String) {
        tracing::warn!("{}", text);
        self.apply(StateChange::Message(UserMessage::Error(text)));
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
