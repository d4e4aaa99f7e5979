//! Console presentation of session state.

use std::io::Write;

use mdm_core::session::{StateChange, StateObserver, UserMessage};

/// Prints state changes: messages and title to stdout, progress to stderr.
pub struct ConsoleObserver;

impl StateObserver for ConsoleObserver {
    fn on_change(&self, change: &StateChange) {
        match change {
            StateChange::Title(title) => println!("Title: {title}"),
            StateChange::ImagePath(path) => println!("Image: {}", path.display()),
            StateChange::Progress(pct) => {
                let mut err = std::io::stderr().lock();
                let _ = write!(err, "\rDownloading... {pct:>3}%");
                let _ = err.flush();
            }
            StateChange::Downloading(false) => eprintln!(),
            StateChange::Downloading(true) => {}
            StateChange::Message(UserMessage::Info(text)) => println!("{text}"),
            StateChange::Message(message) => eprintln!("{}", message.text()),
        }
    }
}
