//! # stockclip-cli
//!
//! Session controller and platform glue behind the `stockclip` binary.

pub mod controller;
pub mod platform;
pub mod repl;

pub use controller::{App, AppError, LoadOutcome};
pub use platform::{
    Clipboard, ClipboardError, CommandClipboard, FileSource, FsFileSource, StdoutClipboard,
};
