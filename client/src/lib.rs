pub mod cli;
pub mod client;
pub mod filter;
pub mod http;
pub mod local;
pub mod models;
pub mod notify;
pub mod store;
pub mod view;

pub use client::{ClearReport, EditMode, NoteClient};
pub use models::{Note, NoteId};
pub use store::{NoteStore, StoreError};
