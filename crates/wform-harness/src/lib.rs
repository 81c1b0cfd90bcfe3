#![forbid(unsafe_code)]

//! Test harness and reference fixtures for wform.
//!
//! [`MemoryDocument`] implements the runtime's document boundary without a
//! browser: a flat list of [`MemoryElement`] controls, CSS selector matching
//! through `scraper`, and helpers that simulate user interaction (typing, clicking,
//! choosing an option) by mutating state and dispatching change listeners
//! synchronously.
//!
//! [`mount`] fills a document with the controls a [`Webform`](wform_core::Webform)
//! renders, and [`fixtures`] holds the schemas the test suites share.

pub mod document;
pub mod element;
pub mod fixtures;
pub mod mount;
pub mod selector;

pub use document::MemoryDocument;
pub use element::MemoryElement;
pub use mount::{mount, mount_element, mounted};
