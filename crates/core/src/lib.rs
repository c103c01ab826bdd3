#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `clifm-core` carries the state and collaborator surface shared by the
//! bulk file-mutation flows in `clifm-bulk`. The original file manager kept
//! this state in process-wide globals (current workspace, cached directory
//! listing, selection set, stealth mode, temp directory, auto-list flag)
//! and reached its collaborators through free functions; this crate turns
//! the former into an explicit [`BulkContext`] value and the latter into
//! the [`Host`] trait so the flows stay testable without a running prompt
//! loop.
//!
//! # Design
//!
//! - [`BulkContext`] is an immutable snapshot built once per command
//!   invocation. The flows only read it; the directory listing is refreshed
//!   indirectly through [`Host::reload_dirlist`].
//! - [`Host`] is the single seam between the bulk core and the rest of the
//!   file manager: file opening by association, foreground child execution,
//!   file removal, cwd membership queries, listing/selection refresh, the
//!   y/n prompt, and diagnostics emission all cross it. [`SystemHost`]
//!   backs the trait with real processes and stdio so the crate works
//!   stand-alone.
//! - Diagnostics are [`Message`] values; the host decides how to render
//!   them rather than the core writing to stdio directly.
//!
//! # See also
//!
//! - `clifm-bulk` for the bulk rename/remove flows built on this crate.

pub mod context;
pub mod exit_code;
pub mod host;
pub mod kind;
pub mod message;
pub mod path;

pub use context::{BulkContext, ListedFile};
pub use host::{Host, SystemHost};
pub use kind::FileKind;
pub use message::{Message, Severity};
