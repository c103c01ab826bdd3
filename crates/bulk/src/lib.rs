#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `clifm-bulk` implements the editor-mediated batch operations of the
//! file manager: bulk rename and bulk remove. Both share one pattern —
//! materialize the current file set into an editable text document, hand
//! the document to an external editor, diff the result against the
//! original sequence, confirm, and execute the diff as file-system
//! mutations — with per-operation invariants around identity, ordering,
//! cross-device fallbacks, change detection, and partial-failure
//! reporting.
//!
//! # Design
//!
//! Five components cooperate, leaves first: [`tempdoc::TempDoc`] owns the
//! editable surface and unlinks it on every exit path; [`enumerate`]
//! builds the ordered entry sequence from an argument vector or a
//! directory; [`editor`] runs the external editor in the foreground and
//! restores the terminal; [`diff`] detects edits, enforces the structural
//! line-count invariant, and pairs lines with entries by position; and
//! [`exec`] applies the change list with `EXDEV` recovery and
//! first-nonzero aggregation. The flow drivers [`bulk_rename`] and
//! [`bulk_remove`] wire them into the Init → Enumerate → Write → Edit →
//! Diff → Confirm → Apply → Report state machine.
//!
//! Everything the flows need from the surrounding file manager crosses
//! the [`clifm_core::Host`] trait, and all process-wide configuration
//! arrives as a [`clifm_core::BulkContext`] snapshot, so the crate runs
//! identically under the prompt loop, a stand-alone host, or a scripted
//! test double.
//!
//! # Invariants
//!
//! - The non-comment line count of the written document equals the entry
//!   count, and entry identity is positional: the i-th non-comment edited
//!   line corresponds to the i-th entry.
//! - The temporary document is unlinked on every exit path, success or
//!   failure.
//! - Per-item failures never abort a batch; the first nonzero status is
//!   the aggregate result.
//!
//! # Errors
//!
//! Aborting failures are classified by [`error::BulkError`]; the flow
//! entry points render them through the host and collapse them to the
//! integer status contract (zero on success, first nonzero errno or child
//! status, `EXIT_FAILURE` for structural errors).

pub mod diff;
pub mod editor;
pub mod entry;
pub mod enumerate;
pub mod error;
pub mod exec;
pub mod rename;
pub mod remove;
pub mod tempdoc;

#[cfg(test)]
pub(crate) mod test_host;

pub use diff::{DiffOutcome, RemoveOutcome, RenameChange};
pub use entry::{Entry, kind_suffix};
pub use error::{BulkError, BulkResult};
pub use exec::RenameReport;
pub use rename::bulk_rename;
pub use remove::bulk_remove;
pub use tempdoc::TempDoc;
