//! Two-pass linker for decimal object modules.
//!
//! Pass 1 ([`symbols::build`]) assigns module base addresses and builds the
//! symbol table. Pass 2 ([`resolve::resolve`]) relocates program text and
//! patches every use chain. [`link`] runs both and returns a [`Linked`]
//! image together with its diagnostics.

pub mod diag;
pub mod error;
pub mod module;
pub mod msg;
pub mod reader;
pub mod report;
pub mod resolve;
pub mod symbols;

pub use diag::{Diagnostic, Diagnostics};
pub use error::Error;
pub use module::Module;
pub use reader::{NamePolicy, Reader};
pub use resolve::{link, Linked};
pub use symbols::SymbolTable;
