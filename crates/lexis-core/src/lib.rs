#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! Corpus reader core: bitmap fonts, word-wrapped layout, the PRDB lexical
//! database and the pages and lookup reports drawn from them.
//!
//! Everything here draws through [`dualscreen_fb::Canvas`] and reads assets
//! through a [`store::ByteStore`], so the same code runs against device
//! buffers and host-side images.

extern crate alloc;

pub mod corpus;
pub mod font;
pub mod layout;
pub mod lookup;
pub mod page;
pub mod postag;
pub mod render;
pub mod store;
pub mod text_policy;
pub mod utf8;

#[cfg(test)]
mod fixtures;

pub use corpus::{Corpus, CorpusBuilder, CorpusError, LexResult, Line, LineRef, MorphResult};
pub use font::{Font, FontBuilder, FontError, FontSet, FontSetConfig, FontSetError, GlyphEntry};
pub use layout::{WordSpan, WrapArea};
pub use lookup::{LookupConfig, LookupMode, LookupReport, ResultLine};
pub use page::{PageConfig, PageHeader, PageMap, PlacedLine};
pub use render::{Palette, Role};
pub use store::{ByteStore, MemStore, StoreError};

#[cfg(feature = "std")]
pub use store::FsStore;
