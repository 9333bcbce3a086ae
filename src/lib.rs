//! Printable page templates: graph paper, dotted grids, lined paper and weekly planners,
//! written straight to PDF.
//!
//! Each template lives in [templates] and adds one page to a [Document]. Colourful variants draw
//! their colours through [rainbow], which takes the random number generator as a parameter so
//! output can be made reproducible.

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod draw;
pub use draw::*;

mod font;
pub use font::*;

mod form;
pub use form::*;

mod form_xobject;
pub use form_xobject::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Utility functions and structures to lay out sections and labels on pages
pub mod layout;

mod page;
pub use page::*;

pub mod pagesize;

pub mod rainbow;

mod rect;
pub use rect::*;

pub(crate) mod refs;

pub mod templates;

mod transform;
pub use transform::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
