//! Utilities for positioning content on pages.
//!
//! [`sections`](crate::layout::sections) splits a sheet into n-up areas, each of which a template
//! fills independently. The text helpers centre short labels such as day names and topics.
//!
//! # Example
//!
//! ```
//! use givesheet::layout::{sections, whole_cells};
//! use givesheet::{pagesize, In};
//!
//! let areas = sections(pagesize::LETTER, In(0.5).into(), In(0.25).into(), (2, 1))
//!     .expect("two columns fit on letter paper");
//! assert_eq!(areas.len(), 2);
//! assert!(whole_cells(areas[0].width(), In(0.25).into()) > 0);
//! ```

mod margins;
mod sections;
mod text;

pub use margins::*;
pub use sections::*;
pub use text::*;
