//! # Lodestone DOM
//!
//! A minimal, single-threaded DOM stand-in used by the Lodestone binding
//! engine. It models exactly the surface the engine binds against:
//!
//! - an element/text node tree with interior mutability (`Rc<Node>` handles)
//! - string attributes plus a separate *live property* map (the
//!   attribute/property split that `<input>` elements have in a browser)
//! - attribute mutation observers with batched record delivery
//! - DOM events with add/remove listener handles
//! - an HTML serializer for diagnostics and tests
//!
//! There is no layout, no styling and no parsing here; templates are parsed
//! by `lodestone-parser` and instantiated into this tree.

pub mod event;
pub mod mutation;
pub mod node;
pub mod serializer;

pub use event::{Event, EventListener};
pub use mutation::{MutationObserver, MutationRecord};
pub use node::{Node, NodeRef};
