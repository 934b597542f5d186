//! # vireo
//!
//! A retained-tree UI runtime: declarative VNode descriptions, a keyed
//! reconciler, and a reactive store with automatic dependency tracking.
//!
//! Applications describe what the tree should look like as [`vnode::VNode`]
//! values; vireo materializes them into a slotmap-backed live tree and, on
//! every re-render, patches only what changed. Components are named render
//! functions bound to the store: each render records exactly the state keys
//! it read, and the binding re-renders when (and only when) one of them
//! changes.
//!
//! ## Core Systems
//!
//! - **[`dom`]** — Slotmap-backed live tree arena with tree operations
//! - **[`vnode`]** — VNode descriptions: elements, text, keys, lifecycle hooks
//! - **[`render`]** — Materializer and the keyed/positional reconciler
//! - **[`store`]** — Reactive key/value store with coalesced notification
//! - **[`component`]** — Component registry, props, dependency-tracked bindings
//! - **[`scheduler`]** — The coalescing queue behind tick and frame flushes
//! - **[`event`]** — Bubbling event dispatch over the live tree
//! - **[`runtime`]** — The owner struct tying tree, store, and queues together
//! - **[`app`]** — Flush loop driving a runtime at a fixed cadence
//!
//! ## A counter
//!
//! ```
//! use vireo::component::Props;
//! use vireo::runtime::Runtime;
//! use vireo::vnode::{Element, VNode};
//!
//! let mut rt = Runtime::new();
//! let mount = rt.dom.create_element("root");
//! rt.store.set_value("count", 0i64);
//!
//! rt.define_component("Counter", |scope, _props| {
//!     let count = scope.get_cloned::<i64>("count").unwrap_or_default();
//!     Element::new("div")
//!         .child(VNode::text(format!("count: {count}")))
//!         .into()
//! });
//!
//! rt.bind_component("Counter", Props::new(), mount);
//! assert_eq!(rt.dom.text_content(mount), "count: 0");
//!
//! rt.store.set_value("count", 5i64);
//! rt.flush_tick();
//! assert_eq!(rt.dom.text_content(mount), "count: 5");
//! ```

// Tree and descriptions
pub mod dom;
pub mod vnode;

// Rendering
pub mod render;

// State and components
pub mod component;
pub mod store;

// Scheduling and events
pub mod event;
pub mod scheduler;

// Runtime and loop
pub mod app;
pub mod runtime;

// Snapshot helpers
pub mod testing;

pub use app::{App, AppConfig};
pub use component::{Binding, ComponentError, Props};
pub use dom::{Dom, NodeId};
pub use runtime::Runtime;
pub use store::{Scope, StateChange, Store};
pub use vnode::{Element, Key, VNode};
