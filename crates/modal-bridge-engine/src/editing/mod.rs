/*!
 * # Editor Façade
 *
 * The modal core sees one [`Platform`] per open editor. [`EditorBridge`] is
 * its implementation over any [`crate::host::EditorHost`].
 *
 * ## Coordinate spaces
 *
 * Every offset and line crosses the façade in the active [`crate::Space`].
 * [`Translator`] converts between model and view space and falls back to the
 * identity when the host has no folding. Queries in view space translate the
 * query key to the model first and the result back last (see [`lines`]).
 *
 * ## Module Structure
 *
 * - **`translate`**: model/view offset and line conversion
 * - **`lines`**: line and length queries in either space
 * - **`marks`**: named positions tracked by the host
 * - **`undo`**: compound-change coalescing over the native undo manager
 * - **`search`**: native find with the caret restored afterwards
 * - **`shift`**: indentation of a model line range
 * - **`status`**: editor identity, modes and mode indicators
 * - **`platform`** / **`bridge`**: the façade contract and its implementation
 * - **`registry`**: one façade per editor, keyed by [`EditorId`]
 *
 * ## Usage Pattern
 *
 * ```rust
 * use modal_bridge_engine::editing::{EditorRegistry, Platform};
 * use modal_bridge_engine::host::MemoryEditor;
 * use modal_bridge_engine::models::Search;
 *
 * let mut registry = EditorRegistry::new();
 * let id = registry.open(MemoryEditor::new("let x = 1;\nlet y = x;"));
 * let editor = registry.get_mut(id).unwrap();
 *
 * editor.set_mark("a");
 * let found = editor.find(&Search::forward("x"), 5);
 * assert_eq!(found.index, Some(19));
 * assert_eq!(editor.position(), 0);
 * ```
 */

pub mod bridge;
pub mod lines;
pub mod marks;
pub mod platform;
pub mod registry;
pub mod search;
pub mod shift;
pub mod status;
pub mod translate;
pub mod undo;

pub use bridge::{ChangeGuard, EditorBridge, RepaintGuard};
pub use marks::MarkRegistry;
pub use platform::Platform;
pub use registry::EditorRegistry;
pub use status::{EditorId, Mode, ModeIndicator, StatusRegistry};
pub use translate::Translator;
pub use undo::{CoalescerState, UndoCoalescer};
