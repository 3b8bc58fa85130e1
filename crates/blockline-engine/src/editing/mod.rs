/*!
 * # Editing Core
 *
 * The block model and its state machine.
 *
 * ## Architecture Overview
 *
 * ### 1. Blocks are positional
 * - A **`Document`** is an ordered `Vec<Block>`; a block's identity is its index
 * - Neighbours come from index arithmetic, never from stored links
 *
 * ### 2. Two presentations per block
 * - **`Block::Rendered`** holds the block's markup, read-only
 * - **`Block::Editing`** holds raw text and a caret (`EditingBlock`)
 * - At most one block is editing; entering edit on one blurs the other
 *
 * ### 3. Two-phase caret placement
 * - Entering edit *mounts* the block with a `PendingPlacement`
 * - The placement is resolved once the host can measure the input element,
 *   see `EditorController::on_mounted`
 *
 * ### 4. Structural edits
 * - Split (Enter), tab insertion, merge-into-previous (Backspace at 0) and
 *   merge-next (Delete at end of content), all starting from the active block
 *
 * ## Module Structure
 *
 * - **`block`**: `Block`, `EditingBlock`, `CaretRequest`, `PendingPlacement`
 * - **`document`**: `Document` and neighbour lookup
 * - **`state_machine`**: transitions and structural edits
 */

pub mod block;
pub mod document;
pub mod state_machine;

pub use block::{Block, CaretRequest, EditingBlock, PendingPlacement};
pub use document::Document;
pub use state_machine::Transition;
