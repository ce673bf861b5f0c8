/*!
 * Document module: turns localization documents into row records.
 *
 * # Architecture
 *
 * - `row`: `RowRecord` and the language channel mapping
 * - `accumulator`: parser-independent `Idle -> InRow -> InChannel` state machine
 * - `reader`: `quick-xml` adapter yielding rows lazily
 */

pub mod accumulator;
pub mod reader;
pub mod row;

// Re-export main types
pub use accumulator::{DocumentEvent, RowAccumulator};
pub use reader::RowReader;
pub use row::{Channel, ChannelMap, RowRecord};
