//! Built-in sinks. These are the only concrete `Sink` implementations the
//! facade's URI parser knows how to construct; user code may implement
//! [`crate::Sink`] directly for anything else.

mod discard;
mod file;
mod stdout;

pub use discard::DiscardSink;
pub use file::FileSink;
pub use stdout::StdoutSink;
