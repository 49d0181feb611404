//! Fan-out writers, print wrappers and the channel registry.

mod fanout;
mod registry;
mod writer;

pub use fanout::FanoutWriter;
pub use registry::Registry;
pub use writer::ChannelWriter;
