mod channel;
mod file;
mod message;

pub use channel::Channel;
pub use file::File;
pub use message::Message;
