pub mod human;
pub mod report;
pub(crate) mod ring_buffer;
