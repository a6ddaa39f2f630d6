mod common;
mod geekdo;
pub mod xml;

pub use common::DescriptionCleaner;
pub use geekdo::GeekdoApi;
