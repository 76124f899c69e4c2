pub mod character;
pub mod dataset;
pub mod ki;
pub mod page;

mod error;

pub use character::{Character, CharacterId, Ki};
pub use dataset::StaticCatalog;
pub use error::{Error, Result};
pub use page::PageMeta;
