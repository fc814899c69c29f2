pub mod item;
pub mod resource;

pub use item::{GroupCount, Item, ItemPatch};
pub use resource::Resource;
