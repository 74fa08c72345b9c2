//! Todo list state
//!
//! All list logic lives here. It must stay platform independent:
//! - Storage only through `PersistenceAdapter`
//! - Ids from a counter, never the clock
//! - No DOM or browser dependencies

pub mod item;
pub mod ops;
pub mod todo_store;

pub use item::{IdGenerator, Item, ItemId};
pub use todo_store::{StoreEvent, SubscriptionId, TodoStore};
