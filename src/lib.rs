mod collection;
mod delegate;
mod error;
mod event;
mod handler;
mod list;
mod parent;
mod set;
mod subscription;

pub use collection::*;
pub use delegate::*;
pub use error::*;
pub use event::*;
pub use handler::*;
pub use list::*;
pub use parent::*;
pub use set::*;
pub use subscription::*;
