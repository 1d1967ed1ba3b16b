pub mod add;
pub mod ask;
pub mod complete;
pub mod copy;
pub mod delete;
pub mod edit;
pub mod list;
pub mod move_event;
pub mod setkey;
pub mod summary;
pub mod watch;
