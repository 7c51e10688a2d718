pub mod config_io;
pub mod kv;
pub mod recovery;
pub mod state;
pub mod task_store;
