pub mod codec;
pub mod files;
pub mod kv;
pub mod settings;

pub use codec::{decode_tasks, encode_tasks};
pub use files::{
    config_file, ensure_data_dir, init_local_data_dir, log_file, read_file, store_file,
};
pub use kv::{FileStore, KeyValueStore};
#[cfg(test)]
pub use kv::MemoryStore;
pub use settings::{load_appearance, save_appearance};
