pub mod config;
pub mod controller;
pub mod errors;
pub mod memory;
pub mod rest;
pub mod service;
pub mod store;

pub use config::StoreConfig;
pub use controller::TaskController;
pub use errors::ClientError;
pub use memory::MemoryTaskStore;
pub use rest::RestClient;
pub use service::TaskService;
pub use store::{RestTaskStore, TaskStore};
