pub mod notifications;
pub mod pool;
pub mod presenter;
pub mod save_load;
