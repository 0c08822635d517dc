pub mod json_file_snapshot_store;
pub mod webhook_dispatch_gateway;
