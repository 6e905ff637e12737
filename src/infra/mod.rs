pub mod db_external;
pub mod db_internal;
pub mod model_client;
pub mod utils;
