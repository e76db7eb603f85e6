pub mod auth;
pub mod credentials;
pub mod http_client;
pub mod reconnecting_appender;
pub mod spreadsheet_manager;
pub mod unavailable_appender;
pub mod value_range_factory;
