pub mod row_appender;
