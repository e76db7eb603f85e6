pub mod lambda_adapter;
pub mod response;
