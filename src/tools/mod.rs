pub mod args;
pub mod catalogue;
pub mod dispatcher;
