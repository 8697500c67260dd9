mod database;

pub use database::connect_and_migrate;
