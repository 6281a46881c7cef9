mod provision;
mod schema;

pub use provision::{create_database, create_tables, drop_tables, provision};
pub use schema::{latest_schema, table_names, WAREHOUSE_VERSIONED_SCHEMAS};
