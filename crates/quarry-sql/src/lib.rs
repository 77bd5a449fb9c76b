pub mod dialect;
pub use dialect::{AnsiDialect, Dialect, PostgresqlDialect, SqliteDialect};

pub mod generator;
pub use generator::{
    CreateIndexOptions, CreateTableOptions, DeleteTarget, DropBehavior, DropColumnOptions,
    DropIndexOptions, DropTableOptions, Generator, SelectOptions,
};

pub mod materialize;
pub use materialize::{ModelData, QueryResult};

pub mod pager;
pub use pager::Pager;
