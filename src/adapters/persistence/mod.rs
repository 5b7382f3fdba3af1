//! Response sinks: local SQLite (default) and Supabase REST.

pub mod sqlite_sink;
pub mod supabase_sink;

pub use sqlite_sink::SqliteSink;
pub use supabase_sink::SupabaseSink;
