pub mod supabase_api;

pub use supabase_api::SupabaseApi;
