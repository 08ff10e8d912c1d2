// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod row_mapper;
pub mod supabase_repository;
