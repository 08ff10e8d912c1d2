// Application layer - Pure trend core and use-case services
pub mod aggregator;
pub mod alert_service;
pub mod alerts;
pub mod curve_builder;
pub mod scan_service;
pub mod trend_service;
pub mod vitals_repository;
