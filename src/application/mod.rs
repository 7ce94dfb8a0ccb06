pub mod records;
pub mod storefront_service;
