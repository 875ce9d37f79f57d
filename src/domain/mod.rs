// Domain layer - Dashboard records, resources and table filter state
pub mod records;
pub mod resource;
pub mod table;
