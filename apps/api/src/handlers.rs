pub mod arm;
pub mod deployments;
pub mod health;
pub mod sites;
pub mod templates;
pub mod tenants;
pub mod token;
