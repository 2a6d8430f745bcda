//! Domain types and invariants for deployment orchestration.

#![forbid(unsafe_code)]

mod deployment;
mod provider;
mod repository;
mod site_name;
mod subscription;
mod tenant;
mod token;

pub use deployment::{
    DeploymentMode, DeploymentRequest, DeploymentResult, ProvisioningState, ResourceGroup,
};
pub use provider::ProviderMap;
pub use repository::{
    DEFAULT_BRANCH, GITHUB_RAW_BASE_URL, GitHubRepository, RepositoryHost, TEMPLATE_FILE_NAME,
    TemplateDescriptor, TemplateLocator,
};
pub use site_name::{HEX_ALPHABET, SiteNameCandidate, compose_site_name};
pub use subscription::{Subscription, SubscriptionState, enabled_subscriptions};
pub use tenant::{Tenant, mark_current_tenants};
pub use token::{
    Claims, TENANT_ID_CLAIM, base64_padding, decode_token_claims, decode_token_payload,
};
