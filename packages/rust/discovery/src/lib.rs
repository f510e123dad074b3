//! Website content discovery for siteprofiler.
//!
//! Given a normalized origin, this crate figures out which pages on the
//! site are worth crawling. It tries the sitemap first, falls back to
//! harvesting same-host links from the homepage, and at each stage retries
//! once with an operator-configured bypass cookie when a hosting-platform
//! protection wall gets in the way. The engine never fails: the worst case
//! is an empty outcome the caller backfills with a synthetic page list.

pub mod bypass;
pub mod engine;
pub mod fetch;
pub mod links;
pub mod normalize;
pub mod sitemap;

pub use bypass::{bypass_cookie, resolve_rule};
pub use engine::{DiscoveryEngine, ProtectionSignature, VercelSignature};
pub use fetch::Fetcher;
pub use links::extract_links;
pub use normalize::normalize_origin;
pub use sitemap::extract_locs;
