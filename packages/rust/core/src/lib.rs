//! siteprofiler core: ranking, profile assembly, and the end-to-end
//! profiling pipeline.
//!
//! The pipeline stitches the discovery crate's pieces together:
//! normalize the caller's URL text, discover candidate pages, rank them
//! into a crawl plan, and wrap the plan into the profile document the
//! calling orchestrator consumes.

pub mod assembler;
pub mod pipeline;
pub mod ranking;

pub use assembler::assemble_profile;
pub use pipeline::{DEFAULT_PAGES, ProfileOptions, ProfileResponse, build_profile, profile_origin};
pub use ranking::rank;
