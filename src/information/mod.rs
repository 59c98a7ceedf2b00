//! Information Module: Comparing Persistence Diagrams
//!
//! Two complementary summaries of how a diagram changes:
//!
//! ### Persistent Entropy (Shannon)
//!
//! Given a persistence diagram D = {(bᵢ, dᵢ)}, the persistent entropy is
//!
//!   H_P = -Σᵢ pᵢ log(pᵢ)
//!
//! where pᵢ = lᵢ / L, lᵢ = dᵢ - bᵢ is the lifetime of generator i,
//! and L = Σⱼ lⱼ is the total lifetime.
//!
//! ### Wasserstein Distance
//!
//! The optimal-transport cost of turning one diagram into another, where
//! points may also be moved onto the diagonal (created or destroyed).

mod entropy;
mod matching;
mod wasserstein;

pub use entropy::{persistence_entropy, TopologicalEntropy};
pub use matching::min_cost_assignment;
pub use wasserstein::wasserstein_distance;
