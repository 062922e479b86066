// Application layer - Use case interactors

pub mod container;
pub mod fetch_interactor;
pub mod probe_interactor;
pub mod split_interactor;

// Re-export interactors
pub use fetch_interactor::FetchInteractor;
pub use probe_interactor::{ProbeInteractor, ProbeResponse};
pub use split_interactor::SplitInteractor;
