//! Collision-checked identifier generation.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::error::LinkError;
use crate::domain::repositories::LinkRepository;
use crate::utils::code_generator::generate_identifier;
use crate::utils::deadline::CallDeadlines;

/// Maximum number of candidates drawn before giving up.
pub const MAX_ATTEMPTS: usize = 10;

/// Supplies identifier candidates.
pub trait CandidateSource: Send + Sync {
    fn candidate(&self) -> String;
}

/// Uniform random 9-character alphanumeric candidates.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomAlphanumeric;

impl CandidateSource for RandomAlphanumeric {
    fn candidate(&self) -> String {
        generate_identifier()
    }
}

/// Draws candidates and returns the first one not present in the store.
///
/// The uniqueness check is read-only: nothing is reserved, so a concurrent
/// creation may still claim the same identifier before the caller inserts it.
/// The store's unique constraint settles such races (see
/// [`crate::application::services::LinkService::create`]).
pub struct IdentifierGenerator {
    source: Arc<dyn CandidateSource>,
    deadlines: CallDeadlines,
}

impl IdentifierGenerator {
    /// Creates a generator drawing random alphanumeric candidates.
    pub fn new(deadlines: CallDeadlines) -> Self {
        Self::with_source(Arc::new(RandomAlphanumeric), deadlines)
    }

    pub fn with_source(source: Arc<dyn CandidateSource>, deadlines: CallDeadlines) -> Self {
        Self { source, deadlines }
    }

    /// Returns an identifier unused at check time.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::GenerationExhausted`] after [`MAX_ATTEMPTS`] taken
    /// candidates, and [`LinkError::Store`] if a uniqueness check fails.
    pub async fn generate<L>(&self, store: &L) -> Result<String, LinkError>
    where
        L: LinkRepository + ?Sized,
    {
        for attempt in 1..=MAX_ATTEMPTS {
            let candidate = self.source.candidate();

            let taken = self
                .deadlines
                .store(
                    "exists_by_identifier",
                    store.exists_by_identifier(&candidate),
                )
                .await?;

            if !taken {
                return Ok(candidate);
            }

            metrics::counter!("shortlink_identifier_collisions_total").increment(1);
            debug!(attempt, identifier = %candidate, "Identifier candidate already in use");
        }

        warn!(attempts = MAX_ATTEMPTS, "Identifier generation exhausted");
        Err(LinkError::GenerationExhausted {
            attempts: MAX_ATTEMPTS,
        })
    }
}
