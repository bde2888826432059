/// Reputation recalculation for answer state changes
///
/// A user's stored reputation is a running total of the votes on their
/// posts multiplied by per-install weights. When an answer stops counting
/// (deleted) or starts counting again (undeleted), the votes it carries are
/// revoked from or granted back to its owner.
///
/// ```text
/// delta = direction × (up_votes × AnswerUpVoteRep + down_votes × AnswerDownVoteRep)
/// ```
///
/// # Example
///
/// ```
/// use askbase_shared::models::vote::VoteType;
/// use askbase_shared::reputation::{Direction, ReputationCalculator};
/// use askbase_shared::store::memory::MemoryStore;
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryStore::new();
/// store.set_setting("AnswerUpVoteRep", "10").await;
/// let owner = store.add_user("owner", 100, false).await;
/// store.add_votes(7, VoteType::Up, 3).await;
///
/// let calculator = ReputationCalculator::new(&store);
/// let total = calculator.adjust(owner.id, 7, Direction::Revoke).await.unwrap();
/// assert_eq!(total, 70);
/// # }
/// ```

use tracing::{debug, info};

use crate::models::setting::{parse_integer_setting, ANSWER_DOWN_VOTE_REP, ANSWER_UP_VOTE_REP};
use crate::models::vote::VoteType;
use crate::store::{SettingsRepository, StoreError, StoreResult, UserRepository, VoteRepository};

/// Whether a post's votes are added to or removed from its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Post becomes eligible again (undelete)
    Grant,

    /// Post stops counting (delete)
    Revoke,
}

impl Direction {
    pub fn sign(&self) -> i64 {
        match self {
            Direction::Grant => 1,
            Direction::Revoke => -1,
        }
    }
}

/// Reputation value of a single vote of each kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoteWeights {
    pub up: i64,
    pub down: i64,
}

impl VoteWeights {
    /// Builds weights from raw setting values
    ///
    /// Missing or non-numeric values weigh 0.
    pub fn from_settings(up: Option<&str>, down: Option<&str>) -> Self {
        Self {
            up: parse_integer_setting(up),
            down: parse_integer_setting(down),
        }
    }
}

/// Signed reputation change for a post with the given vote counts
pub fn reputation_delta(
    up_votes: i64,
    down_votes: i64,
    weights: VoteWeights,
    direction: Direction,
) -> i64 {
    let up_total = up_votes.saturating_mul(weights.up);
    let down_total = down_votes.saturating_mul(weights.down);
    up_total
        .saturating_add(down_total)
        .saturating_mul(direction.sign())
}

/// Applies vote-derived reputation changes to post owners
pub struct ReputationCalculator<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S> ReputationCalculator<'a, S>
where
    S: VoteRepository + SettingsRepository + UserRepository + ?Sized,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Reads the current vote weights from site settings
    pub async fn weights(&self) -> StoreResult<VoteWeights> {
        let up = self.store.get_setting(ANSWER_UP_VOTE_REP).await?;
        let down = self.store.get_setting(ANSWER_DOWN_VOTE_REP).await?;

        Ok(VoteWeights::from_settings(up.as_deref(), down.as_deref()))
    }

    /// Grants or revokes the reputation carried by `post_id` on `user_id`
    ///
    /// # Returns
    ///
    /// The owner's reputation after the change. A zero delta performs no
    /// write and returns the current total.
    ///
    /// # Errors
    ///
    /// Store failures are returned unchanged. A missing user is
    /// `StoreError::MissingRecord`.
    pub async fn adjust(&self, user_id: i64, post_id: i64, direction: Direction) -> StoreResult<i64> {
        let weights = self.weights().await?;
        let up_votes = self.store.count_votes_by_type(post_id, VoteType::Up).await?;
        let down_votes = self.store.count_votes_by_type(post_id, VoteType::Down).await?;

        let delta = reputation_delta(up_votes, down_votes, weights, direction);

        if delta == 0 {
            debug!(user_id, post_id, "Zero reputation delta, nothing to write");
            return self
                .store
                .find_user(user_id)
                .await?
                .map(|user| user.reputation)
                .ok_or(StoreError::MissingRecord { kind: "user", id: user_id });
        }

        let reputation = self
            .store
            .adjust_reputation(user_id, delta)
            .await?
            .ok_or(StoreError::MissingRecord { kind: "user", id: user_id })?;

        info!(
            user_id,
            post_id,
            delta,
            reputation,
            direction = ?direction,
            "Reputation adjusted"
        );

        Ok(reputation)
    }
}
