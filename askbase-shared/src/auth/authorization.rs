/// Privilege checks for moderating posts
///
/// An actor may act on a post when any of these holds:
///
/// 1. **Ownership**: the actor wrote the post
/// 2. **Administration**: the actor is a site administrator
/// 3. **Reputation**: the actor's reputation reaches the threshold of the
///    privilege named after the action
///
/// A privilege with no configured threshold can only be exercised by owners
/// and administrators.
///
/// # Example
///
/// ```
/// use askbase_shared::auth::authorization::{check_your_privilege, PrivilegeAction};
/// use askbase_shared::store::memory::MemoryStore;
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryStore::new();
/// store.set_privilege("Delete", 2000).await;
/// let owner = store.add_user("owner", 1, false).await;
/// let veteran = store.add_user("veteran", 2500, false).await;
/// let question = store.add_question("How?", "rust", owner.id).await;
/// let answer = store.add_answer(question.id, owner.id, "Like this.").await;
///
/// assert!(check_your_privilege(&store, PrivilegeAction::Delete, veteran.id, &answer).await.unwrap());
/// # }
/// ```

use std::fmt;

use tracing::debug;

use crate::models::{answer::Answer, user::User};
use crate::store::{SettingsRepository, StoreResult, UserRepository};

/// Moderation actions gated by a privilege
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivilegeAction {
    Edit,
    Delete,
}

impl PrivilegeAction {
    /// Name of the privilege row holding the threshold
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivilegeAction::Edit => "Edit",
            PrivilegeAction::Delete => "Delete",
        }
    }
}

impl fmt::Display for PrivilegeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides a privilege from already-loaded data
pub fn has_privilege(actor: &User, post_owner_id: i64, threshold: Option<i64>) -> bool {
    if actor.id == post_owner_id || actor.is_admin {
        return true;
    }

    matches!(threshold, Some(required) if actor.reputation >= required)
}

/// Checks whether `actor_id` may perform `action` on `answer`
///
/// # Returns
///
/// `false` for unknown actors
///
/// # Errors
///
/// Store failures while loading the actor or threshold
pub async fn check_your_privilege<S>(
    store: &S,
    action: PrivilegeAction,
    actor_id: i64,
    answer: &Answer,
) -> StoreResult<bool>
where
    S: UserRepository + SettingsRepository + ?Sized,
{
    let Some(actor) = store.find_user(actor_id).await? else {
        debug!(actor_id, "Privilege check for unknown user");
        return Ok(false);
    };

    // Owners and admins never need the threshold lookup
    if actor.id == answer.user_id || actor.is_admin {
        return Ok(true);
    }

    let threshold = store.privilege_threshold(action.as_str()).await?;
    let allowed = has_privilege(&actor, answer.user_id, threshold);

    debug!(
        actor_id,
        answer_id = answer.id,
        action = %action,
        threshold = ?threshold,
        reputation = actor.reputation,
        allowed,
        "Privilege checked"
    );

    Ok(allowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use chrono::Utc;

    fn user(id: i64, reputation: i64, is_admin: bool) -> User {
        User {
            id,
            username: format!("user{}", id),
            reputation,
            is_admin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_always_allowed() {
        assert!(has_privilege(&user(1, 0, false), 1, None));
        assert!(has_privilege(&user(1, 0, false), 1, Some(10_000)));
    }

    #[test]
    fn test_admin_always_allowed() {
        assert!(has_privilege(&user(2, 0, true), 1, None));
    }

    #[test]
    fn test_reputation_threshold() {
        assert!(has_privilege(&user(2, 2000, false), 1, Some(2000)));
        assert!(!has_privilege(&user(2, 1999, false), 1, Some(2000)));
    }

    #[test]
    fn test_unknown_privilege_denies_others() {
        assert!(!has_privilege(&user(2, i64::MAX, false), 1, None));
    }

    #[test]
    fn test_action_names() {
        assert_eq!(PrivilegeAction::Edit.as_str(), "Edit");
        assert_eq!(PrivilegeAction::Delete.to_string(), "Delete");
    }

    #[tokio::test]
    async fn test_check_against_store() {
        let store = MemoryStore::new();
        store.set_privilege("Edit", 1000).await;
        let owner = store.add_user("owner", 1, false).await;
        let editor = store.add_user("editor", 1500, false).await;
        let newcomer = store.add_user("newcomer", 10, false).await;
        let question = store.add_question("Q", "", owner.id).await;
        let answer = store.add_answer(question.id, owner.id, "body").await;

        assert!(check_your_privilege(&store, PrivilegeAction::Edit, owner.id, &answer).await.unwrap());
        assert!(check_your_privilege(&store, PrivilegeAction::Edit, editor.id, &answer).await.unwrap());
        assert!(!check_your_privilege(&store, PrivilegeAction::Edit, newcomer.id, &answer).await.unwrap());

        // No threshold configured for Delete
        assert!(!check_your_privilege(&store, PrivilegeAction::Delete, editor.id, &answer).await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_actor_denied() {
        let store = MemoryStore::new();
        let owner = store.add_user("owner", 1, false).await;
        let question = store.add_question("Q", "", owner.id).await;
        let answer = store.add_answer(question.id, owner.id, "body").await;

        assert!(!check_your_privilege(&store, PrivilegeAction::Edit, 9999, &answer).await.unwrap());
    }
}
