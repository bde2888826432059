/// Database models for askbase
///
/// Each model holds its own SQL; the [`crate::store`] traits expose the
/// subset the request handlers need.
///
/// # Models
///
/// - `user`: Users and their reputation totals
/// - `question`: Questions with a flat tags field
/// - `answer`: Answers with soft-delete state
/// - `vote`: Up/down votes on answers
/// - `setting`: Site settings and privilege thresholds
/// - `notification`: Per-user notifications
/// - `post_history`: Edit/delete/undelete log
///
/// # Example
///
/// ```no_run
/// use askbase_shared::models::question::Question;
/// use askbase_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let rust_questions = Question::tagged(&pool, "rust").await?;
/// # Ok(())
/// # }
/// ```

pub mod answer;
pub mod notification;
pub mod post_history;
pub mod question;
pub mod setting;
pub mod user;
pub mod vote;
