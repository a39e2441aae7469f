use rand::{Rng, seq::SliceRandom};

use crate::{
    dto::reviews::ReviewText,
    error::{AppError, AppResult},
    state::AppState,
};

pub const MAX_DISPLAYED_REVIEWS: usize = 20;

pub async fn add_review(state: &AppState, text: Option<&str>) -> AppResult<()> {
    let text = text.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(AppError::BadRequest("Review cannot be empty".into()));
    }

    state.store.insert_review(text).await?;
    tracing::debug!(len = text.len(), "review stored");
    Ok(())
}

pub async fn random_reviews(state: &AppState) -> AppResult<Vec<ReviewText>> {
    let texts = state.store.list_reviews().await?;
    let sampled = sample_reviews(texts, &mut rand::thread_rng(), MAX_DISPLAYED_REVIEWS);
    Ok(sampled.into_iter().map(|text| ReviewText { text }).collect())
}

/// Uniformly shuffle `texts` and keep at most `limit` of them.
pub fn sample_reviews<R: Rng + ?Sized>(
    mut texts: Vec<String>,
    rng: &mut R,
    limit: usize,
) -> Vec<String> {
    texts.shuffle(rng);
    texts.truncate(limit);
    texts
}
