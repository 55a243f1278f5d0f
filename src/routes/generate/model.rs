use crate::{
    error::AppError,
    llm::{CompletionClient, build_hashtag_prompt, parse_suggestions},
    models::{GenerationRequest, HashtagSuggestion},
};

/// Runs one generation: validate input, build the prompt, call the model,
/// validate its output. Each stage fails with its own `AppError` variant.
pub async fn generate_hashtags(
    client: &dyn CompletionClient,
    req: &GenerationRequest,
) -> Result<Vec<HashtagSuggestion>, AppError> {
    req.validate().map_err(AppError::Validation)?;

    let prompt = build_hashtag_prompt(
        req.description.trim(),
        req.platform,
        req.strategy,
        &req.language,
        &req.location,
    );

    let raw = client.complete(&prompt).await.map_err(|e| {
        tracing::error!("Completion request failed: {}", e);
        AppError::UpstreamCall(e)
    })?;

    let hashtags = parse_suggestions(&raw)?;
    if hashtags.is_empty() {
        tracing::warn!("Model response contained no usable hashtags");
    }

    Ok(hashtags)
}
