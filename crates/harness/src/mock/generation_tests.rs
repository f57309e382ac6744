// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

#[tokio::test]
async fn default_text_and_usage() {
    let client = MockGenerationClient::new();
    let generation = client
        .generate_content("say something nice", &GenerationOptions::default())
        .await
        .unwrap();

    assert_eq!(generation.text, DEFAULT_MOCK_TEXT);
    assert_eq!(generation.finish_reason.as_deref(), Some("STOP"));
    let usage = generation.usage.unwrap();
    assert_eq!(usage.prompt_tokens, 3);
    assert_eq!(usage.candidates_tokens, 5);
    assert_eq!(usage.total_tokens, 8);
    assert_eq!(generation.model.as_deref(), Some(DEFAULT_GENERATION_MODEL));
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn first_matching_rule_wins() {
    let client = MockGenerationClient::new()
        .with_rule("weather", "sunny")
        .with_rule("weather today", "rainy")
        .with_response("fallback");

    let options = GenerationOptions::default();
    let hit = client.generate_content("weather today?", &options).await.unwrap();
    let miss = client.generate_content("hello", &options).await.unwrap();
    assert_eq!(hit.text, "sunny");
    assert_eq!(miss.text, "fallback");
}

#[tokio::test]
async fn options_model_overrides_default() {
    let client = MockGenerationClient::new().with_model("base");
    let options = GenerationOptions {
        model: Some("override".to_string()),
        ..Default::default()
    };
    let generation = client.generate_content("hi", &options).await.unwrap();
    assert_eq!(generation.model.as_deref(), Some("override"));
    assert_eq!(client.model(), "base");
}

#[tokio::test]
async fn empty_prompt_is_an_invalid_request() {
    let client = MockGenerationClient::new();
    let err = client
        .generate_content("   ", &GenerationOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::InvalidRequest(_)));
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn count_tokens_counts_words() {
    let client = MockGenerationClient::new();
    assert_eq!(client.count_tokens("one two  three").await.unwrap(), 3);
}
