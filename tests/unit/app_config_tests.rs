/*!
 * Tests for app configuration functionality
 */

use std::str::FromStr;

use doctrans::app_config::{Config, ProviderConfig, TranslationProvider};

#[test]
fn test_default_config_shouldHaveSaneValues() {
    let config = Config::default();
    assert_eq!(config.source_language, "en");
    assert_eq!(config.translation.provider, TranslationProvider::Ollama);
    assert_eq!(config.pipeline.max_segment_chars, 400);
    assert_eq!(config.translation.available_providers.len(), 4);
}

#[test]
fn test_default_config_shouldValidate() {
    let config = Config::default();
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_withInvalidLanguage_shouldFail() {
    let mut config = Config::default();
    config.target_language = "zz".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withZeroSegmentChars_shouldFail() {
    let mut config = Config::default();
    config.pipeline.max_segment_chars = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withOpenAIAndNoApiKey_shouldFail() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::OpenAI;
    assert!(config.validate().is_err());
}

#[test]
fn test_provider_fromStr_shouldParseKnownProviders() {
    assert_eq!(TranslationProvider::from_str("ollama").unwrap(), TranslationProvider::Ollama);
    assert_eq!(TranslationProvider::from_str("OpenAI").unwrap(), TranslationProvider::OpenAI);
    assert_eq!(
        TranslationProvider::from_str("anthropic").unwrap(),
        TranslationProvider::Anthropic
    );
    assert!(TranslationProvider::from_str("bedrock").is_err());
}

#[test]
fn test_get_model_shouldFallBackToProviderDefault() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Anthropic;
    // Blank out the configured model to hit the fallback
    if let Some(provider) = config
        .translation
        .available_providers
        .iter_mut()
        .find(|p| p.provider_type == "anthropic")
    {
        provider.model = String::new();
    }
    assert_eq!(config.translation.get_model(), "claude-3-haiku");
}

#[test]
fn test_get_endpoint_shouldPreferConfiguredValue() {
    let mut config = Config::default();
    if let Some(provider) = config
        .translation
        .available_providers
        .iter_mut()
        .find(|p| p.provider_type == "ollama")
    {
        provider.endpoint = "http://10.1.2.3:11434".to_string();
    }
    assert_eq!(config.translation.get_endpoint(), "http://10.1.2.3:11434");
}

#[test]
fn test_optimal_concurrent_requests_shouldClampToBounds() {
    let mut config = Config::default();
    if let Some(provider) = config
        .translation
        .available_providers
        .iter_mut()
        .find(|p| p.provider_type == "ollama")
    {
        provider.concurrent_requests = 500;
    }
    assert_eq!(config.translation.optimal_concurrent_requests(), 32);

    if let Some(provider) = config
        .translation
        .available_providers
        .iter_mut()
        .find(|p| p.provider_type == "ollama")
    {
        provider.concurrent_requests = 0;
    }
    assert_eq!(config.translation.optimal_concurrent_requests(), 1);
}

#[test]
fn test_config_serde_roundTrip_shouldPreserveFields() {
    let mut config = Config::default();
    config.target_language = "de".to_string();
    config.pipeline.max_segment_chars = 250;

    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.target_language, "de");
    assert_eq!(parsed.pipeline.max_segment_chars, 250);
    assert_eq!(parsed.translation.provider, TranslationProvider::Ollama);
}

#[test]
fn test_config_deserialization_withMissingPipelineSection_shouldUseDefaults() {
    let json = r#"{
        "source_language": "en",
        "target_language": "fr",
        "translation": { "provider": "ollama" }
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.pipeline.max_segment_chars, 400);
    assert!(config.translation.available_providers.is_empty());
    // Missing provider entries fall back to built-in defaults
    assert_eq!(config.translation.get_endpoint(), "http://localhost:11434");
    assert_eq!(config.translation.optimal_concurrent_requests(), 8);
}

#[test]
fn test_provider_config_new_shouldMatchProviderType() {
    let anthropic = ProviderConfig::new(TranslationProvider::Anthropic);
    assert_eq!(anthropic.provider_type, "anthropic");
    assert_eq!(anthropic.rate_limit, Some(45));
    assert_eq!(anthropic.timeout_secs, 60);

    let lmstudio = ProviderConfig::new(TranslationProvider::LMStudio);
    assert_eq!(lmstudio.endpoint, "http://localhost:1234/v1");
    assert_eq!(lmstudio.rate_limit, None);
}
