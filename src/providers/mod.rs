/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for various LLM providers:
 * - Ollama: Local LLM server
 * - OpenAI: OpenAI API integration (also serves LM Studio)
 * - Anthropic: Anthropic API integration
 *
 * The clients are bound into the translation service through the
 * `TranslationService` provider enum; the pipeline itself only ever sees the
 * `TranslateUnit` capability trait, which `providers::mock` implements for
 * tests.
 */

pub mod anthropic;
pub mod mock;
pub mod ollama;
pub mod openai;
