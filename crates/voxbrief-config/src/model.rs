// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for voxbrief.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the transcript inside prompt templates.
pub const TEXT_PLACEHOLDER: &str = "{text}";

/// Printf-style placeholder accepted for templates carried over from `*_TEMPLATE` env vars.
pub const LEGACY_PLACEHOLDER: &str = "%s";

const REDACTED: &str = "[REDACTED]";

/// Top-level voxbrief configuration.
///
/// Every section is optional and defaults to the values the bot has always
/// run with.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VoxbriefConfig {
    #[serde(default)]
    pub agent: AgentConfig,

    /// Telegram bot and delivery settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Gemini API, model pair and retry budget.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Prompt texts sent to the model.
    #[serde(default)]
    pub prompts: PromptsConfig,

    /// ffmpeg subprocess settings.
    #[serde(default)]
    pub transcoder: TranscoderConfig,

    /// Update polling and job fan-out.
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Transcript cache used by "shorter" follow-ups.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl VoxbriefConfig {
    /// A copy safe to print: credentials are replaced by a marker.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.telegram.bot_token.is_some() {
            copy.telegram.bot_token = Some(REDACTED.to_string());
        }
        if copy.gemini.api_key.is_some() {
            copy.gemini.api_key = Some(REDACTED.to_string());
        }
        copy
    }
}

/// Process-level settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram bot configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Bot API token. Required by `serve`.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Alternative Bot API server URL (self-hosted server, tests).
    #[serde(default)]
    pub api_url: Option<String>,

    /// Long-poll timeout passed to `getUpdates`.
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u32,

    /// Deadline for a single outbound send.
    #[serde(default = "default_send_timeout_secs")]
    pub send_timeout_secs: u64,

    /// Maximum characters per outbound message.
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,

    /// Largest accepted media file, in megabytes.
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
}

impl TelegramConfig {
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs)
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            api_url: None,
            poll_timeout_secs: default_poll_timeout_secs(),
            send_timeout_secs: default_send_timeout_secs(),
            max_message_length: default_max_message_length(),
            max_file_size_mb: default_max_file_size_mb(),
        }
    }
}

// Stays below teloxide's default HTTP client timeout.
fn default_poll_timeout_secs() -> u32 {
    10
}

fn default_send_timeout_secs() -> u64 {
    30
}

fn default_max_message_length() -> usize {
    4096
}

fn default_max_file_size_mb() -> u64 {
    20
}

/// Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Google API key. Required by `serve`.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model tried first for every request.
    #[serde(default = "default_primary_model")]
    pub primary_model: String,

    /// Model tried once the primary budget is spent.
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,

    #[serde(default = "default_primary_attempts")]
    pub primary_attempts: u32,

    #[serde(default = "default_fallback_attempts")]
    pub fallback_attempts: u32,

    /// Fixed delay between attempts on the same model.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Deadline for a single generateContent call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl GeminiConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            primary_model: default_primary_model(),
            fallback_model: default_fallback_model(),
            primary_attempts: default_primary_attempts(),
            fallback_attempts: default_fallback_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_primary_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_fallback_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_primary_attempts() -> u32 {
    3
}

fn default_fallback_attempts() -> u32 {
    5
}

fn default_retry_delay_ms() -> u64 {
    3000
}

fn default_request_timeout_secs() -> u64 {
    120
}

/// Prompt texts.
///
/// `user_template` and `short_template` must contain `{text}` (or the
/// legacy `%s`), which is replaced by the transcript.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PromptsConfig {
    /// Priming instruction sent as the first user turn of a summary request.
    #[serde(default = "default_system_prompt")]
    pub system: String,

    /// Model turn acknowledging the priming instruction.
    #[serde(default = "default_acknowledgement")]
    pub acknowledgement: String,

    /// Template for the full summary.
    #[serde(default = "default_user_template")]
    pub user_template: String,

    /// Template for the "кратко" follow-up.
    #[serde(default = "default_short_template")]
    pub short_template: String,

    /// Instruction sent alongside the audio for transcription.
    #[serde(default = "default_transcription_prompt")]
    pub transcription: String,
}

impl PromptsConfig {
    pub fn user_prompt(&self, text: &str) -> String {
        render_template(&self.user_template, text)
    }

    pub fn short_prompt(&self, text: &str) -> String {
        render_template(&self.short_template, text)
    }
}

/// Substitutes the first placeholder in `template` with `text`.
pub fn render_template(template: &str, text: &str) -> String {
    if template.contains(TEXT_PLACEHOLDER) {
        template.replacen(TEXT_PLACEHOLDER, text, 1)
    } else {
        template.replacen(LEGACY_PLACEHOLDER, text, 1)
    }
}

/// True if `template` carries a placeholder `render_template` understands.
pub fn has_placeholder(template: &str) -> bool {
    template.contains(TEXT_PLACEHOLDER) || template.contains(LEGACY_PLACEHOLDER)
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            system: default_system_prompt(),
            acknowledgement: default_acknowledgement(),
            user_template: default_user_template(),
            short_template: default_short_template(),
            transcription: default_transcription_prompt(),
        }
    }
}

fn default_system_prompt() -> String {
    "Вы - высококвалифицированный ассистент по обработке и анализу текста, специализирующийся на создании кратких и информативных резюме голосовых сообщений. Ваши ответы всегда должны быть на русском языке. Избегайте использования эмодзи, смайликов и разговорных выражений, таких как 'говорящий' или 'говоритель'. При форматировании текста используйте следующие обозначения:
* **жирный текст** для выделения ключевых понятий
* *курсив* для обозначения важных, но второстепенных деталей
* ```python для обозначения начала и конца блоков кода
* * в начале строки для создания маркированных списков.
Ваша задача - создавать краткие, но содержательные резюме, выделяя наиболее важную информацию и ключевые моменты из предоставленного текста. Стремитесь к ясности и лаконичности изложения, сохраняя при этом основной смысл и контекст исходного сообщения."
        .to_string()
}

fn default_acknowledgement() -> String {
    "Понял, буду следовать указанным правилам форматирования и структуры.".to_string()
}

fn default_user_template() -> String {
    "Ваша цель - обработать и проанализировать следующий текст, полученный из расшифровки голосового сообщения:
{text}
Пожалуйста, создайте краткое резюме, соблюдая следующие правила:
1. Начните резюме с горизонтальной линии (---) для визуального разделения.
2. Ограничьте абстрактное резюме максимум шестью предложениями.
3. Выделите жирным шрифтом ключевые слова и фразы в каждом предложении.
4. Если в тексте присутствуют числовые данные или статистика, включите их в резюме, выделив курсивом.
5. Определите основную тему или темы сообщения и укажите их в начале резюме.
6. Если в тексте есть какие-либо действия или рекомендации, выделите их в отдельный маркированный список.
7. В конце резюме добавьте короткий параграф (2-3 предложения) с аналитическим заключением или выводом на основе содержания сообщения."
        .to_string()
}

fn default_short_template() -> String {
    "Сделай очень краткое резюме (1-2 предложения) на основе этого текста, выделив только самую главную мысль: {text}"
        .to_string()
}

fn default_transcription_prompt() -> String {
    "Пожалуйста, транскрибируйте этот аудио файл в текст на том языке, на котором говорят в записи. Верните только текст транскрипции без дополнительных комментариев."
        .to_string()
}

/// ffmpeg transcoder configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TranscoderConfig {
    /// ffmpeg executable name or path.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    /// Wall-clock limit for one transcode.
    #[serde(default = "default_transcode_timeout_secs")]
    pub timeout_secs: u64,

    /// Directory for staged media. Defaults to the system temp dir.
    #[serde(default)]
    pub staging_dir: Option<String>,
}

impl TranscoderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            timeout_secs: default_transcode_timeout_secs(),
            staging_dir: None,
        }
    }
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_transcode_timeout_secs() -> u64 {
    120
}

/// Update polling and job fan-out configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DispatchConfig {
    /// Pause after a failed `getUpdates` before polling again.
    #[serde(default = "default_fetch_backoff_ms")]
    pub fetch_backoff_ms: u64,

    /// Jobs allowed to run at once. Further jobs wait inside their task.
    #[serde(default = "default_max_concurrent_jobs")]
    pub max_concurrent_jobs: usize,

    /// How long shutdown waits for in-flight jobs.
    #[serde(default = "default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,
}

impl DispatchConfig {
    pub fn fetch_backoff(&self) -> Duration {
        Duration::from_millis(self.fetch_backoff_ms)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            fetch_backoff_ms: default_fetch_backoff_ms(),
            max_concurrent_jobs: default_max_concurrent_jobs(),
            shutdown_grace_secs: default_shutdown_grace_secs(),
        }
    }
}

fn default_fetch_backoff_ms() -> u64 {
    3000
}

fn default_max_concurrent_jobs() -> usize {
    16
}

fn default_shutdown_grace_secs() -> u64 {
    30
}

/// Transcript cache configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Upper bound on cached transcripts. `None` keeps every entry.
    #[serde(default)]
    pub max_entries: Option<usize>,
}
