// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing reply texts.

use std::fmt::Display;

pub const TITLE_TRANSCRIPTION: &str = "Transcription";
pub const TITLE_SUMMARY: &str = "Summary";
pub const TITLE_SHORT_SUMMARY: &str = "Краткое резюме";

pub const PROCESSING: &str = "Обрабатываю ваш медиафайл, это может занять некоторое время...";
pub const NO_SPEECH: &str = "Не удалось распознать речь в аудио.";
pub const SHORTER_PROGRESS: &str = "Создаю еще более краткое резюме...";
pub const UNSUPPORTED_DOCUMENT: &str =
    "Извините, я могу обрабатывать только аудиофайлы форматов mp3, wav и oga.";

pub fn welcome(primary_model: &str, fallback_model: &str, max_file_size_mb: u64) -> String {
    format!(
        "Привет! Я бот, который может транскрибировать и суммировать голосовые сообщения, видео и аудиофайлы.\n\n\
         Просто отправь мне голосовое сообщение, видео или аудиофайл (mp3, wav, oga), и я преобразую его в текст и создам краткое резюме.\n\n\
         P.S Данный бот работает на мощностях Google Gemini AI, использует модели {primary_model} и {fallback_model} для транскрипции и суммаризации\n\n\
         Важно: максимальный размер файла для обработки - {max_file_size_mb} МБ."
    )
}

pub fn unsupported(max_file_size_mb: u64) -> String {
    format!(
        "Извините, я работаю только с голосовыми сообщениями, видео и аудиофайлами (mp3, wav, oga). \
         Максимальный размер файла - {max_file_size_mb} МБ."
    )
}

pub fn file_too_large(max_file_size_mb: u64) -> String {
    format!("Извините, максимальный размер файла - {max_file_size_mb} МБ. Ваш файл слишком большой.")
}

pub fn media_failed(err: impl Display) -> String {
    format!("Произошла ошибка при обработке медиафайла: {err}")
}

pub fn transcription_failed(err: impl Display) -> String {
    format!("Произошла ошибка при транскрипции аудио: {err}")
}

pub fn summary_failed(err: impl Display) -> String {
    format!("Произошла ошибка при создании резюме: {err}")
}

pub fn short_summary_failed(err: impl Display) -> String {
    format!("Ошибка при создании краткого резюме: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_names_models_and_limit() {
        let text = welcome("gemini-2.5-flash", "gemini-2.0-flash", 20);
        assert!(text.starts_with("Привет!"));
        assert!(text.contains("модели gemini-2.5-flash и gemini-2.0-flash"));
        assert!(text.ends_with("20 МБ."));
        assert_eq!(text.matches("\n\n").count(), 3);
    }

    #[test]
    fn unsupported_mentions_limit() {
        assert!(unsupported(20).ends_with("Максимальный размер файла - 20 МБ."));
        assert!(unsupported(20).contains("(mp3, wav, oga). Максимальный"));
    }

    #[test]
    fn failures_embed_the_error() {
        assert_eq!(
            short_summary_failed("boom"),
            "Ошибка при создании краткого резюме: boom"
        );
        assert!(media_failed("x").ends_with(": x"));
    }
}
