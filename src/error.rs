use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Отсутствует обязательная переменная окружения: {0:?}. Программа принудительно остановлена.")]
    MissingEnv(Vec<String>),

    #[error("Эндпоинт недоступен. Код ответа API: {0}")]
    Endpoint(reqwest::StatusCode),

    #[error("Сбой при запросе к эндпоинту: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Ответ API сервиса не преобразован в формат JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Не верный тип данных. Ожидаемый тип {expected}. Получен {got}")]
    UnexpectedType {
        expected: &'static str,
        got: &'static str,
    },

    #[error("Отсутствует ожидаемый ключ в ответе API: {0}")]
    MissingKey(&'static str),

    #[error("Недокументированный статус домашней работы: {0:?}")]
    UnknownStatus(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, BotError>;
