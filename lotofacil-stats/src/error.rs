use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Quantidade do ranking deve ser positiva (recebida: {0})")]
    InvalidWindowSize(usize),

    #[error("Sequência mínima deve ser pelo menos 2 (recebida: {0})")]
    InvalidRunLength(usize),

    #[error("Configuração inválida: {message}")]
    Config { message: String },

    #[error("Erro de leitura da configuração: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON de configuração inválido: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, StatsError>;
