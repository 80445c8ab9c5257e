use thiserror::Error;


#[derive(Debug, Error)]
pub enum SeedInputError {
    #[error("input is not a valid JSON array of songs")]
    InvalidJson {
        #[source]
        error: serde_json::Error,
    },

    #[error("song at index {} has no title", .index)]
    MissingTitle { index: usize },
}
