pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid episode YAML: {message}")]
    InvalidEpisode { message: String },

    #[error("Invalid character file YAML: {message}")]
    InvalidCharacterTable { message: String },

    #[error("Unknown character `{name}`: not listed in the character file")]
    UnknownCharacter { name: String },
}
