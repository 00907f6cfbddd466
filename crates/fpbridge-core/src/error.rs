use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid member classification: {0} (expected \"prisoner\" or \"suspect\")")]
    InvalidMember(String),
}

pub type Result<T> = std::result::Result<T, Error>;
