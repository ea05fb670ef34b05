use crate::{
    domain::{chat::Chat, expert::Expert},
    infra::error::AppError,
};

/// Initial roster and chat collection handed to the store at construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedData {
    pub experts: Vec<Expert>,
    pub chats: Vec<Chat>,
}

pub trait SeedSource {
    fn load(&self) -> Result<SeedData, AppError>;
}

impl<T: SeedSource + ?Sized> SeedSource for &T {
    fn load(&self) -> Result<SeedData, AppError> {
        (*self).load()
    }
}
