pub mod openai;

use anyhow::Result;

use crate::configuration::Config;
use crate::domain::models::BackendBox;

pub struct BackendManager {}

impl BackendManager {
    pub fn get(config: &Config) -> Result<BackendBox> {
        return Ok(Box::new(openai::OpenAI::new(config)?));
    }
}
