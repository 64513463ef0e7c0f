use crate::semrush::{ApiKey, Database};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("API key is required (pass --api-key or set SEMRUSH_API_KEY)")]
    MissingApiKey,

    #[error("database is required (e.g. us, uk, ca, au)")]
    MissingDatabase,

    #[error("no keywords supplied (pass --keywords or --file)")]
    NoKeywords,
}

/// Everything one lookup batch needs. Built once from user input, then passed by reference.
#[derive(Debug, Clone)]
pub struct VolumeRequest {
    pub api_key: ApiKey,
    pub database: Database,
    pub keywords: Vec<String>,
    pub include_cpc: bool,
}

impl VolumeRequest {
    /// Validate raw inputs. Blank keywords are dropped before the emptiness check.
    pub fn new(
        api_key: Option<&str>,
        database: Option<&str>,
        keywords: Vec<String>,
        include_cpc: bool,
    ) -> Result<Self, InputError> {
        let api_key = api_key.and_then(ApiKey::new).ok_or(InputError::MissingApiKey)?;
        let database = database
            .and_then(Database::new)
            .ok_or(InputError::MissingDatabase)?;

        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            return Err(InputError::NoKeywords);
        }

        Ok(Self {
            api_key,
            database,
            keywords,
            include_cpc,
        })
    }
}
