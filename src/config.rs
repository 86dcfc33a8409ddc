use ::envconfig::Envconfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreInterface {
    Appwrite,
    Memory,
}

impl ::std::str::FromStr for StoreInterface {
    type Err = ::anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "appwrite" => Ok(StoreInterface::Appwrite),
            "memory" => Ok(StoreInterface::Memory),
            _ => Err(::anyhow::anyhow!("unknown store interface: {}", s)),
        }
    }
}

#[derive(::envconfig::Envconfig, Debug, Clone)]
pub struct Config {
    #[envconfig(from = "HTTP_PORT_API", default = "8081")]
    pub http_port_api: u16,

    #[envconfig(from = "APPWRITE_ENDPOINT")]
    pub appwrite_endpoint: String,

    #[envconfig(from = "APPWRITE_PROJECT_ID")]
    pub appwrite_project_id: String,

    #[envconfig(from = "APPWRITE_API_KEY")]
    pub appwrite_api_key: Option<String>,

    #[envconfig(from = "APPWRITE_DATABASE_ID", default = "verses")]
    pub database_id: String,

    #[envconfig(from = "CONTENT_COLLECTION_ID", default = "content")]
    pub content_collection_id: String,

    #[envconfig(
        from = "USER_PROFILES_COLLECTION_ID",
        default = "user_profiles"
    )]
    pub user_profiles_collection_id: String,

    #[envconfig(from = "COMMENTS_COLLECTION_ID", default = "comments")]
    pub comments_collection_id: String,

    #[envconfig(
        from = "SAVED_CONTENT_COLLECTION_ID",
        default = "saved_content"
    )]
    pub saved_content_collection_id: String,

    #[envconfig(from = "BLOG_COLLECTION_ID", default = "user_blog")]
    pub blog_collection_id: String,

    #[envconfig(
        from = "PROFILE_PICTURES_BUCKET_ID",
        default = "profile_pictures"
    )]
    pub profile_pictures_bucket_id: String,

    #[envconfig(from = "STORE_INTERFACE", default = "appwrite")]
    pub store_interface: StoreInterface,
}

impl Config {
    pub fn from_env() -> Result<Self, ::envconfig::Error> {
        Self::init_from_env()
    }

    pub fn collections(&self) -> crate::model::Collections {
        crate::model::Collections {
            content: self.content_collection_id.clone(),
            user_profiles: self.user_profiles_collection_id.clone(),
            comments: self.comments_collection_id.clone(),
            saved_content: self.saved_content_collection_id.clone(),
            blog: self.blog_collection_id.clone(),
            profile_pictures: self.profile_pictures_bucket_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::std::collections::HashMap;

    fn required() -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert(
            "APPWRITE_ENDPOINT".to_string(),
            "https://cloud.appwrite.io/v1".to_string(),
        );
        vars.insert("APPWRITE_PROJECT_ID".to_string(), "verses".to_string());
        vars
    }

    #[test]
    fn test_defaults() {
        let config = Config::init_from_hashmap(&required()).unwrap();
        assert_eq!(config.http_port_api, 8081);
        assert_eq!(config.content_collection_id, "content");
        assert_eq!(config.blog_collection_id, "user_blog");
        assert_eq!(config.store_interface, StoreInterface::Appwrite);
        assert!(config.appwrite_api_key.is_none());
    }

    #[test]
    fn test_missing_endpoint_is_an_error() {
        let mut vars = required();
        vars.remove("APPWRITE_ENDPOINT");
        assert!(Config::init_from_hashmap(&vars).is_err());
    }

    #[test]
    fn test_missing_project_is_an_error() {
        let mut vars = required();
        vars.remove("APPWRITE_PROJECT_ID");
        assert!(Config::init_from_hashmap(&vars).is_err());
    }

    #[test]
    fn test_store_interface() {
        let mut vars = required();
        vars.insert("STORE_INTERFACE".to_string(), "memory".to_string());
        let config = Config::init_from_hashmap(&vars).unwrap();
        assert_eq!(config.store_interface, StoreInterface::Memory);

        vars.insert("STORE_INTERFACE".to_string(), "sqlite".to_string());
        assert!(Config::init_from_hashmap(&vars).is_err());
    }
}
