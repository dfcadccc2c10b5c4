/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Folder scanned for exam JSON files to process
    pub input_folder: String,
    /// Folder corrected/re-exported exam JSON files are written to
    pub export_folder: String,
    /// Curriculum taxonomy data file (TOML)
    pub curriculum_file: String,
    /// School directory data file (TOML)
    pub schools_file: String,
    /// Whether to emit verbose logs
    pub verbose_logging: bool,
    /// Session log file
    pub output_log_file: String,
    /// Upper bound for the exam variable field (observed 10 and 1000 across
    /// deployments, so it is configuration rather than a literal)
    pub exam_variable_max: u32,
    /// Whether processed exams are also published to Drive + the sheet log
    pub publish_enabled: bool,
    // --- Cloudinary (image store) ---
    pub cloudinary_cloud_name: String,
    pub cloudinary_api_key: String,
    pub cloudinary_api_secret: String,
    // --- Google service account (document store + tabular log) ---
    pub google_client_email: String,
    pub google_private_key_pem: String,
    pub google_token_uri: String,
    pub drive_folder_id: String,
    pub spreadsheet_id: String,
    // --- OCR / structuring model ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_folder: "exam_json".to_string(),
            export_folder: "exports".to_string(),
            curriculum_file: "curriculum.toml".to_string(),
            schools_file: "schools.toml".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            exam_variable_max: 10,
            publish_enabled: false,
            cloudinary_cloud_name: String::new(),
            cloudinary_api_key: String::new(),
            cloudinary_api_secret: String::new(),
            google_client_email: String::new(),
            google_private_key_pem: String::new(),
            google_token_uri: "https://oauth2.googleapis.com/token".to_string(),
            drive_folder_id: String::new(),
            spreadsheet_id: String::new(),
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            input_folder: std::env::var("INPUT_FOLDER").unwrap_or(default.input_folder),
            export_folder: std::env::var("EXPORT_FOLDER").unwrap_or(default.export_folder),
            curriculum_file: std::env::var("CURRICULUM_FILE").unwrap_or(default.curriculum_file),
            schools_file: std::env::var("SCHOOLS_FILE").unwrap_or(default.schools_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            exam_variable_max: std::env::var("EXAM_VARIABLE_MAX").ok().and_then(|v| v.parse().ok()).unwrap_or(default.exam_variable_max),
            publish_enabled: std::env::var("PUBLISH_ENABLED").ok().and_then(|v| v.parse().ok()).unwrap_or(default.publish_enabled),
            cloudinary_cloud_name: std::env::var("CLOUDINARY_CLOUD_NAME").unwrap_or(default.cloudinary_cloud_name),
            cloudinary_api_key: std::env::var("CLOUDINARY_API_KEY").unwrap_or(default.cloudinary_api_key),
            cloudinary_api_secret: std::env::var("CLOUDINARY_API_SECRET").unwrap_or(default.cloudinary_api_secret),
            google_client_email: std::env::var("GOOGLE_CLIENT_EMAIL").unwrap_or(default.google_client_email),
            google_private_key_pem: std::env::var("GOOGLE_PRIVATE_KEY_PEM").unwrap_or(default.google_private_key_pem),
            google_token_uri: std::env::var("GOOGLE_TOKEN_URI").unwrap_or(default.google_token_uri),
            drive_folder_id: std::env::var("DRIVE_FOLDER_ID").unwrap_or(default.drive_folder_id),
            spreadsheet_id: std::env::var("SPREADSHEET_ID").unwrap_or(default.spreadsheet_id),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        }
    }
}
