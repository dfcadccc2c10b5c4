pub mod cloudinary_client;
pub mod drive_client;
pub mod google_auth;
pub mod sheets_client;

pub use cloudinary_client::CloudinaryClient;
pub use drive_client::{DriveClient, StoredDocument};
pub use google_auth::GoogleAuth;
pub use sheets_client::SheetsClient;
