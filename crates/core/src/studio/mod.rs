mod error;
mod operations;
mod requests;
mod types;

pub use error::ValidationError;
pub use operations::{
    data_uri, next_local_id, normalize_category, sanitize_file_name, sort_newest_first,
    upload_object_key,
};
pub use requests::{
    CreateContactRequest, CreatePhotoRequest, DeleteRequest, UpdateProfileRequest,
};
pub use types::{
    ContactMessage, NewContactMessage, NewPhoto, Photo, Profile, ProfileUpdate, Record, RecordId,
    StoredProfile, DEFAULT_CATEGORY, DEFAULT_PROFILE_NAME, DEFAULT_PROFILE_TITLE,
};
