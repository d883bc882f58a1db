pub mod entity;
pub mod invariants;

pub use entity::{
    content_type_for, file_extension, generate_object_name, ImageFile, DEFAULT_IMAGE_FOLDER,
};
pub use invariants::{object_path_from_url, validate_folder};
