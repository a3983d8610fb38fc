pub mod handle_upload_file;
pub mod handle_upload_files;
pub mod multipart;

pub use handle_upload_file::handle_upload_file;
pub use handle_upload_files::handle_upload_files;
